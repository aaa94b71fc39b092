use rand::Rng;

/// Immutable snapshot of the cell field.
///
/// The board is toroidal: row and column indices wrap at the edges, so
/// every cell has exactly eight neighbors. A snapshot is never mutated
/// after construction; advancing the simulation produces a new `Grid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major, 1 = alive, 0 = dead
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell independently alive with the given
    /// probability.
    pub fn random(
        width: usize,
        height: usize,
        alive_probability: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let cells = (0..width * height)
            .map(|_| u8::from(rng.gen::<f64>() < alive_probability))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create an all-dead grid.
    pub fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Create a grid with exactly the given cells alive.
    #[allow(dead_code)]
    pub fn from_alive_cells(width: usize, height: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::dead(width, height);
        for &(row, col) in alive {
            grid.cells[row * width + col] = 1;
        }
        grid
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (row, col) is alive, with both indices wrapped
    /// toroidally. Negative offsets wrap to the opposite edge.
    pub fn is_alive(&self, row: isize, col: isize) -> bool {
        let row = row.rem_euclid(self.height as isize) as usize;
        let col = col.rem_euclid(self.width as isize) as usize;
        self.cells[row * self.width + col] == 1
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().map(|&c| c as usize).sum()
    }

    /// Row-major cell bytes, 1 = alive.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_grid_dimensions() {
        let mut rng = rand::thread_rng();
        let grid = Grid::random(100, 100, 0.2, &mut rng);
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 100);
        assert_eq!(grid.cells().len(), 10000);
    }

    #[test]
    fn test_random_probability_extremes() {
        let mut rng = rand::thread_rng();
        let empty = Grid::random(20, 20, 0.0, &mut rng);
        assert_eq!(empty.population(), 0);
        let full = Grid::random(20, 20, 1.0, &mut rng);
        assert_eq!(full.population(), 400);
    }

    #[test]
    fn test_toroidal_wrap() {
        let grid = Grid::from_alive_cells(10, 8, &[(0, 0)]);
        // (0,0) seen through every wrapped alias
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(8, 0));
        assert!(grid.is_alive(0, 10));
        assert!(grid.is_alive(-8, -10));
        assert!(grid.is_alive(-16, 20));
        assert!(!grid.is_alive(1, 1));
    }

    #[test]
    fn test_population() {
        let grid = Grid::from_alive_cells(5, 5, &[(0, 0), (2, 3), (4, 4)]);
        assert_eq!(grid.population(), 3);
        assert_eq!(Grid::dead(5, 5).population(), 0);
    }

    #[test]
    fn test_equality() {
        let a = Grid::from_alive_cells(5, 5, &[(1, 1), (2, 2)]);
        let b = Grid::from_alive_cells(5, 5, &[(1, 1), (2, 2)]);
        let c = Grid::from_alive_cells(5, 5, &[(1, 1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same cell layout but different dimensions never compares equal
        let wide = Grid::dead(10, 5);
        let tall = Grid::dead(5, 10);
        assert_ne!(wide, tall);
    }
}
