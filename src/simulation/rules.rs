use crate::simulation::grid::Grid;

/// Count the alive cells among the 8 toroidally wrapped neighbors of
/// (row, col), excluding the cell itself.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for row_offset in -1..=1 {
        for col_offset in -1..=1 {
            if row_offset == 0 && col_offset == 0 {
                continue;
            }
            if grid.is_alive(row as isize + row_offset, col as isize + col_offset) {
                count += 1;
            }
        }
    }
    count
}

/// Compute the next generation under B3/S23: an alive cell survives with
/// exactly 2 or 3 alive neighbors, a dead cell is born with exactly 3.
/// Returns a fresh snapshot; the input is untouched.
pub fn next_generation(current: &Grid) -> Grid {
    let width = current.width();
    let height = current.height();
    let mut cells = vec![0u8; width * height];

    for row in 0..height {
        for col in 0..width {
            let neighbors = live_neighbors(current, row, col);
            let alive = current.is_alive(row as isize, col as isize);
            let next_alive = match (alive, neighbors) {
                (true, 2) | (true, 3) => true,
                (false, 3) => true,
                _ => false,
            };
            cells[row * width + col] = u8::from(next_alive);
        }
    }

    Grid::from_cells(width, height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::dead(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                assert_eq!(live_neighbors(&grid, row, col), 0);
            }
        }
        let next = next_generation(&grid);
        assert_eq!(next, grid);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_lone_cell_dies() {
        let grid = Grid::from_alive_cells(10, 10, &[(5, 5)]);
        let next = next_generation(&grid);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_block_is_fixed_point() {
        let block = Grid::from_alive_cells(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
        let next = next_generation(&block);
        assert_eq!(next, block);
    }

    #[test]
    fn test_blinker_has_period_two() {
        let horizontal = Grid::from_alive_cells(10, 10, &[(5, 4), (5, 5), (5, 6)]);
        let vertical = next_generation(&horizontal);
        assert_ne!(vertical, horizontal);
        assert_eq!(
            vertical,
            Grid::from_alive_cells(10, 10, &[(4, 5), (5, 5), (6, 5)])
        );
        assert_eq!(next_generation(&vertical), horizontal);
    }

    #[test]
    fn test_neighbor_count_wraps_at_edges() {
        let height = 8;
        let width = 10;
        let grid = Grid::from_alive_cells(width, height, &[(0, 0)]);
        // The corner cell is a wrapped neighbor of all three opposite corners
        assert_eq!(live_neighbors(&grid, height - 1, 0), 1);
        assert_eq!(live_neighbors(&grid, 0, width - 1), 1);
        assert_eq!(live_neighbors(&grid, height - 1, width - 1), 1);
        // But not of a cell in the interior
        assert_eq!(live_neighbors(&grid, 4, 4), 0);
    }

    #[test]
    fn test_blinker_across_the_seam() {
        // A blinker straddling the top edge oscillates just like one in
        // the interior: the rule must read wrapped rows, not zeros.
        let grid = Grid::from_alive_cells(10, 10, &[(9, 5), (0, 5), (1, 5)]);
        let next = next_generation(&grid);
        assert_eq!(
            next,
            Grid::from_alive_cells(10, 10, &[(0, 4), (0, 5), (0, 6)])
        );
        assert_eq!(next_generation(&next), grid);
    }

    #[test]
    fn test_overcrowded_cell_dies() {
        // Center of a 3x3 full square has 8 neighbors
        let mut alive = Vec::new();
        for row in 4..7 {
            for col in 4..7 {
                alive.push((row, col));
            }
        }
        let grid = Grid::from_alive_cells(10, 10, &alive);
        assert_eq!(live_neighbors(&grid, 5, 5), 8);
        let next = next_generation(&grid);
        assert!(!next.is_alive(5, 5));
    }
}
