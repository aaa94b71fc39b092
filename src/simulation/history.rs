/// Population count per generation, in chronological order.
///
/// Append-only for the lifetime of a run; a restart builds a fresh tracker.
#[derive(Default)]
pub struct History {
    populations: Vec<u32>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the population of the generation that just completed.
    pub fn record(&mut self, population: u32) {
        self.populations.push(population);
    }

    /// Most recent population, or 0 before anything was recorded.
    pub fn latest(&self) -> u32 {
        self.populations.last().copied().unwrap_or(0)
    }

    /// Full series, oldest first. Read-only view.
    pub fn series(&self) -> &[u32] {
        &self.populations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert_eq!(history.latest(), 0);
        assert!(history.series().is_empty());
    }

    #[test]
    fn test_record_preserves_order() {
        let mut history = History::new();
        history.record(2000);
        history.record(1543);
        history.record(1600);
        assert_eq!(history.series(), &[2000, 1543, 1600]);
        assert_eq!(history.latest(), 1600);
    }
}
