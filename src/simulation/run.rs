use std::collections::VecDeque;

use rand::Rng;

use crate::config::{GRID_HEIGHT, GRID_WIDTH, INITIAL_ALIVE_PROBABILITY, TERMINATION_LAG};
use crate::simulation::detector::{self, Termination};
use crate::simulation::grid::Grid;
use crate::simulation::history::History;
use crate::simulation::rules;

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
    /// Schedule another tick.
    Continue,
    /// The run reached a steady state; stop scheduling ticks.
    Stop(Termination),
}

/// One self-contained simulation run: the current snapshot, the lag window
/// used for steady-state detection, and the population history.
///
/// The run does not pace itself. The host calls [`tick`](Self::tick)
/// whenever it wants a generation computed (a frame callback in the app, a
/// tight loop in tests) and acts on the returned [`TickAction`]. Once a run
/// terminates, further ticks are no-ops.
pub struct SimulationRun {
    current: Grid,
    /// Most recent completed snapshots, newest first (lag-1, then lag-2)
    lags: VecDeque<Grid>,
    history: History,
    generation: u32,
    termination: Option<Termination>,
}

impl SimulationRun {
    /// Start a run from a fresh random grid using the configured
    /// dimensions and seeding probability.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::from_grid(Grid::random(
            GRID_WIDTH,
            GRID_HEIGHT,
            INITIAL_ALIVE_PROBABILITY,
            rng,
        ))
    }

    /// Start a run from an explicit initial grid. The initial population
    /// is recorded immediately as generation 0.
    pub fn from_grid(initial: Grid) -> Self {
        let mut history = History::new();
        history.record(initial.population() as u32);
        Self {
            current: initial,
            lags: VecDeque::with_capacity(TERMINATION_LAG),
            history,
            generation: 0,
            termination: None,
        }
    }

    /// Advance one generation, unless the run has already terminated.
    pub fn tick(&mut self) -> TickAction {
        if let Some(reason) = self.termination {
            return TickAction::Stop(reason);
        }

        let next = rules::next_generation(&self.current);
        let previous = std::mem::replace(&mut self.current, next);
        self.lags.push_front(previous);
        self.lags.truncate(TERMINATION_LAG);

        self.generation += 1;
        self.history.record(self.current.population() as u32);

        match detector::check(&self.current, self.lags.front(), self.lags.get(1)) {
            Some(reason) => {
                self.termination = Some(reason);
                TickAction::Stop(reason)
            }
            None => TickAction::Continue,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Population of the current generation.
    pub fn population(&self) -> u32 {
        self.history.latest()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_population_recorded() {
        let run = SimulationRun::from_grid(Grid::from_alive_cells(10, 10, &[(1, 1), (2, 2)]));
        assert_eq!(run.generation(), 0);
        assert_eq!(run.history().series(), &[2]);
        assert_eq!(run.population(), 2);
    }

    #[test]
    fn test_all_dead_terminates_immediately() {
        let mut run = SimulationRun::from_grid(Grid::dead(10, 10));
        assert_eq!(run.tick(), TickAction::Stop(Termination::FixedPoint));
        assert_eq!(run.generation(), 1);
    }

    #[test]
    fn test_block_is_fixed_point_at_first_tick() {
        let block = Grid::from_alive_cells(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
        let mut run = SimulationRun::from_grid(block.clone());
        assert_eq!(run.tick(), TickAction::Stop(Termination::FixedPoint));
        assert_eq!(run.termination(), Some(Termination::FixedPoint));
        assert_eq!(run.grid(), &block);
    }

    #[test]
    fn test_blinker_terminates_as_period_two() {
        let blinker = Grid::from_alive_cells(10, 10, &[(5, 4), (5, 5), (5, 6)]);
        let mut run = SimulationRun::from_grid(blinker.clone());
        assert_eq!(run.tick(), TickAction::Continue);
        assert_eq!(run.tick(), TickAction::Stop(Termination::Period2));
        assert_eq!(run.generation(), 2);
        // Back to the original shape
        assert_eq!(run.grid(), &blinker);
    }

    #[test]
    fn test_history_length_tracks_generation() {
        // A glider never trips the 2-lag detector, so it ticks freely
        let glider = Grid::from_alive_cells(20, 20, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
        let mut run = SimulationRun::from_grid(glider);
        for _ in 0..50 {
            assert_eq!(run.tick(), TickAction::Continue);
            assert_eq!(
                run.history().series().len(),
                run.generation() as usize + 1
            );
        }
        assert_eq!(run.generation(), 50);
    }

    #[test]
    fn test_terminal_run_is_idempotent() {
        let block = Grid::from_alive_cells(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
        let mut run = SimulationRun::from_grid(block);
        assert_eq!(run.tick(), TickAction::Stop(Termination::FixedPoint));

        let generation = run.generation();
        let series_len = run.history().series().len();
        let grid = run.grid().clone();
        for _ in 0..10 {
            assert_eq!(run.tick(), TickAction::Stop(Termination::FixedPoint));
        }
        assert_eq!(run.generation(), generation);
        assert_eq!(run.history().series().len(), series_len);
        assert_eq!(run.grid(), &grid);
    }

    #[test]
    fn test_runs_do_not_interfere() {
        let mut rng = rand::thread_rng();
        let mut a = SimulationRun::new(&mut rng);
        let b = SimulationRun::new(&mut rng);
        let b_before = b.grid().clone();
        a.tick();
        assert_eq!(b.grid(), &b_before);
        assert_eq!(b.generation(), 0);
    }
}
