mod detector;
mod grid;
mod history;
mod rules;
mod run;

pub use detector::Termination;
pub use grid::Grid;
pub use history::History;
pub use run::{SimulationRun, TickAction};
