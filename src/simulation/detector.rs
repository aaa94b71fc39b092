use crate::simulation::grid::Grid;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The grid is identical to the previous generation (static, including
    /// the all-dead board).
    FixedPoint,
    /// The grid matches the state from two generations ago: a 2-cycle.
    Period2,
}

impl Termination {
    pub fn describe(self) -> &'static str {
        match self {
            Termination::FixedPoint => "fixed point",
            Termination::Period2 => "period-2 oscillation",
        }
    }
}

/// Compare the freshly computed generation against the two lagged
/// snapshots. Fixed points win over 2-cycles when both would match.
///
/// Known limitation, kept on purpose: only periods 1 and 2 are detected.
/// Longer-period oscillators and spaceships run until the user intervenes.
pub fn check(current: &Grid, lag1: Option<&Grid>, lag2: Option<&Grid>) -> Option<Termination> {
    if lag1.is_some_and(|previous| previous == current) {
        return Some(Termination::FixedPoint);
    }
    if lag2.is_some_and(|previous| previous == current) {
        return Some(Termination::Period2);
    }
    None
}
