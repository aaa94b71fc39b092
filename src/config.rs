/// Grid dimensions (toroidal: both axes wrap)
pub const GRID_WIDTH: usize = 100;
pub const GRID_HEIGHT: usize = 100;

/// On-screen size of one cell in pixels
pub const CELL_SIZE: u32 = 6;

/// Probability that a cell starts alive in a fresh random grid
pub const INITIAL_ALIVE_PROBABILITY: f64 = 0.2;

/// How many completed generations are retained for steady-state detection.
/// Fixed at 2: a fixed point is caught against lag-1, a 2-cycle against
/// lag-2. Oscillators of period 3 or more are never detected.
pub const TERMINATION_LAG: usize = 2;

/// Minimum time between simulation ticks
pub const TICK_INTERVAL_MS: u64 = 30;

// ============================================
// Final-result reporting
// ============================================

/// Endpoint receiving the end-of-run payload
pub const REPORT_URL: &str = "https://life-report.example.com/api/v1/runs";

/// Plain-text public IP lookup, best effort
pub const IP_LOOKUP_URL: &str = "https://api.ipify.org";

/// Per-request timeout for the lookup and the report POST
pub const REPORT_TIMEOUT_MS: u64 = 4000;

/// How long the sent/failed badge stays in the window title
pub const BADGE_DURATION_MS: u64 = 5000;

// ============================================
// Termination graph
// ============================================

/// Maximum population samples uploaded for the history graph. Longer runs
/// are downsampled by striding before upload.
pub const GRAPH_MAX_SAMPLES: usize = 4096;
