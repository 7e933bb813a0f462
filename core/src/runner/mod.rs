mod io_pump;
mod traits;
pub mod types;

pub use io_pump::{pump_stderr, LineReader, StderrTail, STDERR_CAPTURE_BYTES};
pub use traits::{RunnerPlugin, RunnerSession};
pub use types::{RunOutcome, ToolCommand, DEFAULT_PROGRAM};
