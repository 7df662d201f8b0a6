//! Test support: an in-memory pixel renderer, a recording skin, a hook
//! recorder widget, a grid builder and a frame harness.

use tracing::{Level, debug};

/// In-memory renderer.
pub mod backend;
/// Grid test helpers.
pub mod grid;
/// Harness for frame testing.
pub mod harness;
/// Hook-recording widget.
pub mod recorder;
/// Recording skin.
pub mod skin;

pub use backend::{GridRenderer, Op};
pub use grid::Grid;
pub use harness::Harness;
pub use recorder::{HookLog, Recorder};
pub use skin::{DrawCall, TestSkin};

/// Install a trace-level subscriber that writes through the test harness's
/// captured output. Safe to call from every test.
pub fn init_tracing() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .without_time()
        .try_init()
    {
        debug!("subscriber already installed: {e}");
    }
}
