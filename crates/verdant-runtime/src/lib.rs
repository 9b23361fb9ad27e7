//! Per-frame driver: config snapshots, tile recentering and grass recycling.
#![forbid(unsafe_code)]

mod live;
mod viewer;
mod walkaround;

pub use live::{ConfigHandle, LiveConfig};
pub use viewer::ViewerState;
pub use walkaround::{FrameReport, Walkaround};
