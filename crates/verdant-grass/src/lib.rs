//! Fixed-capacity grass instance pool that follows the viewer.
#![forbid(unsafe_code)]

mod buffers;
pub mod config;
mod pool;

pub use buffers::InstanceBuffers;
pub use config::GrassConfig;
pub use pool::{GrassInstance, GrassPool, RECYCLE_SLACK_ULPS, recycle_limit};
