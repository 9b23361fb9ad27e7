mod init;
mod step;
mod watchers;

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use verdant_runtime::{ConfigHandle, Walkaround};

use crate::config::AppConfig;
use crate::walker::Walker;

/// Running totals reported when the loop ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    pub frames: u64,
    pub cell_changes: u64,
    pub recycled: u64,
    pub reloads: u64,
    pub last_rev: u64,
}

pub struct App {
    walkaround: Walkaround,
    walker: Walker,
    handle: ConfigHandle,
    config: AppConfig,
    config_path: PathBuf,
    config_event_rx: Option<Receiver<()>>,
    stats: RunStats,
}
