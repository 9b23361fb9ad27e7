use std::error::Error;
use std::path::PathBuf;

use verdant_runtime::{ConfigHandle, Walkaround};

use super::{App, RunStats};
use crate::config::AppConfig;
use crate::walker::{Route, Walker};

impl App {
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        route: Route,
        watch_config: bool,
    ) -> Result<Self, Box<dyn Error>> {
        config.validate()?;
        let handle = ConfigHandle::new(config.live()?);

        let mut walker = Walker::new(&config.viewer, route);
        let walkaround = Walkaround::new(
            handle.clone(),
            &config.tiles,
            &config.grass,
            walker.pos,
        );
        walker.step(0.0, &|x, z| walkaround.ground_height(x, z));

        let config_event_rx = if watch_config {
            Some(Self::spawn_config_watcher(config_path.clone()))
        } else {
            None
        };

        log::info!(
            "walkaround ready: {} tiles, {} grass instances, route {:?}",
            walkaround.grid().tiles().len(),
            walkaround.grass_pool().len(),
            route
        );

        Ok(Self {
            walkaround,
            walker,
            handle,
            config,
            config_path,
            config_event_rx,
            stats: RunStats::default(),
        })
    }
}
