use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::App;
use crate::config::load_config_from_path;

impl App {
    /// Watches the config file on a background thread; each change event
    /// lands as a `()` on the returned channel.
    pub(super) fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        std::thread::spawn(move || {
            use notify::{EventKind, RecursiveMode, Watcher};
            let watcher = notify::recommended_watcher(
                move |res: Result<notify::Event, notify::Error>| {
                    if let Ok(event) = res {
                        match event.kind {
                            EventKind::Modify(_)
                            | EventKind::Create(_)
                            | EventKind::Remove(_)
                            | EventKind::Any => {
                                let _ = tx.send(());
                            }
                            _ => {}
                        }
                    }
                },
            );
            match watcher {
                Ok(mut watcher) => {
                    if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
                        log::warn!(target: "config", "cannot watch {}: {}", path.display(), e);
                        return;
                    }
                    log::info!(target: "config", "watching {}", path.display());
                    loop {
                        std::thread::sleep(std::time::Duration::from_secs(3600));
                    }
                }
                Err(e) => log::warn!(target: "config", "file watcher unavailable: {}", e),
            }
        });
        rx
    }

    /// Drains watcher events and republishes the live config once if any
    /// arrived. A failed reload keeps the previous config.
    pub(super) fn poll_config_reload(&mut self) {
        let Some(rx) = self.config_event_rx.as_ref() else {
            return;
        };
        let mut changed = false;
        for _ in rx.try_iter() {
            changed = true;
        }
        if !changed {
            return;
        }
        let path = self.config_path.as_path();
        if !path.exists() {
            log::warn!(target: "config", "config missing: {}", path.display());
            return;
        }
        let next = match load_config_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!(target: "config", "config reload failed ({}): {}", path.display(), e);
                return;
            }
        };
        let live = match next.live() {
            Ok(live) => live,
            Err(e) => {
                log::warn!(target: "config", "config reload failed ({}): {}", path.display(), e);
                return;
            }
        };
        let mut layout = next.tiles.clone();
        layout.color = self.config.tiles.color.clone();
        if layout != self.config.tiles
            || next.grass != self.config.grass
            || next.viewer != self.config.viewer
        {
            log::info!(
                target: "config",
                "[tiles], [grass] and [viewer] changes apply on restart"
            );
        }
        let rev = self.handle.publish(live);
        self.config.elevation = next.elevation;
        self.config.tiles.color = next.tiles.color;
        self.stats.reloads += 1;
        log::info!(target: "config", "config reloaded from {} (rev {})", path.display(), rev);
    }
}
