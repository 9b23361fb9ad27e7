use std::time::{Duration, Instant};

use verdant_runtime::FrameReport;

use super::{App, RunStats};

impl App {
    /// One frame: config reload, viewer movement, then the terrain tick.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        self.poll_config_reload();
        self.walkaround.sync_config();
        let walkaround = &self.walkaround;
        self.walker.step(dt, &|x, z| walkaround.ground_height(x, z));

        let report = self.walkaround.tick(&self.walker.viewer_state());
        self.stats.frames += 1;
        self.stats.recycled += report.recycled as u64;
        self.stats.last_rev = report.config_rev;
        if report.cell_changed {
            self.stats.cell_changes += 1;
        }
        if report.tick % 60 == 0 {
            let p = self.walker.pos;
            log::debug!(
                target: "frame",
                "tick {} pos=({:.2}, {:.2}, {:.2}) cell=({}, {})",
                report.tick,
                p.x,
                p.y,
                p.z,
                report.viewer_cell.x,
                report.viewer_cell.z
            );
        }
        report
    }

    /// Runs `frames` frames (forever when 0). With `realtime`, frames are
    /// paced to `dt` of wall clock so file edits can land mid-run.
    pub fn run(&mut self, frames: u64, dt: f32, realtime: bool) -> RunStats {
        let started = Instant::now();
        let frame_time = Duration::from_secs_f32(dt.max(0.0));
        let mut i = 0u64;
        while frames == 0 || i < frames {
            let t0 = Instant::now();
            self.step(dt);
            i += 1;
            if realtime {
                if let Some(rest) = frame_time.checked_sub(t0.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        self.log_summary(started.elapsed());
        self.stats
    }

    fn log_summary(&self, elapsed: Duration) {
        let cell = self.walkaround.grid().viewer_cell().unwrap_or_default();
        let cache = self.walkaround.grid().geometry_cache().stats();
        let [r, g, b] = self.walkaround.tile_color().to_rgb8();
        log::info!(
            "{} frames in {:.2?}: walked {:.1} units to ({:.1}, {:.1}, {:.1}), cell ({}, {}), {} cell changes, \
             {} grass recycled, {} reloads (rev {}), {} tile geometries, color #{:02X}{:02X}{:02X}",
            self.stats.frames,
            elapsed,
            self.walker.distance,
            self.walker.pos.x,
            self.walker.pos.y,
            self.walker.pos.z,
            cell.x,
            cell.z,
            self.stats.cell_changes,
            self.stats.recycled,
            self.stats.reloads,
            self.stats.last_rev,
            cache.entries,
            r,
            g,
            b
        );
    }
}
