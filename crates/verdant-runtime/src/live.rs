use std::sync::{Arc, RwLock};

use verdant_field::ElevationParams;
use verdant_tiles::TileColor;

/// Settings that may change while the program runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveConfig {
    pub elevation: ElevationParams,
    pub tile_color: TileColor,
}

struct Versioned {
    rev: u64,
    config: Arc<LiveConfig>,
}

/// Shared, versioned slot for [`LiveConfig`].
///
/// Writers publish whole snapshots; readers take one `Arc` per frame, so a
/// frame never mixes two parameter sets.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Versioned>>,
}

impl ConfigHandle {
    pub fn new(config: LiveConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned {
                rev: 1,
                config: Arc::new(config),
            })),
        }
    }

    /// Current revision and snapshot, read under one lock.
    pub fn snapshot(&self) -> (u64, Arc<LiveConfig>) {
        match self.inner.read() {
            Ok(guard) => (guard.rev, Arc::clone(&guard.config)),
            Err(poisoned) => {
                let guard = poisoned.into_inner();
                (guard.rev, Arc::clone(&guard.config))
            }
        }
    }

    pub fn revision(&self) -> u64 {
        self.snapshot().0
    }

    /// Replaces the snapshot and bumps the revision. Returns the new revision.
    pub fn publish(&self, config: LiveConfig) -> u64 {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.rev = guard.rev.wrapping_add(1).max(1);
        guard.config = Arc::new(config);
        log::debug!(target: "config", "published live config rev={}", guard.rev);
        guard.rev
    }

    /// Copy-modify-publish on the current snapshot.
    pub fn update_with<F>(&self, f: F) -> u64
    where
        F: FnOnce(&mut LiveConfig),
    {
        let (_, current) = self.snapshot();
        let mut next = (*current).clone();
        f(&mut next);
        self.publish(next)
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(LiveConfig::default())
    }
}
