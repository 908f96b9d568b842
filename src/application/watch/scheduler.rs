//! Per-module debouncing
//!
//! Every signal for a module replaces that module's pending deadline, so a
//! burst of file events collapses into one job that fires once the burst has
//! been quiet for the debounce delay. Time is passed in by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Quiet period after asset changes
pub const ASSET_DEBOUNCE_MS: u64 = 300;

/// Quiet period after manifest saves
pub const CONFIG_DEBOUNCE_MS: u64 = 1000;

/// What touched a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A path under one of the module's asset roots
    AssetsTouched,
    /// The module's `pubspec.yaml`
    ConfigSaved,
}

impl Signal {
    pub fn delay(self) -> Duration {
        match self {
            Signal::AssetsTouched => Duration::from_millis(ASSET_DEBOUNCE_MS),
            Signal::ConfigSaved => Duration::from_millis(CONFIG_DEBOUNCE_MS),
        }
    }
}

/// A job whose deadline passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueJob {
    pub module: PathBuf,
    pub assets_touched: bool,
    pub config_saved: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    assets_touched: bool,
    config_saved: bool,
    deadline: Instant,
}

impl Pending {
    fn delay(&self) -> Duration {
        if self.config_saved {
            Signal::ConfigSaved.delay()
        } else {
            Signal::AssetsTouched.delay()
        }
    }
}

#[derive(Debug, Default)]
pub struct DebounceScheduler {
    pending: BTreeMap<PathBuf, Pending>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signal` for `module`, pushing its deadline out
    ///
    /// A job holding a config save keeps the longer config delay.
    pub fn schedule(&mut self, module: &Path, signal: Signal, now: Instant) {
        let job = self
            .pending
            .entry(module.to_path_buf())
            .or_insert(Pending {
                assets_touched: false,
                config_saved: false,
                deadline: now,
            });
        match signal {
            Signal::AssetsTouched => job.assets_touched = true,
            Signal::ConfigSaved => job.config_saved = true,
        }
        job.deadline = now + job.delay();
    }

    /// Drop the pending job of `module`, if any
    pub fn cancel(&mut self, module: &Path) -> bool {
        self.pending.remove(module).is_some()
    }

    /// Remove and return every job due at `now`, ordered by module path
    pub fn take_due(&mut self, now: Instant) -> Vec<DueJob> {
        let due: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, job)| job.deadline <= now)
            .map(|(module, _)| module.clone())
            .collect();

        due.into_iter()
            .filter_map(|module| {
                let job = self.pending.remove(&module)?;
                Some(DueJob {
                    module,
                    assets_touched: job.assets_touched,
                    config_saved: job.config_saved,
                })
            })
            .collect()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|job| job.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
