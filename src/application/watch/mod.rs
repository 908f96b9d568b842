//! Watch Use Case
//!
//! Keeps generated output in sync while files change. It orchestrates:
//! - File system monitoring (via `notify` crate)
//! - Mapping changed paths to modules (`ModuleIndex`)
//! - Per-module debouncing (300ms for assets, 1s for manifests)
//! - Skipping manifest saves that change nothing functional (`ConfigChangeCache`)
//!
//! ## Usage
//!
//! ```ignore
//! let mut use_case = WatchUseCase::new(generate, project_root, project_id, cache);
//! use_case.start(&modules, running, |event| { ... })?;
//! ```

mod event;
mod index;
mod scheduler;
mod use_case;


pub use event::WatchEvent;
pub use index::ModuleIndex;
pub use scheduler::{DebounceScheduler, DueJob, Signal, ASSET_DEBOUNCE_MS, CONFIG_DEBOUNCE_MS};
pub use use_case::WatchUseCase;
