//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - One generation cycle per module (scan, detect, render, write)
//! - `WatchUseCase` - Debounced regeneration driven by file events
//!
//! ## Services
//!
//! - `ConfigChangeCache` - Last accepted configuration snapshot per module

pub mod change_cache;
pub mod generate;
pub mod watch;

pub use change_cache::ConfigChangeCache;
pub use generate::{
    GenerateOptions, GenerateUseCase, ModuleFailure, ModulePlan, ModuleReport, ProjectReport,
    WriteStatus,
};
pub use watch::{
    DebounceScheduler, DueJob, ModuleIndex, Signal, WatchEvent, WatchUseCase, ASSET_DEBOUNCE_MS,
    CONFIG_DEBOUNCE_MS,
};
