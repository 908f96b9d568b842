//! Generate Module
//!
//! One generation cycle per module: scan the asset roots, work out which
//! capabilities the generated code may rely on, render, and write the output
//! only when it changed.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`GenerateOptions`)
//! - `result` - Result types (`ModulePlan`, `ModuleReport`, `ProjectReport`)
//! - `use_case` - Core use case logic (`GenerateUseCase`)

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::{ModuleFailure, ModulePlan, ModuleReport, ProjectReport, WriteStatus};
pub use use_case::{GenerateUseCase, WRITE_RETRIES};

#[cfg(test)]
mod tests;
