//! Domain Layer
//!
//! Pure logic of the asset generator, with every I/O dependency behind a port.
//!
//! ## Structure
//!
//! - `entities/` - The asset tree
//! - `value_objects/` - Immutable value types (MediaType, SemanticVersion, PubspecSnapshot)
//! - `services/` - Tree building, identifier sanitizing, version logic, code generation
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
