//! Terminal rendering for the CLI

pub mod diff;
pub mod terminal;
pub mod theme;
pub mod views;
