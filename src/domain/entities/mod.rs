//! Domain entities

mod asset_node;

pub use asset_node::{AssetNode, ROOT_NAME};
