//! Watch event types

use std::path::Path;

use serde::Serialize;

use crate::application::generate::WriteStatus;

/// Watch event types for NDJSON output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        project: String,
        modules: Vec<String>,
    },
    /// Debounced signals for a module fired
    ModuleChanged {
        module: String,
        assets: bool,
        config: bool,
    },
    /// A generation cycle finished
    Generated {
        module: String,
        output: String,
        status: WriteStatus,
    },
    /// Configuration saved without functional changes
    Skipped { module: String, reason: String },
    /// Error occurred
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        module: Option<String>,
        message: String,
    },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    pub fn error(module: Option<&Path>, message: impl Into<String>) -> Self {
        WatchEvent::Error {
            module: module.map(|m| m.display().to_string()),
            message: message.into(),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
