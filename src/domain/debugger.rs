//! Debugger console helpers: log icons and per-entity error lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    PlatformGenerated,
    UserGenerated,
}

/// A debugger console entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub severity: Severity,
    pub category: LogCategory,
    #[serde(default)]
    pub text: String,
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "success",
        Severity::Error => "close-circle",
        Severity::Warning => "warning",
    }
}

/// Errors always show the severity icon; other entries show who produced them.
pub fn log_icon(log: &Log) -> &'static str {
    if log.severity == Severity::Error {
        return severity_icon(log.severity);
    }
    match log.category {
        LogCategory::PlatformGenerated => "desktop",
        LogCategory::UserGenerated => "user-2",
    }
}

/// Error ids embed the entity id, so any id containing `entity_id` counts.
pub fn entity_has_errors(entity_id: &str, errors: &HashMap<String, Log>) -> bool {
    errors.keys().any(|id| id.contains(entity_id))
}
