//! Error type shared by the library and the runner

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to allocate body pool for {capacity} bodies")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("failed to read settings from {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}
