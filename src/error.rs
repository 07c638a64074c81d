//! Error types for product configuration

use crate::schema::{Channel, SettingKind};
use thiserror::Error;

/// Result type alias for product configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Product configuration errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate feature group: {0}")]
    DuplicateGroup(String),

    #[error("Duplicate setting: {group}.{setting}")]
    DuplicateSetting { group: String, setting: String },

    #[error("Setting '{0}' declared before any feature group")]
    SettingOutsideGroup(String),

    #[error("Default for {group}.{setting} is {actual}, but the setting is declared {declared}")]
    DefaultKindMismatch {
        group: String,
        setting: String,
        declared: SettingKind,
        actual: SettingKind,
    },

    #[error("Boolean setting {group}.{setting} feeds the {channel} channel but declares no emission literals")]
    MissingLiterals {
        group: String,
        setting: String,
        channel: Channel,
    },

    #[error("Unknown feature group: {0}")]
    UnknownGroup(String),

    #[error("Unknown setting: {group}.{setting}")]
    UnknownSetting { group: String, setting: String },

    #[error("Kind mismatch for {group}.{setting}: expected {expected}, got {actual}")]
    KindMismatch {
        group: String,
        setting: String,
        expected: SettingKind,
        actual: SettingKind,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
