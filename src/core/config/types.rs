use std::path::PathBuf;

use thiserror::Error;
use time::UtcOffset;

use crate::db::types::IdentityField;

#[derive(Debug, Clone)]
pub struct Settings {
    pub(super) runtime: RuntimeSettings,
    pub(super) site: SiteSettings,
    pub(super) lang: LangSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub site_url: String,
    pub fullname_display: String,
    pub show_user_identity: Vec<IdentityField>,
    pub default_timezone: UtcOffset,
}

#[derive(Debug, Clone)]
pub struct LangSettings {
    pub lang_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("invalid site url: {0}")]
    InvalidSiteUrl(String),
    #[error("unknown identity field: {0}")]
    UnknownIdentityField(String),
}
