mod parsing;
mod settings;
mod types;

pub use types::{
    ConfigError, Environment, LangSettings, RuntimeSettings, Settings, SiteSettings,
    TelemetrySettings,
};
