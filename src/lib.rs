//! Answer sheet helpers for quiz attempt review: the attempt summary header,
//! attempt eligibility, per question type instructions, user identity
//! strings and audit events.
//!
//! Host services (users, strings, capabilities, the event bus) are traits
//! reached through a [`RequestContext`] built once per request.

pub mod core;
pub mod db;
pub mod error;
pub mod repositories;
pub mod schemas;
pub mod services;

#[cfg(test)]
mod test_support;

pub use crate::core::config::Settings;
pub use crate::core::context::{CapabilityChecker, ModuleContext, RequestContext};
pub use error::{Error, Result};
pub use schemas::summary::{SummaryContent, SummaryData, SummaryItem};
pub use services::attempt_policy::{can_create_attempt, can_create_attempt_with};
pub use services::attempt_summary::{build_summary, AttemptSnapshot, AttemptView};
pub use services::events::{emit_event, EventKind};
pub use services::hidden_fields::{read_hidden_field, read_serialized_field};
pub use services::instructions::get_instruction;
pub use services::lang::LangCatalog;
pub use services::user_identity::format_user_identity;

/// Reads settings from the environment (and `.env`) along with the string
/// catalog they select.
pub fn load_environment() -> Result<(Settings, LangCatalog)> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    let strings = LangCatalog::from_settings(&settings)?;
    Ok((settings, strings))
}

/// [`load_environment`] plus logging setup.
pub fn init() -> anyhow::Result<(Settings, LangCatalog)> {
    let (settings, strings) = load_environment()?;
    crate::core::telemetry::init_tracing(&settings)?;

    tracing::info!(
        environment = %settings.runtime().environment.as_str(),
        site_url = %settings.site().site_url,
        "Answer sheet helpers configured"
    );

    Ok((settings, strings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigError;
    use crate::services::lang::{StringArgs, StringCatalog, QUIZ_COMPONENT};
    use crate::test_support::{clear_env, env_lock, write_temp_file};

    #[test]
    fn load_environment_reports_config_errors() {
        let _guard = env_lock();
        clear_env();
        std::env::set_var("ANSWERSHEETS_SITE_URL", "lms.example.org");

        let err = load_environment().unwrap_err();
        clear_env();
        assert!(matches!(err, Error::Config(ConfigError::InvalidSiteUrl(ref url)) if url == "lms.example.org"));
    }

    #[test]
    fn load_environment_applies_lang_overlay() {
        let _guard = env_lock();
        clear_env();
        let path = write_temp_file("load-overlay.json", r#"{"quiz": {"state": "Status"}}"#);
        std::env::set_var("ANSWERSHEETS_LANG_PATH", &path);

        let loaded = load_environment();
        clear_env();
        let (settings, strings) = loaded.unwrap();
        assert_eq!(settings.lang().lang_path.as_deref(), Some(path.as_path()));
        assert_eq!(strings.get_string("state", QUIZ_COMPONENT, &StringArgs::None).unwrap(), "Status");
    }

    #[test]
    fn load_environment_reports_catalog_errors() {
        let _guard = env_lock();
        clear_env();
        let path = write_temp_file("load-broken.json", "{not json");
        std::env::set_var("ANSWERSHEETS_LANG_PATH", &path);

        let err = load_environment().unwrap_err();
        clear_env();
        assert!(matches!(err, Error::CatalogLoad { .. }));
    }
}
