use std::path::PathBuf;

use time::UtcOffset;

use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_environment, parse_identity_fields,
    parse_offset_minutes, parse_site_url,
};
use super::types::{
    ConfigError, LangSettings, RuntimeSettings, Settings, SiteSettings, TelemetrySettings,
};
use crate::db::types::IdentityField;

const DEFAULT_FULLNAME_DISPLAY: &str = "{firstname} {lastname}";

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = parse_environment(
            env_optional("ANSWERSHEETS_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );

        let site_url = parse_site_url(env_or_default("ANSWERSHEETS_SITE_URL", "http://localhost"))?;
        let fullname_display =
            env_or_default("ANSWERSHEETS_FULLNAME_DISPLAY", DEFAULT_FULLNAME_DISPLAY);
        let show_user_identity =
            parse_identity_fields(env_optional("ANSWERSHEETS_SHOW_USER_IDENTITY"))?;
        let default_timezone = parse_offset_minutes(
            "ANSWERSHEETS_DEFAULT_TIMEZONE_MINUTES",
            env_or_default("ANSWERSHEETS_DEFAULT_TIMEZONE_MINUTES", "0"),
        )?;

        let lang_path = env_optional("ANSWERSHEETS_LANG_PATH").map(PathBuf::from);

        let log_level = env_or_default("ANSWERSHEETS_LOG_LEVEL", "info");
        let json =
            env_optional("ANSWERSHEETS_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            runtime: RuntimeSettings { environment },
            site: SiteSettings { site_url, fullname_display, show_user_identity, default_timezone },
            lang: LangSettings { lang_path },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    pub fn lang(&self) -> &LangSettings {
        &self.lang
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let template = &self.site.fullname_display;
        if !template.contains("{firstname}") && !template.contains("{lastname}") {
            return Err(ConfigError::InvalidValue {
                field: "ANSWERSHEETS_FULLNAME_DISPLAY",
                value: template.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runtime: RuntimeSettings { environment: super::Environment::Development },
            site: SiteSettings {
                site_url: "http://localhost".to_string(),
                fullname_display: DEFAULT_FULLNAME_DISPLAY.to_string(),
                show_user_identity: vec![IdentityField::Email],
                default_timezone: UtcOffset::UTC,
            },
            lang: LangSettings { lang_path: None },
            telemetry: TelemetrySettings { log_level: "info".to_string(), json: false },
        }
    }
}

impl SiteSettings {
    /// Profile page for `user_id` in the scope of `course_id`.
    pub fn user_profile_url(&self, user_id: i64, course_id: i64) -> String {
        format!("{}/user/view.php?id={user_id}&course={course_id}", self.site_url)
    }
}
