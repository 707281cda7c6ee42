use std::env;

use time::UtcOffset;

use super::types::{ConfigError, Environment};
use crate::db::types::IdentityField;

/// Largest UTC offset `time` accepts, in minutes (just under 26 hours).
const MAX_OFFSET_MINUTES: i32 = 25 * 60 + 59;

pub(super) fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

pub(super) fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

pub(super) fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

pub(super) fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref().map(|item| item.to_lowercase()) {
        Some(ref val) if val == "production" || val == "prod" => Environment::Production,
        Some(ref val) if val == "staging" => Environment::Staging,
        Some(ref val) if val == "test" || val == "testing" => Environment::Test,
        _ => Environment::Development,
    }
}

pub(super) fn parse_site_url(value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    if !has_scheme || trimmed.len() <= "https://".len() {
        return Err(ConfigError::InvalidSiteUrl(value));
    }
    Ok(trimmed.to_string())
}

pub(super) fn parse_identity_fields(value: Option<String>) -> Result<Vec<IdentityField>, ConfigError> {
    let Some(raw) = value else {
        return Ok(vec![IdentityField::Email]);
    };

    raw.split(',')
        .map(|item| item.trim().to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .map(|item| IdentityField::parse(&item).ok_or(ConfigError::UnknownIdentityField(item)))
        .collect()
}

pub(super) fn parse_offset_minutes(field: &'static str, value: String) -> Result<UtcOffset, ConfigError> {
    let minutes: i32 =
        value.parse().map_err(|_| ConfigError::InvalidValue { field, value: value.clone() })?;
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(ConfigError::InvalidValue { field, value });
    }
    UtcOffset::from_whole_seconds(minutes * 60).map_err(|_| ConfigError::InvalidValue { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }

    #[test]
    fn parse_environment_variants() {
        assert_eq!(parse_environment(Some("prod".to_string())), Environment::Production);
        assert_eq!(parse_environment(Some("staging".to_string())), Environment::Staging);
        assert_eq!(parse_environment(Some("testing".to_string())), Environment::Test);
        assert_eq!(parse_environment(None), Environment::Development);
    }

    #[test]
    fn parse_site_url_strips_trailing_slash() {
        let parsed = parse_site_url("https://lms.example.org/".to_string()).expect("site url");
        assert_eq!(parsed, "https://lms.example.org");
        assert!(parse_site_url("lms.example.org".to_string()).is_err());
        assert!(parse_site_url("https://".to_string()).is_err());
    }

    #[test]
    fn parse_identity_fields_keeps_declared_order() {
        let parsed = parse_identity_fields(Some("idnumber, Email,,city".to_string())).expect("fields");
        assert_eq!(parsed, vec![IdentityField::Idnumber, IdentityField::Email, IdentityField::City]);
    }

    #[test]
    fn parse_identity_fields_rejects_unknown() {
        let err = parse_identity_fields(Some("email,shoe_size".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIdentityField(ref field) if field == "shoe_size"));
    }

    #[test]
    fn parse_identity_fields_defaults_to_email() {
        assert_eq!(parse_identity_fields(None).expect("fields"), vec![IdentityField::Email]);
    }

    #[test]
    fn parse_offset_minutes_bounds() {
        let offset = parse_offset_minutes("TZ", "180".to_string()).expect("offset");
        assert_eq!(offset.whole_hours(), 3);
        assert!(parse_offset_minutes("TZ", "abc".to_string()).is_err());
        assert!(parse_offset_minutes("TZ", "5000".to_string()).is_err());
    }
}
