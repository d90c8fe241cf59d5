//! Process configuration
//!
//! All configuration is read once at startup into an immutable [`Settings`]
//! value passed to each component; nothing else reads ambient environment
//! state, which keeps every component pure and independently testable.
//!
//! Variables:
//! - `DATABASE_URL` (required): path of the contact store
//! - `RECIPIENT_EMAIL` (required): one address or a comma-separated list
//! - `SMTP_USERNAME` / `SMTP_PASSWORD` (required): mail authentication
//! - `SMTP_SERVER` (default `smtp.gmail.com`)
//! - `SMTP_PORT` (default `587`)
//! - `FROM_EMAIL` (defaults to `SMTP_USERNAME`)
//! - `CHECK_INTERVAL_HOURS` (default `24`): lookback window size
//!
//! Every missing required variable is reported in a single error so an
//! operator fixes the whole set at once.

use anyhow::{Context, Result};

use crate::notify::Recipients;

const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_CHECK_INTERVAL_HOURS: u64 = 24;

/// Mail transport credentials and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// `From` identity; defaults to the authenticated principal.
    pub from_email: String,
}

/// Immutable process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub recipients: Recipients,
    pub smtp: SmtpSettings,
    pub check_interval_hours: u64,
}

impl Settings {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read configuration through an explicit lookup, so tests can inject
    /// values without mutating the process environment.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Blank values count as absent: an empty assignment in a .env file
        // must not satisfy a required variable.
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut missing: Vec<&str> = Vec::new();
        let mut require = |name: &'static str| match get(name) {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let database_url = require("DATABASE_URL");
        let recipient_email = require("RECIPIENT_EMAIL");
        let smtp_username = require("SMTP_USERNAME");
        let smtp_password = require("SMTP_PASSWORD");

        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let recipients = Recipients::parse(&recipient_email);
        if recipients.is_empty() {
            anyhow::bail!("RECIPIENT_EMAIL contains no addresses: {recipient_email:?}");
        }

        let server = get("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());
        let port = match get("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid SMTP_PORT value: {raw}"))?,
            None => DEFAULT_SMTP_PORT,
        };
        let check_interval_hours = match get("CHECK_INTERVAL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid CHECK_INTERVAL_HOURS value: {raw}"))?,
            None => DEFAULT_CHECK_INTERVAL_HOURS,
        };
        let from_email = get("FROM_EMAIL").unwrap_or_else(|| smtp_username.clone());

        Ok(Settings {
            database_url,
            recipients,
            smtp: SmtpSettings {
                server,
                port,
                username: smtp_username,
                password: smtp_password,
                from_email,
            },
            check_interval_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        vars(&[
            ("DATABASE_URL", "contacts.sqlite3"),
            ("RECIPIENT_EMAIL", "ops@example.com"),
            ("SMTP_USERNAME", "notifier@example.com"),
            ("SMTP_PASSWORD", "secret"),
        ])
    }

    fn settings_from(map: &HashMap<String, String>) -> Result<Settings> {
        Settings::from_vars(|name| map.get(name).cloned())
    }

    #[test]
    fn test_minimal_configuration_applies_defaults() {
        let settings = settings_from(&minimal()).unwrap();
        assert_eq!(settings.database_url, "contacts.sqlite3");
        assert_eq!(settings.smtp.server, "smtp.gmail.com");
        assert_eq!(settings.smtp.port, 587);
        assert_eq!(settings.check_interval_hours, 24);
    }

    #[test]
    fn test_sender_defaults_to_smtp_username() {
        let settings = settings_from(&minimal()).unwrap();
        assert_eq!(settings.smtp.from_email, "notifier@example.com");
    }

    #[test]
    fn test_explicit_sender_overrides_default() {
        let mut map = minimal();
        map.insert("FROM_EMAIL".to_string(), "digest@example.com".to_string());
        let settings = settings_from(&map).unwrap();
        assert_eq!(settings.smtp.from_email, "digest@example.com");
    }

    #[test]
    fn test_all_missing_variables_reported_together() {
        let err = settings_from(&HashMap::new()).unwrap_err().to_string();
        for name in [
            "DATABASE_URL",
            "RECIPIENT_EMAIL",
            "SMTP_USERNAME",
            "SMTP_PASSWORD",
        ] {
            assert!(err.contains(name), "error should mention {name}: {err}");
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut map = minimal();
        map.insert("SMTP_PASSWORD".to_string(), "   ".to_string());
        let err = settings_from(&map).unwrap_err().to_string();
        assert!(err.contains("SMTP_PASSWORD"));
    }

    #[test]
    fn test_comma_separated_recipients_are_parsed() {
        let mut map = minimal();
        map.insert(
            "RECIPIENT_EMAIL".to_string(),
            "a@x.com, b@x.com".to_string(),
        );
        let settings = settings_from(&map).unwrap();
        assert_eq!(settings.recipients.len(), 2);
    }

    #[test]
    fn test_recipient_list_of_separators_is_rejected() {
        let mut map = minimal();
        map.insert("RECIPIENT_EMAIL".to_string(), ", ,".to_string());
        assert!(settings_from(&map).is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut map = minimal();
        map.insert("SMTP_PORT".to_string(), "not-a-port".to_string());
        assert!(settings_from(&map).is_err());
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        let mut map = minimal();
        map.insert("CHECK_INTERVAL_HOURS".to_string(), "-3".to_string());
        assert!(settings_from(&map).is_err());
    }

    #[test]
    fn test_explicit_overrides_apply() {
        let mut map = minimal();
        map.insert("SMTP_SERVER".to_string(), "mail.example.com".to_string());
        map.insert("SMTP_PORT".to_string(), "2525".to_string());
        map.insert("CHECK_INTERVAL_HOURS".to_string(), "6".to_string());
        let settings = settings_from(&map).unwrap();
        assert_eq!(settings.smtp.server, "mail.example.com");
        assert_eq!(settings.smtp.port, 2525);
        assert_eq!(settings.check_interval_hours, 6);
    }
}
