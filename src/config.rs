//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::{ClubConfig, ClubKind};
use crate::services::strava::{DEFAULT_HTTP_TIMEOUT, STRAVA_API_BASE};

/// Longest accepted fetch window, in days.
pub const MAX_ACTIVITY_WINDOW_DAYS: u32 = 3650;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava API access token
    pub strava_access_token: String,
    /// Strava API base URL (overridable for testing)
    pub strava_api_base: String,
    /// Upper bound on a single Strava request
    pub strava_timeout: Duration,
    /// Clubs to track, in rotation order
    pub clubs: Vec<ClubConfig>,
    /// How often all clubs are re-fetched
    pub refresh_interval: Duration,
    /// How often the published club changes
    pub rotation_interval: Duration,
    /// Fetch activities started within this many days
    pub activity_window_days: u32,
    /// Upper bound on activities per club request
    pub activities_per_page: u32,
    /// Channel key snapshots are published under
    pub publish_key: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_access_token: "test_access_token".to_string(),
            strava_api_base: STRAVA_API_BASE.to_string(),
            strava_timeout: DEFAULT_HTTP_TIMEOUT,
            clubs: default_clubs(),
            refresh_interval: Duration::from_secs(30 * 60),
            rotation_interval: Duration::from_secs(60),
            activity_window_days: 30,
            activities_per_page: 200,
            publish_key: "strava".to_string(),
            port: 8080,
        }
    }
}

/// The two clubs tracked when `STRAVA_CLUBS` is not set.
pub fn default_clubs() -> Vec<ClubConfig> {
    vec![
        ClubConfig {
            kind: ClubKind::Ride,
            name: "Making Waves Cycling Club".to_string(),
            club_id: 4966,
        },
        ClubConfig {
            kind: ClubKind::Run,
            name: "Making Waves Runners Club".to_string(),
            club_id: 143030,
        },
    ]
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strava_access_token = lookup("STRAVA_ACCESS_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("STRAVA_ACCESS_TOKEN"))?;

        let clubs = match lookup("STRAVA_CLUBS") {
            Some(raw) => serde_json::from_str::<Vec<ClubConfig>>(&raw)
                .map_err(|e| ConfigError::Invalid("STRAVA_CLUBS", e.to_string()))?,
            None => default_clubs(),
        };
        if clubs.is_empty() {
            return Err(ConfigError::Invalid(
                "STRAVA_CLUBS",
                "at least one club is required".to_string(),
            ));
        }

        let refresh_secs: u64 = parse_var(&lookup, "REFRESH_INTERVAL_SECS", 30 * 60)?;
        let rotation_secs: u64 = parse_var(&lookup, "ROTATION_INTERVAL_SECS", 60)?;
        let activities_per_page: u32 = parse_var(&lookup, "ACTIVITIES_PER_PAGE", 200)?;
        let timeout_secs: u64 = parse_var(
            &lookup,
            "STRAVA_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT.as_secs(),
        )?;

        for (name, value) in [
            ("REFRESH_INTERVAL_SECS", refresh_secs),
            ("ROTATION_INTERVAL_SECS", rotation_secs),
            ("ACTIVITIES_PER_PAGE", u64::from(activities_per_page)),
            ("STRAVA_TIMEOUT_SECS", timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(name, "must be greater than 0".to_string()));
            }
        }

        let activity_window_days: u32 = parse_var(&lookup, "ACTIVITY_WINDOW_DAYS", 30)?;
        if !(1..=MAX_ACTIVITY_WINDOW_DAYS).contains(&activity_window_days) {
            return Err(ConfigError::Invalid(
                "ACTIVITY_WINDOW_DAYS",
                format!("must be between 1 and {}", MAX_ACTIVITY_WINDOW_DAYS),
            ));
        }

        Ok(Self {
            strava_access_token,
            strava_api_base: lookup("STRAVA_API_BASE").unwrap_or_else(|| STRAVA_API_BASE.to_string()),
            strava_timeout: Duration::from_secs(timeout_secs),
            clubs,
            refresh_interval: Duration::from_secs(refresh_secs),
            rotation_interval: Duration::from_secs(rotation_secs),
            activity_window_days,
            activities_per_page,
            publish_key: lookup("PUBLISH_KEY").unwrap_or_else(|| "strava".to_string()),
            port: parse_var(&lookup, "PORT", 8080)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(name, e.to_string())),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("STRAVA_ACCESS_TOKEN", " abc \n")]))
            .expect("Config should load");

        assert_eq!(config.strava_access_token, "abc");
        assert_eq!(config.strava_api_base, STRAVA_API_BASE);
        assert_eq!(config.strava_timeout, Duration::from_secs(30));
        assert_eq!(config.clubs, default_clubs());
        assert_eq!(config.refresh_interval, Duration::from_secs(1800));
        assert_eq!(config.rotation_interval, Duration::from_secs(60));
        assert_eq!(config.activity_window_days, 30);
        assert_eq!(config.activities_per_page, 200);
        assert_eq!(config.publish_key, "strava");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_missing_token() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_ACCESS_TOKEN")));
    }

    #[test]
    fn test_config_custom_clubs() {
        let config = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            (
                "STRAVA_CLUBS",
                r#"[{"kind":"Run","name":"Track Club","club_id":7}]"#,
            ),
            ("ROTATION_INTERVAL_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.clubs.len(), 1);
        assert_eq!(config.clubs[0].kind, ClubKind::Run);
        assert_eq!(config.clubs[0].club_id, 7);
        assert_eq!(config.rotation_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("STRAVA_CLUBS", "[]"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("STRAVA_CLUBS", _)));

        let err = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("REFRESH_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("REFRESH_INTERVAL_SECS", _)));

        let err = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));

        let err = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("STRAVA_CLUBS", r#"[{"kind":"Swim","name":"Pool","club_id":1}]"#),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("STRAVA_CLUBS", _)));

        let err = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("STRAVA_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("STRAVA_TIMEOUT_SECS", _)));
    }

    #[test]
    fn test_config_activity_window_bounds() {
        for days in ["0", "3651", "100000000"] {
            let err = Config::from_lookup(lookup_from(&[
                ("STRAVA_ACCESS_TOKEN", "abc"),
                ("ACTIVITY_WINDOW_DAYS", days),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid("ACTIVITY_WINDOW_DAYS", _)),
                "{} days should be rejected",
                days
            );
        }

        let config = Config::from_lookup(lookup_from(&[
            ("STRAVA_ACCESS_TOKEN", "abc"),
            ("ACTIVITY_WINDOW_DAYS", "3650"),
        ]))
        .unwrap();
        assert_eq!(config.activity_window_days, MAX_ACTIVITY_WINDOW_DAYS);
    }
}
