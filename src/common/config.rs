// src/common/config.rs
//! Runtime configuration for the client and the development server.
//! Values come from the environment (after `.env` is loaded) with defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid exercise policy '{0}', expected 'best-effort' or 'all-or-nothing'")]
    InvalidExercisePolicy(String),
    #[error("Invalid port '{0}'")]
    InvalidPort(String),
}

/// What a workout submission does when some of its exercise creates fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExercisePolicy {
    /// Failed exercise creates are logged; the workout still counts as saved.
    #[default]
    BestEffort,
    /// Every exercise create must succeed for the submission to succeed.
    AllOrNothing,
}

impl FromStr for ExercisePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(Self::BestEffort),
            "all-or-nothing" | "all_or_nothing" | "strict" => Ok(Self::AllOrNothing),
            other => Err(ConfigError::InvalidExercisePolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ExercisePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best-effort"),
            Self::AllOrNothing => write!(f, "all-or-nothing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_dir: PathBuf,
    pub exercise_policy: ExercisePolicy,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("PEAKPERFORM_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_dir = lookup("PEAKPERFORM_SESSION_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_dir);

        let exercise_policy = match lookup("PEAKPERFORM_EXERCISE_POLICY") {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => ExercisePolicy::default(),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_dir,
            exercise_policy,
        })
    }

    pub fn log_summary(&self) {
        info!(
            api_url = %self.api_url,
            session_dir = %self.session_dir.display(),
            exercise_policy = %self.exercise_policy,
            "Client configuration loaded"
        );
    }
}

/// `<data_dir>/peakperform`, or `./.peakperform` when the platform has no data dir.
pub fn default_session_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("peakperform"))
        .unwrap_or_else(|| PathBuf::from(".peakperform"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_SERVER_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self { port, cors_origins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.exercise_policy, ExercisePolicy::BestEffort);
        assert!(config.session_dir.ends_with("peakperform") || config.session_dir.ends_with(".peakperform"));
    }

    #[test]
    fn test_client_config_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("PEAKPERFORM_API_URL", "http://api.test:9000/"),
            ("PEAKPERFORM_SESSION_DIR", "/tmp/pp"),
            ("PEAKPERFORM_EXERCISE_POLICY", "All-Or-Nothing"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://api.test:9000");
        assert_eq!(config.session_dir, PathBuf::from("/tmp/pp"));
        assert_eq!(config.exercise_policy, ExercisePolicy::AllOrNothing);
    }

    #[test]
    fn test_invalid_exercise_policy() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "PEAKPERFORM_EXERCISE_POLICY",
            "sometimes",
        )]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidExercisePolicy("sometimes".to_string()));
    }

    #[test]
    fn test_server_config() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);

        let defaults = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(defaults.port, DEFAULT_SERVER_PORT);

        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
    }
}
