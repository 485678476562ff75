pub mod tracing;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (dev = local/kind, prod = full k8s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Load an environment variable and parse it, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error carrying the key, so a
/// typo in a deployment manifest never silently turns into the default.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a boolean flag the way operators write them in env files
/// (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("LOGIN_TEST_VAR", Some("value"), || {
            assert_eq!(env_or_default("LOGIN_TEST_VAR", "default"), "value");
        });
        temp_env::with_var_unset("LOGIN_TEST_VAR", || {
            assert_eq!(env_or_default("LOGIN_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset() {
        temp_env::with_var_unset("LOGIN_PORT_TEST", || {
            let port: u16 = env_parse("LOGIN_PORT_TEST", 50051).unwrap();
            assert_eq!(port, 50051);
        });
    }

    #[test]
    fn test_env_parse_reads_value() {
        temp_env::with_var("LOGIN_PORT_TEST", Some(" 6000 "), || {
            let port: u16 = env_parse("LOGIN_PORT_TEST", 50051).unwrap();
            assert_eq!(port, 6000);
        });
    }

    #[test]
    fn test_env_parse_reports_key_on_garbage() {
        temp_env::with_var("LOGIN_PORT_TEST", Some("99999"), || {
            let err = env_parse::<u16>("LOGIN_PORT_TEST", 50051).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "LOGIN_PORT_TEST"));
        });
    }

    #[test]
    fn test_env_flag_variants() {
        for (raw, expected) in [("true", true), ("1", true), ("ON", true), ("no", false), ("0", false)] {
            temp_env::with_var("LOGIN_FLAG_TEST", Some(raw), || {
                assert_eq!(env_flag("LOGIN_FLAG_TEST", !expected).unwrap(), expected);
            });
        }
    }

    #[test]
    fn test_env_flag_invalid() {
        temp_env::with_var("LOGIN_FLAG_TEST", Some("maybe"), || {
            let err = env_flag("LOGIN_FLAG_TEST", true).unwrap_err();
            assert!(err.to_string().contains("LOGIN_FLAG_TEST"));
        });
    }
}
