use serde::Deserialize;
use thiserror::Error;

const MIN_JWT_SECRET_LEN: usize = 32;
// axum_extra's `Key::from` panics on shorter input
const MIN_COOKIE_SECRET_LEN: usize = 64;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;
const MAX_JWT_EXPIRY_MINUTES: i64 = 24 * 60;
const MAX_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 365;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),
    #[error("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long")]
    JwtSecretTooShort,
    #[error("COOKIE_SECRET must be at least {MIN_COOKIE_SECRET_LEN} bytes long")]
    CookieSecretTooShort,
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{name} must be between {min} and {max}")]
    OutOfRange {
        name: &'static str,
        min: i64,
        max: i64,
    },
    #[error("BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together")]
    IncompleteBootstrapAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server configuration, read from upper-case environment variables
/// (`DATABASE_URL`, `JWT_SECRET`, ...).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub cookie_secret: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_jwt_expiry_minutes")]
    pub jwt_expiry_minutes: i64,
    #[serde(default = "default_refresh_token_expiry_days")]
    pub refresh_token_expiry_days: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    pub cookie_domain: Option<String>,
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: usize,
    #[serde(default = "default_true")]
    pub seed_default_camps: bool,
    pub bootstrap_admin_username: Option<String>,
    pub bootstrap_admin_password: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_jwt_expiry_minutes() -> i64 {
    15
}

const fn default_refresh_token_expiry_days() -> i64 {
    7
}

const fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

const fn default_db_max_connections() -> u32 {
    10
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

const fn default_max_import_bytes() -> usize {
    10 * 1024 * 1024
}

const fn default_true() -> bool {
    true
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::JwtSecretTooShort);
        }
        if self.cookie_secret.len() < MIN_COOKIE_SECRET_LEN {
            return Err(ConfigError::CookieSecretTooShort);
        }
        check_range("JWT_EXPIRY_MINUTES", self.jwt_expiry_minutes, 1, MAX_JWT_EXPIRY_MINUTES)?;
        check_range(
            "REFRESH_TOKEN_EXPIRY_DAYS",
            self.refresh_token_expiry_days,
            1,
            MAX_REFRESH_TOKEN_EXPIRY_DAYS,
        )?;
        check_range(
            "BCRYPT_COST",
            i64::from(self.bcrypt_cost),
            i64::from(*BCRYPT_COST_RANGE.start()),
            i64::from(*BCRYPT_COST_RANGE.end()),
        )?;
        if self.max_import_bytes == 0 {
            return Err(ConfigError::NotPositive("MAX_IMPORT_BYTES"));
        }
        if self.bootstrap_admin_username.is_some() != self.bootstrap_admin_password.is_some() {
            return Err(ConfigError::IncompleteBootstrapAdmin);
        }
        Ok(())
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn check_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars = vec![
            ("DATABASE_URL".to_string(), "postgres://localhost/camps".to_string()),
            (
                "JWT_SECRET".to_string(),
                "test_jwt_secret_minimum_32_characters_long".to_string(),
            ),
            ("COOKIE_SECRET".to_string(), "c".repeat(64)),
        ];
        // envy keeps the first occurrence of a key, so overrides replace defaults
        vars.retain(|(key, _)| !extra.iter().any(|(k, _)| k == key));
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        vars
    }

    fn load(extra: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let config: ApiConfig = envy::from_iter(vars(extra))?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).expect("config should load");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
        assert_eq!(config.max_import_bytes, 10 * 1024 * 1024);
        assert!(config.seed_default_camps);
        assert!(config.cookie_domain.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ENV", "production"),
            ("PORT", "8080"),
            ("SEED_DEFAULT_CAMPS", "false"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .expect("config should load");
        assert!(config.env.is_production());
        assert_eq!(config.port, 8080);
        assert!(!config.seed_default_camps);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_short_secrets_are_rejected() {
        assert!(matches!(
            load(&[("JWT_SECRET", "short")]),
            Err(ConfigError::JwtSecretTooShort)
        ));
        assert!(matches!(
            load(&[("COOKIE_SECRET", "short")]),
            Err(ConfigError::CookieSecretTooShort)
        ));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        for (key, value) in [
            ("BCRYPT_COST", "3"),
            ("BCRYPT_COST", "32"),
            ("JWT_EXPIRY_MINUTES", "0"),
            ("JWT_EXPIRY_MINUTES", "9223372036854775807"),
            ("REFRESH_TOKEN_EXPIRY_DAYS", "366"),
        ] {
            assert!(
                matches!(load(&[(key, value)]), Err(ConfigError::OutOfRange { name, .. }) if name == key),
                "{key}={value} should be rejected"
            );
        }
        assert!(load(&[("BCRYPT_COST", "4"), ("JWT_EXPIRY_MINUTES", "1440")]).is_ok());
    }

    #[test]
    fn test_bootstrap_admin_needs_both_values() {
        assert!(matches!(
            load(&[("BOOTSTRAP_ADMIN_USERNAME", "admin")]),
            Err(ConfigError::IncompleteBootstrapAdmin)
        ));
        assert!(
            load(&[
                ("BOOTSTRAP_ADMIN_USERNAME", "admin"),
                ("BOOTSTRAP_ADMIN_PASSWORD", "secret123"),
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_missing_database_url() {
        let config: Result<ApiConfig, _> = envy::from_iter(vec![(
            "JWT_SECRET".to_string(),
            "x".repeat(40),
        )]);
        assert!(config.is_err());
    }
}
