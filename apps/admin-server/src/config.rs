//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::{DatabaseConfig, JwtConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Staff account created or promoted at startup.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Prefix of absolute URLs handed out for "view on site" links.
    pub site_url: String,
    pub admin: Option<AdminBootstrap>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", 1)?,
        };

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: get("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parse_or(&get, "JWT_EXPIRATION_HOURS", defaults.expiration_hours)?,
            issuer: get("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        let admin = match (get("ADMIN_USERNAME"), get("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminBootstrap {
                email: get("ADMIN_EMAIL").unwrap_or_default(),
                username,
                password,
            }),
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            _ => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&get, "PORT", 8080)?,
            database,
            jwt,
            site_url: get("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            admin,
        })
    }
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        Some(value) => {
            let parsed: Result<T, _> = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/blog")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.expiration_hours, 24);
        assert_eq!(config.site_url, "");
        assert!(config.admin.is_none());
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = load(&[("DATABASE_URL", "x"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn bootstrap_account_needs_a_password() {
        let err = load(&[("DATABASE_URL", "x"), ("ADMIN_USERNAME", "root")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ADMIN_PASSWORD")));

        let config = load(&[
            ("DATABASE_URL", "x"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "s3cret"),
            ("SITE_URL", "https://blog.example.com/"),
        ])
        .unwrap();
        assert_eq!(config.admin.unwrap().username, "root");
        assert_eq!(config.site_url, "https://blog.example.com");
    }
}
