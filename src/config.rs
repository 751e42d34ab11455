use std::path::PathBuf;

use crate::storage::cloud::CloudImageConfig;

/// Longest accepted session token lifetime (one year).
pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where uploaded images go.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files on local disk, served back under `url_prefix`.
    Local { dir: PathBuf, url_prefix: String },
    /// Cloudinary-compatible remote image host.
    Cloud(CloudImageConfig),
}

/// Server configuration loaded from environment variables.
///
/// | Env Var                       | Default                      |
/// |-------------------------------|------------------------------|
/// | `HOST`                        | `0.0.0.0`                    |
/// | `PORT`                        | `5000`                       |
/// | `DATABASE_URL`                | required                     |
/// | `DATABASE_MAX_CONNECTIONS`    | `5`                          |
/// | `JWT_SECRET`                  | required                     |
/// | `JWT_EXPIRY_HOURS`            | `24`                         |
/// | `STORAGE_BACKEND`             | `local` (`local` or `cloud`) |
/// | `UPLOAD_DIR`                  | `uploads`                    |
/// | `UPLOAD_URL_PREFIX`           | `/uploads`                   |
/// | `CLOUD_NAME`                  | required for `cloud`         |
/// | `CLOUD_API_KEY`               | required for `cloud`         |
/// | `CLOUD_API_SECRET`            | required for `cloud`         |
/// | `CLOUD_FOLDER`                | unset                        |
/// | `CLOUD_API_BASE`              | `https://api.cloudinary.com` |
/// | `CLOUD_UPLOAD_TRANSFORMATION` | unset                        |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", get("PORT"), 5000u16)?;
        let database_url = require("DATABASE_URL")?;
        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5u32)?;
        let jwt_secret = require("JWT_SECRET")?;
        let jwt_expiry_hours = parse_or("JWT_EXPIRY_HOURS", get("JWT_EXPIRY_HOURS"), 24i64)?;
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&jwt_expiry_hours) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_HOURS",
                value: jwt_expiry_hours.to_string(),
            });
        }

        let backend = get("STORAGE_BACKEND").unwrap_or_else(|| "local".into());
        let storage = match backend.to_ascii_lowercase().as_str() {
            "local" => StorageConfig::Local {
                dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "uploads".into())),
                url_prefix: url_prefix(get("UPLOAD_URL_PREFIX"))?,
            },
            "cloud" => StorageConfig::Cloud(CloudImageConfig {
                cloud_name: require("CLOUD_NAME")?,
                api_key: require("CLOUD_API_KEY")?,
                api_secret: require("CLOUD_API_SECRET")?,
                folder: get("CLOUD_FOLDER"),
                api_base: get("CLOUD_API_BASE")
                    .unwrap_or_else(|| "https://api.cloudinary.com".into()),
                transformation: get("CLOUD_UPLOAD_TRANSFORMATION"),
            }),
            _ => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: backend,
                })
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            jwt_secret,
            jwt_expiry_hours,
            storage,
        })
    }
}

// The prefix becomes a nested route, which cannot be the root
fn url_prefix(raw: Option<String>) -> Result<String, ConfigError> {
    let Some(value) = raw else {
        return Ok("/uploads".to_string());
    };
    if value.trim().trim_matches('/').is_empty() {
        return Err(ConfigError::Invalid {
            name: "UPLOAD_URL_PREFIX",
            value,
        });
    }
    Ok(value)
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
