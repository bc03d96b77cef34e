//! Process configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HOST` | `127.0.0.1` | bind address |
//! | `PORT` | `5000` | listening port |
//! | `TODO_STORE_PATH` | unset | JSON collection file; unset keeps todos in memory |
//! | `CORS_ALLOW_ORIGIN` | `*` | allowed browser origin |

use std::path::PathBuf;

use axum::http::HeaderValue;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(HeaderValue),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_path: Option<PathBuf>,
    pub cors_origin: CorsOrigin,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_path: None,
            cors_origin: CorsOrigin::Any,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => defaults.port,
        };

        let cors_origin = match var("CORS_ALLOW_ORIGIN") {
            None => CorsOrigin::Any,
            Some(value) if value.trim() == "*" => CorsOrigin::Any,
            Some(value) => HeaderValue::from_str(value.trim())
                .map(CorsOrigin::Exact)
                .map_err(|_| ConfigError::Invalid {
                    name: "CORS_ALLOW_ORIGIN",
                    value,
                })?,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            store_path: var("TODO_STORE_PATH").map(PathBuf::from),
            cors_origin,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
