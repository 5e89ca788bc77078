use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::VaxError;

/// Runtime configuration.
///
/// Sources, lowest priority first:
/// - built-in defaults
/// - `VAXBOOK_*` environment variables (e.g. `VAXBOOK_DATABASE_PATH`)
/// - bare `PORT`, kept for hosting platforms that only set that
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub listen_addr: String,
    pub port: u16,
    pub loglevel: String,
    /// Secret for the private flash cookie. Needs at least 64 bytes; a
    /// random key is generated per process otherwise.
    pub cookie_key: Option<String>,
    /// Keep `Done` doses (matched by vaccine name) when a schedule is
    /// regenerated after a dob edit.
    pub preserve_completed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("vaccination.db"),
            listen_addr: "0.0.0.0".to_string(),
            port: 5000,
            loglevel: "info".to_string(),
            cookie_key: None,
            preserve_completed: false,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("VAXBOOK_"))
            .merge(Env::raw().only(&["PORT"]))
    }

    pub fn load() -> Result<Self, VaxError> {
        Ok(Self::figment().extract()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}
