use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional config file read from the working directory.
pub const CONFIG_FILE: &str = "vitrine.toml";

/// Environment variable prefix, e.g. `VITRINE_DATABASE_URL`.
pub const ENV_PREFIX: &str = "VITRINE_";

/// Process-level settings. Loaded once in `main` and handed to whoever needs them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub uploads_dir: PathBuf,
    pub loglevel: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:vitrine.db".to_string(),
            uploads_dir: PathBuf::from("static/uploads"),
            loglevel: "info".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Defaults, then `vitrine.toml`, then `VITRINE_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
