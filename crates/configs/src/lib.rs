//! # configs
//!
//! Layered application configuration: built-in defaults, then an optional
//! `bookstall.toml` next to the working directory, then `BOOKSTALL_*`
//! environment variables (a `.env` file is honored if present).

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the three snapshot documents.
    pub data_dir: PathBuf,
    /// Root directory for uploaded image blobs.
    pub uploads_dir: PathBuf,
    /// Public URL prefix blobs are served under.
    pub upload_url_prefix: String,
}

impl AppConfig {
    /// Loads configuration. A missing `bookstall.toml` is fine; a present
    /// but unparseable one is not.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let cfg = config::Config::builder()
            .set_default("data_dir", "data")?
            .set_default("uploads_dir", "data/uploads")?
            .set_default("upload_url_prefix", "/static/uploads")?
            .add_source(config::File::with_name("bookstall").required(false))
            .add_source(config::Environment::with_prefix("BOOKSTALL"))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_without_any_sources() {
        let cfg: AppConfig = config::Config::builder()
            .set_default("data_dir", "data")
            .unwrap()
            .set_default("uploads_dir", "data/uploads")
            .unwrap()
            .set_default("upload_url_prefix", "/static/uploads")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.uploads_dir, PathBuf::from("data/uploads"));
        assert_eq!(cfg.upload_url_prefix, "/static/uploads");
    }

    #[test]
    fn file_values_override_defaults() {
        let cfg: AppConfig = config::Config::builder()
            .set_default("data_dir", "data")
            .unwrap()
            .set_default("uploads_dir", "data/uploads")
            .unwrap()
            .set_default("upload_url_prefix", "/static/uploads")
            .unwrap()
            .add_source(config::File::from_str(
                "data_dir = \"/var/lib/bookstall\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/bookstall"));
        assert_eq!(cfg.upload_url_prefix, "/static/uploads");
    }
}
