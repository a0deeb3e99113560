//! Configuration module
//!
//! Builds the process configuration from an optional `config.toml`, a
//! `DEVTUBE__`-prefixed environment source, and defaults, then honors the
//! two process-level knobs the deployment actually sets: `PORT` and
//! `DEV_MODE` (or a `dev` argument). The resulting object is handed to the
//! router through [`AppState`]; nothing here is process-global.

use crate::render::Renderer;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Selects the asset directory and disables template caching.
    pub dev_mode: bool,
    /// Directory holding the index snapshot, board, and video records.
    pub data_dir: String,
    /// Overrides the dev/prod asset directory convention when set.
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load `config.toml` plus process environment and arguments.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from("config")?;
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                cfg.server.port = port;
            }
        }
        if std::env::var("DEV_MODE").is_ok_and(|v| v == "true")
            || std::env::args().nth(1).is_some_and(|a| a == "dev")
        {
            cfg.app.dev_mode = true;
        }
        Ok(cfg)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEVTUBE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8100)?
            .set_default("app.dev_mode", false)?
            .set_default("app.data_dir", "data")?
            .set_default("http.enable_cors", true)?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Asset directory: explicit override, or the dev/prod convention.
    pub fn static_dir(&self) -> String {
        self.app.static_dir.clone().unwrap_or_else(|| {
            if self.app.dev_mode {
                "../dist".to_string()
            } else {
                "./dist".to_string()
            }
        })
    }

    pub fn template_path(&self) -> PathBuf {
        Path::new(&self.static_dir()).join("index.html")
    }

    pub fn board_path(&self) -> PathBuf {
        Path::new(&self.app.data_dir).join("board.json")
    }
}

/// Application state
///
/// Everything a request needs, constructed once at startup: the config,
/// the two collaborators, and the template renderer. Requests share it
/// read-only; no cross-request mutable state exists.
pub struct AppState<S, V> {
    pub config: Config,
    pub index: S,
    pub videos: V,
    pub renderer: Renderer,
}
