//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
  server: Option<ServerConfig>,
  storage: Option<StorageConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
  addr: Option<String>,
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct StorageConfig {
  path: Option<String>,
}

pub const CONFIG_FILE: &str = "config.toml";

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port when neither config.toml nor PORT sets one
pub const DEFAULT_PORT: u16 = 3000;

fn read_config_file() -> AppConfig {
  let Ok(contents) = std::fs::read_to_string(CONFIG_FILE) else {
    return AppConfig::default();
  };
  match toml::from_str::<AppConfig>(&contents) {
    Ok(config) => config,
    Err(e) => {
      tracing::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
      AppConfig::default()
    }
  }
}

fn parse_port(raw: Option<String>) -> u16 {
  match raw {
    Some(value) => value.trim().parse().unwrap_or_else(|_| {
      tracing::warn!("Invalid PORT value {:?}, using {}", value, DEFAULT_PORT);
      DEFAULT_PORT
    }),
    None => DEFAULT_PORT,
  }
}

/// Resolved server settings
#[derive(Debug, Clone)]
pub struct Settings {
  pub addr: String,
  pub port: u16,
  pub database_path: PathBuf,
}

impl Settings {
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    let file = read_config_file();

    let (file_addr, file_port) = match file.server {
      Some(server) => (server.addr, server.port),
      None => (None, None),
    };
    let port = file_port.unwrap_or_else(|| parse_port(std::env::var("PORT").ok()));
    let addr = file_addr.unwrap_or_else(|| SERVER_ADDR.to_string());

    let database_path = match file.storage.and_then(|s| s.path) {
      Some(path) => {
        tracing::info!("Using state database from {}: {}", CONFIG_FILE, path);
        PathBuf::from(path)
      }
      None => match std::env::var("STATE_DB_PATH") {
        Ok(path) => {
          tracing::info!("Using state database from STATE_DB_PATH env: {}", path);
          PathBuf::from(path)
        }
        Err(_) => {
          let default = PathBuf::from(paths::state_db_path());
          tracing::info!("Using default state database path: {}", default.display());
          default
        }
      },
    };

    Self {
      addr,
      port,
      database_path,
    }
  }

  /// Full address for the TCP listener
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.addr, self.port)
  }
}
