//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Pre-trained classifier (JSON export)
    pub model_path: PathBuf,

    /// Feature template, JSON array of column names
    pub features_path: PathBuf,

    /// Append-only alert log (CSV)
    pub alert_log_path: PathBuf,

    /// Latest alert map (HTML)
    pub map_path: PathBuf,

    /// Directory holding panic_form.html and other static assets
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: path_var("MODEL_PATH", "model/classifier.json"),
            features_path: path_var("FEATURES_PATH", "model/feature_columns.json"),
            alert_log_path: path_var("ALERT_LOG_PATH", "data/alerts_log.csv"),
            map_path: path_var("MAP_PATH", "data/latest_alert_map.html"),
            static_dir: path_var("STATIC_DIR", "static"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn form_path(&self) -> PathBuf {
        self.static_dir.join("panic_form.html")
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
