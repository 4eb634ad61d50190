//! Service configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! local runs can keep their settings next to the binary. Every variable has a
//! default suitable for a developer machine.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding templates and configuration settings.
    pub database_path: PathBuf,
    /// Read-only SQLite file the report queries run against.
    pub datasource_path: PathBuf,
    pub referencedata_url: String,
    pub requisition_url: String,
    pub auth_url: String,
    pub fonts_dir: PathBuf,
    /// Where report views place their definition files; the system default when unset.
    pub temp_dir: Option<PathBuf>,
    pub max_template_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Ok(AppConfig {
            host: var_or("REPORTS_HOST", "127.0.0.1"),
            port: parsed_var_or("REPORTS_PORT", 8080)?,
            database_path: PathBuf::from(var_or("REPORTS_DATABASE", "reports.sqlite")),
            datasource_path: PathBuf::from(var_or("REPORTS_DATASOURCE", "replication.sqlite")),
            referencedata_url: base_url("REFERENCEDATA_URL", "http://localhost:8081"),
            requisition_url: base_url("REQUISITION_URL", "http://localhost:8082"),
            auth_url: base_url("AUTH_URL", "http://localhost:8083"),
            fonts_dir: PathBuf::from(var_or("REPORTS_FONTS_DIR", "./fonts")),
            temp_dir: env::var("REPORTS_TEMP_DIR").ok().map(PathBuf::from),
            max_template_bytes: parsed_var_or("REPORTS_MAX_TEMPLATE_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn base_url(name: &str, default: &str) -> String {
    var_or(name, default).trim_end_matches('/').to_string()
}

fn parsed_var_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
