//! CLI command implementations
//!
//! `init` prepares the data directory, `start` boots the file-backed
//! repository and serves HTTP, `analyze` runs the analyzer one-shot without
//! touching storage.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::repository::FileRepository;
use crate::service::StringService;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Host to bind the HTTP server to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; permissive when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        Ok(())
    }

    fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Dispatch a parsed CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::Analyze { value } => analyze(&value),
    }
}

/// Create the data directory named by the config.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let data_dir = Path::new(&config.data_dir);
    fs::create_dir_all(data_dir.join("data"))
        .map_err(|e| CliError::io_error(format!("Failed to create data directory: {}", e)))?;

    Logger::info("init_complete", &[("data_dir", config.data_dir.as_str())]);
    Ok(())
}

/// Boot the repository and serve HTTP until stopped.
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let repository = FileRepository::open(Path::new(&config.data_dir))
        .map_err(|e| CliError::boot_failed(format!("Failed to open repository: {}", e)))?;
    let service = StringService::new(repository);
    let server = HttpServer::with_config(config.http_config(), service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Analyze a value and print its properties as pretty JSON.
pub fn analyze(value: &str) -> CliResult<()> {
    let properties = analyzer::analyze(value);
    let rendered = serde_json::to_string_pretty(&properties)
        .map_err(|e| CliError::io_error(format!("Failed to render properties: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
