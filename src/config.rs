use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(about = "Runs the bookmarks service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Overrides `app.port` from the config file.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

const DEFAULT_CONFIG: &str = r#"
app:
  port: 8000
  api_token: ${API_TOKEN}
storage:
  backend: memory
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    api_token: String,
}

fn default_port() -> u16 {
    8000
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_api_token(&self) -> &str {
        &self.api_token
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    Libsql,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Storage {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub seed: bool,
}

fn default_database() -> String {
    "bookmarks.db".to_string()
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            backend: Backend::default(),
            database: default_database(),
            seed: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub storage: Storage,
}

impl Config {
    /// Loads `path`, or the built-in defaults when the file does not exist.
    pub fn new(path: &Path) -> Result<Self> {
        let yaml_str = if path.exists() {
            fs::read_to_string(path)?
        } else {
            tracing::warn!(path = ?path, "config file not found, using defaults");
            DEFAULT_CONFIG.to_string()
        };
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        config.check()?;
        Ok(config)
    }

    pub fn override_port(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.app.port = port;
        }
    }

    fn check(&self) -> Result<()> {
        if self.app.api_token.trim().is_empty() {
            anyhow::bail!("app.api_token is empty; set it in the config file or via API_TOKEN");
        }
        if self.storage.backend == Backend::Libsql && self.storage.database.trim().is_empty() {
            anyhow::bail!("storage.database is required for the libsql backend");
        }
        Ok(())
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find('}') {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!(var = var_name, "environment variable not found");
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}
