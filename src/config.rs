use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// CLI defaults that can be saved to a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config {
            timeout_secs: None,
            chart_type: None,
        }
    }

    /// Get the config file path (~/.state/chartfetch/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf, io::Error> {
        let home = std::env::var("HOME").map_err(|_| {
            io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set")
        })?;

        let config_dir = Path::new(&home).join(".state").join("chartfetch");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from file
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Return empty config if file doesn't exist
            return Ok(Config::new());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.chart_type.is_some() {
            self.chart_type = other.chart_type.clone();
        }
    }

    /// Print the config in a human-readable format
    pub fn print(&self, title: &str) {
        println!("{}:", title);

        if let Some(timeout_secs) = self.timeout_secs {
            println!("  Request timeout:    {} seconds", timeout_secs);
        }
        if let Some(chart_type) = &self.chart_type {
            println!("  Default chart type: {}", chart_type);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
