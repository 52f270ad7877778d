//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub vacancy_file: String,
    pub num_resumes: usize,
    pub top_n: usize,
    /// Pause after every analysed or generated item, in seconds
    pub throttle_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub logs_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub keep_logs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                model: "gpt-3.5-turbo".to_string(),
                api_base: "https://api.openai.com/v1".to_string(),
                timeout_secs: 60,
                max_retries: 3,
            },
            pipeline: PipelineConfig {
                data_dir: PathBuf::from("data"),
                vacancy_file: "vacancy.txt".to_string(),
                num_resumes: 100,
                top_n: 5,
                throttle_secs: 3.0,
            },
            output: OutputConfig {
                json_path: PathBuf::from("results.json"),
                markdown_path: PathBuf::from("results.md"),
                color_output: true,
            },
            logging: LoggingConfig {
                logs_dir: PathBuf::from("logs"),
                reports_dir: PathBuf::from("reports"),
                keep_logs: 5,
            },
        }
    }
}

impl Config {
    /// Load the configuration from an explicit path, writing defaults if the file is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.llm.max_retries == 0 {
            return Err(ScreenerError::Configuration("llm.max_retries must be at least 1".to_string()));
        }
        if !self.pipeline.throttle_secs.is_finite() || self.pipeline.throttle_secs < 0.0 {
            return Err(ScreenerError::Configuration("pipeline.throttle_secs must be a non-negative number".to_string()));
        }
        if self.pipeline.vacancy_file.trim().is_empty() {
            return Err(ScreenerError::Configuration("pipeline.vacancy_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Read the API key from the environment, honoring a local `.env` file
    pub fn api_key() -> Result<String> {
        dotenvy::dotenv().ok();
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ScreenerError::Configuration(format!(
                "API key not found. Make sure the {} environment variable is set", API_KEY_ENV
            )))
    }

    pub fn vacancy_dir(&self) -> PathBuf {
        self.pipeline.data_dir.join("vacancy")
    }

    pub fn resumes_dir(&self) -> PathBuf {
        self.pipeline.data_dir.join("resumes")
    }

    pub fn vacancy_path(&self) -> PathBuf {
        self.vacancy_dir().join(&self.pipeline.vacancy_file)
    }

    pub fn throttle(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.pipeline.throttle_secs)
    }
}
