//! Configuration handling for the TUI

use crate::question_bank::{DEFAULT_AMOUNT, DEFAULT_BASE_URL};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the question bank URL
pub const QUESTION_BANK_URL_ENV: &str = "FORMDESK_QUESTION_BANK_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Question bank endpoint used for survey follow-up questions
    pub question_bank_url: Option<String>,
    /// Number of follow-up questions requested per topic
    pub question_amount: Option<u32>,
}

/// Platform directories for config and logs
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "formdesk", "formdesk")
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(QUESTION_BANK_URL_ENV) {
            config.question_bank_url = Some(url);
        }

        Ok(config)
    }

    pub fn question_bank_url(&self) -> &str {
        self.question_bank_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn question_amount(&self) -> u32 {
        self.question_amount.unwrap_or(DEFAULT_AMOUNT)
    }
}
