//! User preferences for sharing job summaries.
//!
//! Two addresses drive the email action: the user's own address (copied on
//! every summary) and the recipient address (the office, a client, ...). A
//! download directory can be set for saved PDFs.
//!
//! Preferences live in `config.json` inside the per-user data directory
//! resolved by [`DataStorage`]. When the file is missing the placeholders
//! below are used, so the tool works before `tradelog init` has ever run.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tradelog::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.recipient_email = "office@example.com".to_string();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Placeholder for the user's own address.
pub const DEFAULT_USER_EMAIL: &str = "your-email@example.com";

/// Placeholder for the recipient address.
pub const DEFAULT_RECIPIENT_EMAIL: &str = "work-email@example.com";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Your address, added as CC on summary emails.
    pub user_email: String,
    /// Where summary emails are sent.
    pub recipient_email: String,
    /// Directory for downloaded PDFs. `None` means the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_email: DEFAULT_USER_EMAIL.to_string(),
            recipient_email: DEFAULT_RECIPIENT_EMAIL.to_string(),
            download_dir: None,
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults if there is none yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| {
            tracing::debug!(error = %e, "invalid config file");
            msg_error_anyhow!(Message::ConfigParseError)
        })?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Download directory, defaulting to the current directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Interactive setup, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        let user_email: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Your email (for signature)")
            .default(current.user_email.clone())
            .interact_text()?;

        let recipient_email: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Recipient email (for sending)")
            .default(current.recipient_email.clone())
            .interact_text()?;

        let download_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Download directory for PDFs")
            .default(current.download_dir().display().to_string())
            .interact_text()?;

        Ok(Config {
            user_email: user_email.trim().to_string(),
            recipient_email: recipient_email.trim().to_string(),
            download_dir: match download_dir.trim() {
                "" | "." => None,
                dir => Some(PathBuf::from(dir)),
            },
        })
    }
}
