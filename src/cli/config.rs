use std::{path::Path, time::Duration};

use anyhow::{Context as _, Result};
use log::{debug, info};
use parallel_highlight::{FuzzyOptions, Locator, MatcherConfig, Session};
use serde::{Deserialize, Serialize};
use tokio::fs;

pub const DEFAULT_DISMISS_AFTER_MS: u64 = 3000;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub locator: LocatorConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LocatorConfig {
    #[serde(default)]
    pub fuzzy: FuzzyOptions,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

fn default_dismiss_after_ms() -> u64 {
    debug!("Using default notification timeout (ms): {DEFAULT_DISMISS_AFTER_MS}");
    DEFAULT_DISMISS_AFTER_MS
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

impl Config {
    pub async fn read_or_create(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            info!("Loading configuration from '{}'", path.display());
            Self::load_from_file(path).await?
        } else {
            Self::default()
        };

        config.write(path).await?;
        info!("Updated configuration at '{}'", path.display());

        Ok(config)
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).await.with_context(|| {
            format!(
                "Cannot load configuration from disk from {}",
                path.display()
            )
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).context("Failed to parse configuration")
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(&self).context("Failed to serialize configuration")?;

        fs::write(path, contents)
            .await
            .context("Failed to write configuration to disk")
    }

    pub fn session(&self) -> Session {
        Session::new(
            Locator::new(self.locator.fuzzy),
            Duration::from_millis(self.notification.dismiss_after_ms),
        )
    }
}
