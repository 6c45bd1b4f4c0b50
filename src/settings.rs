use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf, time::Duration};

use crate::watcher::presence::OfflinePolicy;

const FILENAME: &str = "settings.yaml";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Discord's bot token
    pub token: String,
    /// Discord account id which owns the bot
    pub owner: u64,
    /// Command prefix
    pub prefix: String,
    /// Name shown in the bot's activity
    pub server_name: String,
    /// Status endpoint polled for players
    pub status_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// What an offline server means for join/leave announcements
    pub offline_policy: OfflinePolicy,
    /// Channel most commands are restricted to
    pub bot_channel: u64,
    /// Channel receiving join/leave announcements
    pub presence_channel: u64,
    /// Posted to the bot channel on startup
    pub greeting: Option<String>,
    /// Address of the keep-alive responder
    pub keepalive_address: String,
    pub keepalive_message: String,
    /// Messages containing any of these get deleted
    pub censored_words: Vec<String>,
    pub wowza_emoji: String,
    /// Files sent by the media commands, by name
    pub media: HashMap<String, PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let media = [
            ("sus", "amogus.png"),
            ("har", "har.gif"),
            ("piston", "piston.gif"),
            ("rip", "rip-coffin.gif"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
        .collect();

        Self {
            token: String::from("DISCORD_BOT_TOKEN_HERE"),
            owner: 999999999,
            prefix: String::from("?"),
            server_name: String::from("Milkyway"),
            status_url: String::from("https://api.mcsrvstat.us/2/81.16.61.58"),
            poll_interval_secs: 5,
            request_timeout_secs: 10,
            offline_policy: OfflinePolicy::Reset,
            bot_channel: 999999999,
            presence_channel: 999999999,
            greeting: Some(String::from("Bob online!")),
            keepalive_address: String::from("0.0.0.0:8080"),
            keepalive_message: String::from("Hi iHouq"),
            censored_words: Vec::new(),
            wowza_emoji: String::from("<:wowza:974932545152106606>"),
            media,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&Self::path())
    }

    fn path() -> String {
        std::env::var("BOT_SETTINGS").unwrap_or_else(|_| FILENAME.to_string())
    }

    /// Whether a settings file is present, broken or not.
    pub fn exists() -> bool {
        PathBuf::from(Self::path()).exists()
    }

    fn load(settings_path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name(settings_path))
            // Add in settings from the environment (with a prefix of BOT)
            // Eg.. `BOT_PREFIX=!` would set the `prefix` key
            .add_source(Environment::with_prefix("BOT"))
            .build()?
            // Deserialize entire configuration
            .try_deserialize()
    }

    /// Ids discord rejects (zero) would panic deep inside serenity.
    pub fn validate(&self) -> Result<()> {
        if self.owner == 0 || self.bot_channel == 0 || self.presence_channel == 0 {
            anyhow::bail!("`owner`, `bot_channel` and `presence_channel` must be non-zero ids.");
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("`poll_interval_secs` must be at least 1.");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("`request_timeout_secs` must be at least 1.");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_censored(&self, content: &str) -> bool {
        let content = content.to_lowercase();
        self.censored_words
            .iter()
            .filter(|word| !word.is_empty())
            .any(|word| content.contains(&word.to_lowercase()))
    }

    pub async fn save(&self) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let settings_path = Self::path();

        if let Some(parent) = PathBuf::from(&settings_path).parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        let mut file = tokio::fs::File::create(&settings_path).await?;
        file.write_all(
            serde_yaml::to_string(&self)
                .context("Failed to serialize settings")?
                .as_bytes(),
        )
        .await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
        assert_eq!(settings.prefix, "?");
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let dir = std::env::temp_dir().join(format!("milkyway-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.yaml");
        std::fs::write(
            &path,
            "token: abc\nbot_channel: 42\noffline_policy: hold\ncensored_words: [Rossi]\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.token, "abc");
        assert_eq!(settings.bot_channel, 42);
        assert_eq!(settings.offline_policy, OfflinePolicy::Hold);
        assert_eq!(settings.server_name, "Milkyway");
        assert_eq!(settings.media["har"], PathBuf::from("har.gif"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rejects_zero_ids() {
        let settings = Settings {
            presence_channel: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_zero_durations() {
        let no_interval = Settings {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(no_interval.validate().is_err());

        let no_timeout = Settings {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    fn censoring_ignores_case() {
        let settings = Settings {
            censored_words: vec!["Rossi".to_string(), String::new()],
            ..Default::default()
        };
        assert!(settings.is_censored("hey ROSSI, come here"));
        assert!(!settings.is_censored("nothing to see"));
    }
}
