use std::path::PathBuf;

use poise::serenity_prelude::ChannelId;
use poise::serenity_prelude::RoleId;

use crate::error::AppError;

/// Feature toggles for optional bot subsystems.
#[derive(Clone, Default)]
pub struct Features {
    pub vanity: bool,
    pub clan_welcome: bool,
    pub time_relay: bool,
}

/// One clan definition: the role that marks membership, the channel where
/// welcomes are announced, and the emoji used to react on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClanConfig {
    pub role_id: RoleId,
    pub channel_id: ChannelId,
    pub emoji: String,
    pub name: String,
}

#[derive(Clone, Default)]
pub struct Config {
    pub discord_token: String,
    pub owner_id: String,
    pub guild_id: u64,
    pub vanity_role_id: u64,
    pub site_host: String,
    pub invite_slug: String,
    pub clans: Vec<ClanConfig>,
    pub data_path: PathBuf,
    pub logs_path: PathBuf,
    pub features: Features,
}

impl Config {
    pub fn new() -> Self {
        Self {
            site_host: "pokearena.xyz".to_string(),
            invite_slug: "pokearena".to_string(),
            data_path: PathBuf::from("data"),
            logs_path: PathBuf::from("logs"),
            features: Features {
                vanity: true,
                clan_welcome: true,
                time_relay: true,
            },
            ..Default::default()
        }
    }

    /// Loads configuration from environment variables.
    pub fn load(&mut self) -> Result<(), AppError> {
        self.discord_token = require_env("DISCORD_TOKEN")?;
        self.owner_id = require_env("OWNER_ID")?;
        self.guild_id = parse_id("GUILD_ID", &require_env("GUILD_ID")?)?;

        if let Ok(v) = std::env::var("SITE_HOST") {
            self.site_host = v;
        }
        if let Ok(v) = std::env::var("INVITE_SLUG") {
            self.invite_slug = v;
        }
        if let Ok(v) = std::env::var("DATA_PATH") {
            self.data_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("LOGS_PATH") {
            self.logs_path = PathBuf::from(v);
        }

        self.features.vanity = env_flag("FEATURE_VANITY", true);
        self.features.clan_welcome = env_flag("FEATURE_CLAN_WELCOME", true);
        self.features.time_relay = env_flag("FEATURE_TIME_RELAY", true);

        if self.features.vanity {
            self.vanity_role_id = parse_id("VANITY_ROLE_ID", &require_env("VANITY_ROLE_ID")?)?;
        }
        if self.features.clan_welcome {
            self.clans = parse_clans(&require_env("CLAN_ROLES")?)?;
        }

        Ok(())
    }

    /// Path of the JSON preference snapshot inside the data directory.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_path.join("preferences.json")
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| AppError::MissingConfig {
        key: key.to_string(),
    })
}

fn parse_id(key: &str, value: &str) -> Result<u64, AppError> {
    value
        .parse::<u64>()
        .map_err(|_| AppError::ConfigurationError {
            msg: format!("{} must be a numeric Discord ID, got \"{}\"", key, value),
        })
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

/// Parses `CLAN_ROLES`, a comma-separated list of
/// `role_id|channel_id|emoji|name` entries. Pipes keep custom emoji of the
/// form `<a:name:id>` intact.
fn parse_clans(raw: &str) -> Result<Vec<ClanConfig>, AppError> {
    let mut clans = Vec::new();

    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let parts: Vec<&str> = entry.trim().split('|').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(AppError::ConfigurationError {
                msg: format!(
                    "Invalid CLAN_ROLES entry \"{}\", expected role_id|channel_id|emoji|name",
                    entry
                ),
            });
        }

        let role_id = parse_id("CLAN_ROLES role", parts[0])?;
        let channel_id = parse_id("CLAN_ROLES channel", parts[1])?;

        clans.push(ClanConfig {
            role_id: RoleId::new(role_id),
            channel_id: ChannelId::new(channel_id),
            emoji: parts[2].to_string(),
            name: parts[3].to_string(),
        });
    }

    if clans.is_empty() {
        return Err(AppError::ConfigurationError {
            msg: "CLAN_ROLES contained no valid entries".to_string(),
        });
    }

    Ok(clans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clans() {
        let clans =
            parse_clans("111|222|<a:infinity:333>|Infinity, 444|555|<a:void:666>|Void").unwrap();
        assert_eq!(clans.len(), 2);
        assert_eq!(clans[0].role_id, RoleId::new(111));
        assert_eq!(clans[0].channel_id, ChannelId::new(222));
        assert_eq!(clans[0].emoji, "<a:infinity:333>");
        assert_eq!(clans[0].name, "Infinity");
        assert_eq!(clans[1].name, "Void");
    }

    #[test]
    fn test_parse_clans_rejects_malformed_entry() {
        assert!(parse_clans("111|222|emoji").is_err());
        assert!(parse_clans("abc|222|emoji|Name").is_err());
        assert!(parse_clans("").is_err());
    }
}
