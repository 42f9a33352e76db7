use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::Error;

pub const API_KEY_VAR: &str = "STEAM_API_KEY";
pub const STEAM_ID_VAR: &str = "STEAM_ID";
pub const API_URL_VAR: &str = "STEAM_API_URL";
pub const OUTPUT_PATH_VAR: &str = "OUTPUT_PATH";
pub const TIMEZONE_VAR: &str = "DISPLAY_TIMEZONE";

pub const DEFAULT_STEAM_ID: &str = "76561197988460908";
pub const DEFAULT_API_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v1/";
pub const DEFAULT_OUTPUT_PATH: &str = "output.csv";

/// Everything a run needs, resolved up front so the pipeline never touches the environment.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default = "default_steam_id")]
    pub steam_id: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// IANA zone name used to render "last played" dates. `None` means system local time.
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_steam_id() -> String {
    DEFAULT_STEAM_ID.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Config {
    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            steam_id: default_steam_id(),
            api_url: default_api_url(),
            output_path: default_output_path(),
            timezone: None,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    /// Empty values count as unset, except `STEAM_ID`, which must not be blank when set.
    /// The API key is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = var(API_KEY_VAR).ok_or(Error::MissingCredential(API_KEY_VAR))?;
        let mut config = Config::new(api_key);
        if let Some(steam_id) = lookup(STEAM_ID_VAR) {
            config.steam_id = steam_id.trim().to_string();
        }
        if let Some(api_url) = var(API_URL_VAR) {
            config.api_url = api_url;
        }
        if let Some(path) = var(OUTPUT_PATH_VAR) {
            config.output_path = PathBuf::from(path);
        }
        config.timezone = var(TIMEZONE_VAR);

        config.validate()?;
        Ok(config)
    }

    /// Check the settings that would otherwise only fail halfway through a run.
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::MissingCredential(API_KEY_VAR));
        }
        if self.steam_id.trim().is_empty() {
            return Err(Error::InvalidConfig { name: STEAM_ID_VAR, reason: "must not be empty".to_string() });
        }
        self.display_zone()?;
        Ok(())
    }

    /// Resolve the configured zone name.
    pub fn display_zone(&self) -> Result<DisplayZone, Error> {
        match self.timezone.as_deref() {
            None => Ok(DisplayZone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(DisplayZone::Named)
                .map_err(|e| Error::InvalidConfig { name: TIMEZONE_VAR, reason: e.to_string() }),
        }
    }
}

// Hand-written so the key never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .field("api_url", &self.api_url)
            .field("output_path", &self.output_path)
            .field("timezone", &self.timezone)
            .finish()
    }
}

/// Time zone used when rendering "last played" dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Local,
    Named(Tz),
}

impl DisplayZone {
    /// Format a UTC instant as e.g. "November 14 2023" in this zone.
    pub fn format_date(&self, dt: DateTime<Utc>) -> String {
        const FMT: &str = "%B %-d %Y";
        match self {
            DisplayZone::Local => dt.with_timezone(&Local).format(FMT).to_string(),
            DisplayZone::Named(tz) => dt.with_timezone(tz).format(FMT).to_string(),
        }
    }
}
