use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_PRAYER_BASE_URL: &str = "https://api.aladhan.com";
pub const DEFAULT_GEOIP_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Islamic Society of North America calculation method.
pub const DEFAULT_CALCULATION_METHOD: u8 = 2;

pub const DEFAULT_CITY: &str = "Moscow";

/// Geo-IP lookup settings. Position lookup is an optional capability; when
/// disabled the locator reports an unsupported-capability error instead of
/// going to the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    pub enabled: bool,
    pub url: String,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_GEOIP_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City looked up when the CLI is run without arguments.
    pub default_city: String,

    /// Prayer-time calculation method selector passed to the timings API.
    pub calculation_method: u8,

    pub weather_base_url: String,
    pub prayer_base_url: String,

    pub geoip: GeoIpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            calculation_method: DEFAULT_CALCULATION_METHOD,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            prayer_base_url: DEFAULT_PRAYER_BASE_URL.to_string(),
            geoip: GeoIpConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
