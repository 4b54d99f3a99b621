use anyhow::{Context, Result};
use barakah_core::GoalLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_barakah_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileSection,
    #[serde(default)]
    pub goals: GoalsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsSection {
    pub default_level: GoalLevel,
    pub default_daily_time: u32,
    pub default_timeframe: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing EnvFilter directive, used when RUST_LOG is unset.
    pub filter: String,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Default for GoalsSection {
    fn default() -> Self {
        Self {
            default_level: GoalLevel::Beginner,
            default_daily_time: 15,
            default_timeframe: 30,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_barakah_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
