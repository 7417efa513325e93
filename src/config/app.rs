//! Main application configuration
//!
//! This module defines the configuration structures for the ladder bot,
//! including environment variable loading, TOML files and validation.

use crate::config::ladder::LadderConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub ladder: LadderConfig,
    pub access: AccessSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Object store layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory of the filesystem object store
    pub data_dir: PathBuf,
    /// Key prefix of player rating records
    pub players_dir: String,
    /// Key prefix of head-to-head records
    pub rivals_dir: String,
    /// Key prefix of table bookings
    pub queue_dir: String,
}

/// Who may run which commands where
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// Handle allowed to run admin commands; no admin when unset
    pub admin_handle: Option<String>,
    /// Title of the group chat where registration and results are accepted;
    /// any chat when unset
    pub group_name: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "table-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("ladder-data"),
            players_dir: "players_stats".to_string(),
            rivals_dir: "rivals_stats".to_string(),
            queue_dir: "players_queue".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|name| env::var(name).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides(|name| env::var(name).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections take their defaults
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse TOML configuration")
    }

    /// Override fields from variables resolved through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Some(data_dir) = lookup("LADDER_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        // Ladder settings
        if let Some(rating) = lookup("START_RATING") {
            self.ladder.start_rating = parse_var("START_RATING", &rating)?;
        }
        if let Some(k_factor) = lookup("ELO_MULTIPLIER") {
            self.ladder.k_factor = parse_var("ELO_MULTIPLIER", &k_factor)?;
        }
        if let Some(days) = lookup("ACTIVE_TOP_DAYS") {
            self.ladder.active_top_days = parse_var("ACTIVE_TOP_DAYS", &days)?;
        }

        // Access settings
        if let Some(admin) = lookup("ADMIN_HANDLER") {
            self.access.admin_handle = Some(admin);
        }
        if let Some(group) = lookup("GROUP_NAME") {
            self.access.group_name = Some(group);
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate storage layout
    for (name, dir) in [
        ("players", &config.storage.players_dir),
        ("rivals", &config.storage.rivals_dir),
        ("queue", &config.storage.queue_dir),
    ] {
        if dir.is_empty() || dir.contains('/') {
            return Err(anyhow!("Invalid {} directory: {:?}", name, dir));
        }
    }
    let dirs = [
        &config.storage.players_dir,
        &config.storage.rivals_dir,
        &config.storage.queue_dir,
    ];
    if dirs[0] == dirs[1] || dirs[0] == dirs[2] || dirs[1] == dirs[2] {
        return Err(anyhow!("Storage directories must be distinct"));
    }

    // Validate rating parameters
    let ladder = &config.ladder;
    if ladder.k_factor <= 0.0 {
        return Err(anyhow!("K factor must be positive"));
    }
    if ladder.elo_base <= 1.0 {
        return Err(anyhow!("Elo base must be greater than 1"));
    }
    if ladder.elo_scale <= 0.0 {
        return Err(anyhow!("Elo scale must be positive"));
    }
    if ladder.margin_base < 0.0 || ladder.margin_step < 0.0 {
        return Err(anyhow!("Score margins cannot be negative"));
    }
    if ladder.max_game_score == 0 {
        return Err(anyhow!("Max game score must be greater than 0"));
    }
    if ladder.start_rating <= ladder.admin_rating_floor() {
        return Err(anyhow!(
            "Start rating must be higher than the K factor ({})",
            ladder.k_factor
        ));
    }

    // Validate access settings
    if let Some(admin) = &config.access.admin_handle {
        if !crate::utils::is_valid_handle(admin) {
            return Err(anyhow!("Invalid admin handle: {:?}", admin));
        }
    }

    Ok(())
}
