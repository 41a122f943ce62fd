use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;
use wordwise_config::Config;

fn config_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wordwise"))
}

pub fn default_profile_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join("config.json"))
}

/// `<data dir>/wordwise/store.json`, or the working directory when there is no data dir
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordwise")
        .join("store.json")
}

/// Environment-derived config with the profile's keys laid over it.
///
/// An explicit path must exist; the default profile is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_profile_path().filter(|p| p.exists()),
    };

    let Some(path) = path else {
        tracing::debug!("No profile found, using defaults");
        return Ok(Config::new());
    };

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile: Value = serde_json::from_str(&data)
        .with_context(|| format!("invalid profile {}", path.display()))?;

    merge_profile(Config::new(), profile)
}

fn merge_profile(base: Config, profile: Value) -> anyhow::Result<Config> {
    let mut merged = serde_json::to_value(base)?;
    overlay(&mut merged, profile);
    Ok(serde_json::from_value(merged)?)
}

fn overlay(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}
