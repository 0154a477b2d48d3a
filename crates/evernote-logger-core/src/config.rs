use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LoggerError, Result};
use crate::window::DayWindow;

/// Top-level configuration, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Account name, checked against the authenticated user
    pub user_name: String,
    /// Developer token used for every API call
    pub auth_token: String,
    /// Notebook the daily log is published into
    pub notebook: String,
    /// Weekday index (0 = Sunday) to display label
    #[serde(deserialize_with = "deserialize_days")]
    pub days: BTreeMap<u32, String>,
    /// Extra `<h1>` lines emitted verbatim below the date heading
    #[serde(default)]
    pub headlines: Vec<String>,
    /// API host, e.g. `sandbox.evernote.com`
    #[serde(default = "default_service_host")]
    pub service_host: String,
}

fn default_service_host() -> String {
    "www.evernote.com".to_string()
}

/// YAML allows both `0: Sun` and `"0": Sun`
#[derive(Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(untagged)]
enum DayKey {
    Index(u32),
    Text(String),
}

fn deserialize_days<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<u32, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<DayKey, String>::deserialize(deserializer)?;
    let mut days = BTreeMap::new();
    for (key, label) in raw {
        let index = match key {
            DayKey::Index(i) => i,
            DayKey::Text(s) => s.trim().parse::<u32>().map_err(|_| {
                serde::de::Error::custom(format!("invalid weekday key '{}'", s))
            })?,
        };
        if index > 6 {
            return Err(serde::de::Error::custom(format!(
                "weekday key {} out of range 0..=6",
                index
            )));
        }
        days.insert(index, label);
    }
    Ok(days)
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let labels = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        Self {
            user_name: String::new(),
            auth_token: String::new(),
            notebook: "Auto".to_string(),
            days: labels
                .iter()
                .enumerate()
                .map(|(i, label)| (i as u32, label.to_string()))
                .collect(),
            headlines: Vec::new(),
            service_host: default_service_host(),
        }
    }
}

impl LoggerConfig {
    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load config from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LoggerError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Weekday label for the target day
    pub fn day_label(&self, window: &DayWindow) -> Result<&str> {
        let index = window.weekday_index();
        self.days
            .get(&index)
            .map(String::as_str)
            .ok_or(LoggerError::MissingDayLabel(index))
    }
}
