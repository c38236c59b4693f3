use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lenders_core::DEFAULT_RETENTION_DAYS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LendersConfig {
    pub ledger: LedgerSection,
    #[serde(default)]
    pub archive: ArchiveSection,
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSection {
    /// Days an archived item survives before the sweep deletes it; 0 disables.
    pub retention_days: u32,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS as u32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiSection {
    pub timezone: Option<String>,
}

impl LendersConfig {
    pub fn new(
        ledger_path: PathBuf,
        retention_days: u32,
        remote_path: Option<PathBuf>,
        calendar_path: Option<PathBuf>,
        timezone: Option<String>,
    ) -> Self {
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            archive: ArchiveSection { retention_days },
            remote: RemoteSection {
                path: remote_path.map(|path| path.to_string_lossy().to_string()),
            },
            calendar: CalendarSection {
                path: calendar_path.map(|path| path.to_string_lossy().to_string()),
            },
            ui: UiSection { timezone },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("ledger.json"))
}

pub fn default_remote_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("remote"))
}

pub fn default_calendar_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("reminders"))
}

pub fn read_config(path: &Path) -> anyhow::Result<LendersConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &LendersConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("lenders"));
        }
    }
    Ok(home_dir()?.join(".config").join("lenders"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("lenders"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("lenders"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = LendersConfig::new(
            PathBuf::from("/tmp/ledger.json"),
            14,
            Some(PathBuf::from("/tmp/remote")),
            None,
            Some("Europe/Berlin".to_string()),
        );

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.ledger.path, "/tmp/ledger.json");
        assert_eq!(loaded.archive.retention_days, 14);
        assert_eq!(loaded.remote.path.as_deref(), Some("/tmp/remote"));
        assert!(loaded.calendar.path.is_none());
        assert_eq!(loaded.ui.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: LendersConfig = toml::from_str("[ledger]\npath = \"/tmp/l.json\"\n").unwrap();
        assert_eq!(config.archive.retention_days, 30);
        assert!(config.remote.path.is_none());
        assert!(config.ui.timezone.is_none());
    }
}
