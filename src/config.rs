use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default = "default_currency_symbol")]
    pub(crate) currency_symbol: String,
    /// Overrides the database location inside the data directory.
    #[serde(default)]
    pub(crate) database_path: Option<String>,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            database_path: None,
        }
    }
}

impl Settings {
    pub(crate) fn database_path(&self, data_dir: &Path) -> PathBuf {
        match self.database_path.as_deref() {
            Some(p) if !p.trim().is_empty() => PathBuf::from(shellexpand(p.trim())),
            _ => data_dir.join("tallytui.db"),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "tallytui", "TallyTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

pub(crate) fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

pub(crate) fn settings_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("settings.json"))
}

/// Settings from the user's config directory, or defaults when absent or unreadable.
pub(crate) fn load_settings() -> Settings {
    match settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            log::warn!("{e}; using default settings");
            Settings::default()
        }
    }
}

pub(crate) fn load_settings_from(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Settings::default(),
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable settings {}: {e}", path.display());
        Settings::default()
    })
}

pub(crate) fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
