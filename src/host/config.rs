use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct HostConfig {
    pub general: GeneralConfig,
    #[serde(default)]
    pub addons: Vec<AddonConfig>,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Base directory scanned for addons without an explicit path.
    pub addon_dir: String,
    /// Env-filter directive handed to the tracing subscriber.
    pub log_filter: String,
}

/// One `[[addons]]` entry from the host config.
#[derive(Debug, Clone, Deserialize)]
pub struct AddonConfig {
    /// Directory containing `addon.toml`. Relative paths resolve against
    /// `general.addon_dir`; `~` expands to the home directory.
    pub path: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl HostConfig {
    /// Load configuration: bundled defaults, or the user's `config.toml`
    /// in full when one exists.
    pub fn load() -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        let mut config: HostConfig = toml::from_str(defaults)?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "addonhost") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = toml::from_str(&user_str)?; // TODO: deep merge instead of full replace
            }
        }

        config.general.addon_dir = expand_tilde_str(&config.general.addon_dir);
        Ok(config)
    }

    pub fn addon_base_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.addon_dir)
    }

    /// Resolve an addon entry to the absolute directory holding its manifest.
    pub fn resolve_addon_root(&self, addon: &AddonConfig) -> PathBuf {
        let expanded = expand_tilde(&addon.path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.addon_base_dir().join(expanded)
        }
    }
}

fn expand_tilde_str(text: &str) -> String {
    if !text.starts_with('~') {
        return text.to_string();
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        let home = base_dirs.home_dir().to_string_lossy();
        return text.replacen('~', &home, 1);
    }

    text.to_string()
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(expand_tilde_str(&path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let defaults = include_str!("../../config/default.toml");
        let config: HostConfig = toml::from_str(defaults).unwrap();
        assert!(!config.general.addon_dir.is_empty());
        assert!(config.addons.is_empty());
    }

    #[test]
    fn addon_entries_default_to_enabled() {
        let config: HostConfig = toml::from_str(
            r#"
            [general]
            addon_dir = "/opt/addons"
            log_filter = "addonhost=info"

            [[addons]]
            path = "example"

            [[addons]]
            path = "/srv/addons/other"
            enabled = false
            "#,
        )
        .unwrap();

        assert!(config.addons[0].enabled);
        assert!(!config.addons[1].enabled);
    }

    #[test]
    fn relative_addon_paths_resolve_against_base_dir() {
        let config: HostConfig = toml::from_str(
            r#"
            [general]
            addon_dir = "/opt/addons"
            log_filter = "addonhost=info"

            [[addons]]
            path = "example"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.resolve_addon_root(&config.addons[0]),
            PathBuf::from("/opt/addons/example")
        );
    }
}
