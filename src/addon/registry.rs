use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::addon::manifest::{AddonId, AddonManifest};
use crate::host::config::HostConfig;

#[derive(Debug, Error)]
pub enum AddonError {
    #[error("{}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("missing addon manifest")]
    MissingManifest,
    #[error("missing entry file: {}", .0.display())]
    MissingEntry(PathBuf),
}

#[derive(Debug)]
pub enum AddonStatus {
    Discovered,
    Loaded,
    Error(AddonError),
}

/// Per-addon state tracked by the host.
#[derive(Debug)]
pub struct AddonRuntime {
    pub id: AddonId,
    pub root_dir: PathBuf,
    pub manifest: Option<AddonManifest>,
    status: AddonStatus,
}

impl AddonRuntime {
    pub fn discover(root_dir: PathBuf) -> Self {
        match Self::read_manifest(&root_dir) {
            Ok(manifest) => Self {
                id: AddonId::new(&manifest.id),
                root_dir,
                manifest: Some(manifest),
                status: AddonStatus::Discovered,
            },
            Err(err) => {
                let id = AddonId::new(root_dir.display().to_string());
                Self {
                    id,
                    root_dir,
                    manifest: None,
                    status: AddonStatus::Error(err),
                }
            }
        }
    }

    pub fn status(&self) -> &AddonStatus {
        &self.status
    }

    pub fn display_name(&self) -> String {
        self.manifest
            .as_ref()
            .map(|manifest| manifest.name.clone())
            .unwrap_or_else(|| self.id.0.clone())
    }

    /// Validate the manifest's entry file and mark the addon loaded.
    pub fn load(&mut self) -> Result<(), AddonError> {
        if matches!(self.status, AddonStatus::Loaded) {
            return Ok(());
        }

        let entry = match self.manifest.as_ref() {
            Some(manifest) => manifest.entry.clone(),
            None => return Err(AddonError::MissingManifest),
        };

        let entry_path = self.root_dir.join(entry);
        if !entry_path.is_file() {
            self.status = AddonStatus::Error(AddonError::MissingEntry(entry_path.clone()));
            return Err(AddonError::MissingEntry(entry_path));
        }

        self.status = AddonStatus::Loaded;
        Ok(())
    }

    fn read_manifest(root_dir: &Path) -> Result<AddonManifest, AddonError> {
        let manifest_path = root_dir.join("addon.toml");
        let raw = fs::read_to_string(&manifest_path).map_err(|source| AddonError::ManifestRead {
            path: manifest_path.clone(),
            source,
        })?;

        toml::from_str::<AddonManifest>(&raw).map_err(|source| AddonError::ManifestParse {
            path: manifest_path,
            source,
        })
    }
}

/// All addons known to the host, keyed by manifest id.
#[derive(Debug, Default)]
pub struct AddonRegistry {
    runtimes: HashMap<AddonId, AddonRuntime>,
}

impl AddonRegistry {
    pub fn new(config: &HostConfig) -> Self {
        let mut registry = Self::default();

        for addon in &config.addons {
            if !addon.enabled {
                continue;
            }

            let root_dir = config.resolve_addon_root(addon);
            let runtime = AddonRuntime::discover(root_dir);
            registry.runtimes.entry(runtime.id.clone()).or_insert(runtime);
        }

        registry
    }

    pub fn addon_count(&self) -> usize {
        self.runtimes.len()
    }

    pub fn error_count(&self) -> usize {
        self.runtimes
            .values()
            .filter(|runtime| matches!(runtime.status(), AddonStatus::Error(_)))
            .count()
    }

    pub fn get(&self, id: &AddonId) -> Option<&AddonRuntime> {
        self.runtimes.get(id)
    }

    pub fn load_all(&mut self) -> usize {
        self.runtimes
            .values_mut()
            .map(|runtime| runtime.load())
            .filter(Result::is_ok)
            .count()
    }

    pub fn startup_notifications(&self) -> Vec<String> {
        if self.runtimes.is_empty() {
            return Vec::new();
        }

        let mut notices = vec![self.summary_notification()];
        notices.extend(self.error_notifications());
        notices
    }

    pub fn summary_notification(&self) -> String {
        let discovered = self.addon_count().saturating_sub(self.error_count());
        format!(
            "addons: {discovered} discovered, {} errors",
            self.error_count()
        )
    }

    pub fn error_notifications(&self) -> Vec<String> {
        self.runtimes
            .values()
            .filter_map(|runtime| {
                if let AddonStatus::Error(err) = runtime.status() {
                    Some(format!(
                        "addon {} ({}): {err}",
                        runtime.display_name(),
                        runtime.root_dir.display()
                    ))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn list_notifications(&self) -> Vec<String> {
        if self.runtimes.is_empty() {
            return vec!["addons: none configured".to_string()];
        }

        let mut rows: Vec<String> = self
            .runtimes
            .values()
            .map(|runtime| {
                let status = match runtime.status() {
                    AddonStatus::Discovered => "discovered".to_string(),
                    AddonStatus::Loaded => "loaded".to_string(),
                    AddonStatus::Error(err) => format!("error: {err}"),
                };

                let name = match runtime.manifest.as_ref() {
                    Some(manifest) => format!("{} v{}", manifest.name, manifest.version),
                    None => runtime.id.0.clone(),
                };

                format!("addon {name} [{status}] ({})", runtime.root_dir.display())
            })
            .collect();

        rows.sort();
        rows
    }
}
