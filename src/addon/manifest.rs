use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddonId(pub String);

impl AddonId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Metadata read from an addon's `addon.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddonManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    /// Script or module the host hands control to, relative to the addon root.
    pub entry: String,
    #[serde(default)]
    #[allow(dead_code)] // metadata only, not read by the host yet
    pub description: Option<String>,
    #[serde(default)]
    #[allow(dead_code)] // metadata only, not read by the host yet
    pub author: Option<String>,
    #[serde(default)]
    pub provides: Vec<ProvidesDef>,
}

/// An extension point the addon registers with the host.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidesDef {
    pub name: String,
    #[serde(default)]
    #[allow(dead_code)] // metadata only, not read by the host yet
    pub description: Option<String>,
}

impl AddonManifest {
    pub fn provides_entry(&self, name: &str) -> bool {
        self.provides.iter().any(|p| p.name == name)
    }
}
