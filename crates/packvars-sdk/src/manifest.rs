//! Pack manifest parsing for `pack.toml` files.
//!
//! A manifest describes a pack and, recursively, its dependencies.
//!
//! # Example TOML
//!
//! ```toml
//! [pack]
//! name = "app"
//! version = "0.3.0"
//!
//! [app]
//! url = "https://example.com/app"
//!
//! [[dependencies]]
//! alias = "db"
//! [dependencies.pack]
//! name = "postgres"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pack::{AppMetadata, CURRENT_PACK_KEY, Pack, PackInfo, PackMetadata};

/// Pack definition loaded from `pack.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackManifest {
    /// Core pack metadata.
    pub pack: PackInfo,
    /// Application metadata.
    #[serde(default)]
    pub app: AppMetadata,
    /// Key to nest this pack under when it is a dependency.
    #[serde(default)]
    pub alias: Option<String>,
    /// Dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<PackManifest>,
}

impl PackManifest {
    /// Parse a pack manifest from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and parse a pack manifest from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.pack.name)
    }

    /// Validate names across the whole tree.
    ///
    /// Dependency keys share a namespace with the current pack key, so the
    /// reserved key and duplicate sibling keys are rejected here rather than
    /// silently overwriting each other in a template context.
    fn validate(&self) -> Result<()> {
        validate_name(&self.pack.name)?;
        if let Some(alias) = &self.alias {
            validate_name(alias)?;
        }

        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            dep.validate()?;
            let key = dep.alias_or_name();
            if !seen.insert(key) {
                return Err(Error::DuplicateDependency {
                    pack: self.pack.name.clone(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build the pack tree described by this manifest.
    pub fn into_pack(self) -> Pack {
        let mut pack = Pack::new(self.pack.name.clone()).with_metadata(PackMetadata {
            app: self.app,
            pack: self.pack,
        });
        if let Some(alias) = self.alias {
            pack = pack.with_alias(alias);
        }
        for dep in self.dependencies {
            pack = pack.with_dependency(dep.into_pack());
        }
        pack
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "pack name must not be empty".to_string(),
        });
    }
    if name == CURRENT_PACK_KEY {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: format!("'{}' is reserved for the current pack", CURRENT_PACK_KEY),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "pack name must contain only alphanumeric characters, hyphens, or underscores"
                .to_string(),
        });
    }
    Ok(())
}
