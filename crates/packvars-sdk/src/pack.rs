//! Pack dependency tree
//!
//! A [`Pack`] owns its dependencies, so a pack tree is finite and acyclic by
//! construction. Each pack carries a variables path: the [`PackId`] its
//! variables are declared under. The path is assigned from the tree position
//! when a dependency is attached, but can be set independently of the key
//! the pack is nested under.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::PackId;

/// Key reserved for the current pack in a template context level.
///
/// Dependency keys share a namespace with it, so no dependency may use it.
pub const CURRENT_PACK_KEY: &str = "_self";

/// Application-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Descriptive metadata of a pack.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Metadata exposed to templates alongside a pack's variables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackMetadata {
    #[serde(default)]
    pub app: AppMetadata,
    #[serde(default)]
    pub pack: PackInfo,
}

impl PackMetadata {
    /// Convert to a generic map for template rendering.
    pub fn to_value_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// A node in a pack dependency tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Pack {
    name: String,
    alias: Option<String>,
    path: PackId,
    /// Set once the path was chosen with [`Pack::with_variables_path`].
    explicit_path: bool,
    metadata: PackMetadata,
    dependencies: Vec<Pack>,
}

impl Pack {
    /// Create a root pack. Its variables path is its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PackId::from(name.as_str()),
            explicit_path: false,
            metadata: PackMetadata {
                pack: PackInfo {
                    name: name.clone(),
                    ..PackInfo::default()
                },
                ..PackMetadata::default()
            },
            name,
            alias: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the key this pack is nested under by its parent.
    ///
    /// Takes effect on the variables path when the pack is attached with
    /// [`Pack::with_dependency`].
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_metadata(mut self, metadata: PackMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Override the variables path, re-rooting every dependency under it.
    ///
    /// The path is kept when this pack is later attached as a dependency.
    pub fn with_variables_path(mut self, path: impl Into<PackId>) -> Self {
        self.path = path.into();
        self.explicit_path = true;
        let parent = self.path.clone();
        for dep in &mut self.dependencies {
            dep.rebase(&parent);
        }
        self
    }

    /// Attach a dependency, placing its variables path under this pack's.
    pub fn with_dependency(mut self, mut dependency: Pack) -> Self {
        dependency.rebase(&self.path);
        self.dependencies.push(dependency);
        self
    }

    fn rebase(&mut self, parent: &PackId) {
        if !self.explicit_path {
            self.path = parent.join(self.alias_or_name());
        }
        let parent = self.path.clone();
        for dep in &mut self.dependencies {
            dep.rebase(&parent);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The key this pack is nested under in its parent's context.
    pub fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The id this pack's variables are declared under.
    pub fn variables_path(&self) -> &PackId {
        &self.path
    }

    pub fn metadata(&self) -> &PackMetadata {
        &self.metadata
    }

    /// Direct dependencies, in declaration order.
    pub fn dependencies(&self) -> &[Pack] {
        &self.dependencies
    }
}
