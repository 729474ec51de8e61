//! The loaded variable store
//!
//! [`ParsedVariables`] holds the output of one parser run. The parser emits
//! either the legacy layout (string keys) or the unified layout (typed ids);
//! the store keeps whichever it was given and exposes the unified view for
//! both.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use packvars_sdk::{PackId, Variable, VariableId};

use crate::error::{Error, Result, VariableShape};
use crate::normalize::normalize_legacy;

/// Variables of one pack, keyed by variable id.
pub type PackVariables = HashMap<VariableId, Arc<Variable>>;

/// Legacy layout: pack name to variable name to variable.
pub type LegacyVariables = HashMap<String, HashMap<String, Arc<Variable>>>;

/// Unified layout: pack id to variable id to variable.
pub type UnifiedVariables = HashMap<PackId, PackVariables>;

#[derive(Debug, Clone)]
enum LoadedVariables {
    Legacy(LegacyVariables),
    Unified(UnifiedVariables),
}

/// A variable set loaded exactly once, in either layout.
///
/// After a load the store is read-only. Reads of the unified view on a
/// legacy load re-key the stored data on every call instead of caching, so
/// concurrent readers never observe a mutation.
#[derive(Debug, Clone, Default)]
pub struct ParsedVariables {
    loaded: Option<LoadedVariables>,
}

impl ParsedVariables {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a legacy-layout variable set.
    ///
    /// Both map levels are cloned so later changes to `vars` are not seen
    /// by the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyLoaded` if the store already holds variables;
    /// the stored content is left as it was.
    pub fn load_legacy(&mut self, vars: &LegacyVariables) -> Result<()> {
        self.ensure_unloaded()?;
        tracing::debug!(packs = vars.len(), "Loading legacy variables");
        self.loaded = Some(LoadedVariables::Legacy(vars.clone()));
        Ok(())
    }

    /// Load a unified-layout variable set.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyLoaded` if the store already holds variables.
    pub fn load_unified(&mut self, vars: &UnifiedVariables) -> Result<()> {
        self.ensure_unloaded()?;
        tracing::debug!(packs = vars.len(), "Loading unified variables");
        self.loaded = Some(LoadedVariables::Unified(vars.clone()));
        Ok(())
    }

    fn ensure_unloaded(&self) -> Result<()> {
        match self.shape() {
            Some(shape) => Err(Error::AlreadyLoaded { shape }),
            None => Ok(()),
        }
    }

    /// Layout of the loaded set, or `None` before a load.
    pub fn shape(&self) -> Option<VariableShape> {
        match self.loaded {
            Some(LoadedVariables::Legacy(_)) => Some(VariableShape::Legacy),
            Some(LoadedVariables::Unified(_)) => Some(VariableShape::Unified),
            None => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_legacy(&self) -> bool {
        self.shape() == Some(VariableShape::Legacy)
    }

    pub fn is_unified(&self) -> bool {
        self.shape() == Some(VariableShape::Unified)
    }

    /// The stored legacy map, if the store was loaded in legacy layout.
    pub fn legacy_view(&self) -> Option<&LegacyVariables> {
        match &self.loaded {
            Some(LoadedVariables::Legacy(vars)) => Some(vars),
            _ => None,
        }
    }

    /// The variable set in unified layout.
    ///
    /// Borrows the stored map for a unified load and builds a fresh map for
    /// a legacy load. An unloaded store yields an empty map.
    pub fn unified_view(&self) -> Cow<'_, UnifiedVariables> {
        match &self.loaded {
            Some(LoadedVariables::Unified(vars)) => Cow::Borrowed(vars),
            Some(LoadedVariables::Legacy(vars)) => Cow::Owned(normalize_legacy(vars)),
            None => Cow::Owned(UnifiedVariables::new()),
        }
    }

    /// Look up a single variable.
    pub fn variable(&self, pack: &str, name: &str) -> Option<Arc<Variable>> {
        match &self.loaded {
            Some(LoadedVariables::Unified(vars)) => vars.get(pack)?.get(name).cloned(),
            Some(LoadedVariables::Legacy(vars)) => vars.get(pack)?.get(name).cloned(),
            None => None,
        }
    }

    /// Ids of every loaded pack, sorted.
    pub fn pack_ids(&self) -> Vec<PackId> {
        let mut ids: Vec<PackId> = self.unified_view().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn legacy_fixture() -> LegacyVariables {
        HashMap::from([(
            "app".to_string(),
            HashMap::from([(
                "port".to_string(),
                Arc::new(Variable::new("port", 8080)),
            )]),
        )])
    }

    fn unified_fixture() -> UnifiedVariables {
        HashMap::from([(
            PackId::from("app"),
            HashMap::from([(
                VariableId::from("port"),
                Arc::new(Variable::new("port", 8080)),
            )]),
        )])
    }

    #[test]
    fn test_unloaded_store() {
        let store = ParsedVariables::new();
        assert!(!store.is_loaded());
        assert!(!store.is_legacy());
        assert!(!store.is_unified());
        assert_eq!(store.shape(), None);
        assert!(store.unified_view().is_empty());
        assert!(store.legacy_view().is_none());
        assert!(store.variable("app", "port").is_none());
    }

    #[test]
    fn test_load_legacy_sets_shape() {
        let mut store = ParsedVariables::new();
        store.load_legacy(&legacy_fixture()).unwrap();
        assert!(store.is_loaded());
        assert!(store.is_legacy());
        assert!(!store.is_unified());
        assert!(store.legacy_view().is_some());
    }

    #[test]
    fn test_load_unified_borrows_stored_map() {
        let mut store = ParsedVariables::new();
        store.load_unified(&unified_fixture()).unwrap();
        assert!(store.is_unified());
        assert!(matches!(store.unified_view(), Cow::Borrowed(_)));
        assert!(store.legacy_view().is_none());
    }

    #[test]
    fn test_legacy_view_is_rebuilt_per_read() {
        let mut store = ParsedVariables::new();
        store.load_legacy(&legacy_fixture()).unwrap();

        let first = store.unified_view();
        let second = store.unified_view();
        assert!(matches!(first, Cow::Owned(_)));
        assert!(matches!(second, Cow::Owned(_)));
        assert_eq!(first.as_ref(), second.as_ref());
        assert!(Arc::ptr_eq(&first["app"]["port"], &second["app"]["port"]));
    }

    #[test]
    fn test_load_clones_caller_maps() {
        let mut vars = legacy_fixture();
        let mut store = ParsedVariables::new();
        store.load_legacy(&vars).unwrap();

        vars.get_mut("app")
            .unwrap()
            .insert("extra".to_string(), Arc::new(Variable::new("extra", 1)));
        vars.insert("other".to_string(), HashMap::new());

        assert_eq!(store.pack_ids(), vec![PackId::from("app")]);
        assert!(store.variable("app", "extra").is_none());
    }

    #[test]
    fn test_variable_lookup_both_shapes() {
        let mut legacy = ParsedVariables::new();
        legacy.load_legacy(&legacy_fixture()).unwrap();
        let mut unified = ParsedVariables::new();
        unified.load_unified(&unified_fixture()).unwrap();

        for store in [&legacy, &unified] {
            let var = store.variable("app", "port").unwrap();
            assert_eq!(var.name.as_str(), "port");
            assert!(store.variable("app", "missing").is_none());
            assert!(store.variable("missing", "port").is_none());
        }
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParsedVariables>();
    }
}
