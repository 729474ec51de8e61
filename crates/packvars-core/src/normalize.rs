//! Legacy to unified re-keying

use std::collections::HashMap;

use packvars_sdk::{PackId, VariableId};

use crate::parsed::{LegacyVariables, UnifiedVariables};

/// Re-key a legacy variable set into the unified layout.
///
/// Keys are promoted one-to-one to typed ids. Nothing is filtered and the
/// variables themselves are shared, not copied.
pub fn normalize_legacy(legacy: &LegacyVariables) -> UnifiedVariables {
    let mut out = HashMap::with_capacity(legacy.len());
    for (pack, vars) in legacy {
        let vars = vars
            .iter()
            .map(|(name, var)| (VariableId::from(name), var.clone()))
            .collect();
        out.insert(PackId::from(pack), vars);
    }
    out
}
