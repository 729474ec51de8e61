//! Template contexts over a pack dependency tree
//!
//! A [`TemplateContext`] mirrors the pack tree. Each level holds the current
//! pack's data under [`CURRENT_PACK_KEY`] and one nested context per
//! dependency, keyed by the dependency's alias or name:
//!
//! ```text
//! {
//!   "_self": { "vars": {..}, "meta": {..} },
//!   "db":    { "_self": {..}, ... },
//!   "cache": { "_self": {..} }
//! }
//! ```
//!
//! The current pack and its dependencies are stored in separate fields, so a
//! dependency can never replace the current pack's data.

use std::collections::BTreeMap;

use packvars_sdk::{CURRENT_PACK_KEY, Diagnostic, Diagnostics, Pack};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::convert::{ValueMap, convert_variables};
use crate::parsed::{ParsedVariables, UnifiedVariables};

/// Template data for a single pack.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PackData<'a> {
    #[serde(skip)]
    pub pack: &'a Pack,
    /// Converted values of the pack's own variables.
    pub vars: ValueMap,
    /// The pack's metadata as generic values.
    pub meta: ValueMap,
}

impl PackData<'_> {
    /// `{ "vars": .., "meta": .. }` as handed to templates.
    pub fn to_value(&self) -> Value {
        let mut map = ValueMap::new();
        map.insert("vars".to_string(), Value::Object(self.vars.clone()));
        map.insert("meta".to_string(), Value::Object(self.meta.clone()));
        Value::Object(map)
    }
}

/// One level of the nested template context.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    current: PackData<'a>,
    dependencies: BTreeMap<String, TemplateContext<'a>>,
}

impl<'a> TemplateContext<'a> {
    fn new(current: PackData<'a>) -> Self {
        Self {
            current,
            dependencies: BTreeMap::new(),
        }
    }

    /// Data of the pack this level belongs to.
    pub fn current(&self) -> &PackData<'a> {
        &self.current
    }

    /// Nested context of a direct dependency.
    pub fn dependency(&self, key: &str) -> Option<&TemplateContext<'a>> {
        self.dependencies.get(key)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &TemplateContext<'a>)> {
        self.dependencies.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All keys at this level, sorted, including [`CURRENT_PACK_KEY`].
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = std::iter::once(CURRENT_PACK_KEY)
            .chain(self.dependencies.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Render the whole tree as the generic value handed to templates.
    pub fn to_value(&self) -> Value {
        let mut map = ValueMap::new();
        map.insert(CURRENT_PACK_KEY.to_string(), self.current.to_value());
        for (key, dep) in &self.dependencies {
            map.insert(key.clone(), dep.to_value());
        }
        Value::Object(map)
    }
}

impl Serialize for TemplateContext<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.dependencies.len()))?;
        map.serialize_entry(CURRENT_PACK_KEY, &self.current)?;
        for (key, dep) in &self.dependencies {
            map.serialize_entry(key, dep)?;
        }
        map.end()
    }
}

impl ParsedVariables {
    /// Build the template context for `pack` and its dependency tree.
    ///
    /// Conversion failures do not stop the build: failing variables are left
    /// out and reported in the returned diagnostics, together with any
    /// dependency key collisions.
    pub fn to_template_context<'a>(&self, pack: &'a Pack) -> (TemplateContext<'a>, Diagnostics) {
        let vars = self.unified_view();
        let mut diags = Diagnostics::new();
        let context = build_context(&vars, pack, &mut diags);
        tracing::debug!(
            pack = pack.name(),
            diagnostics = diags.len(),
            "Built template context"
        );
        (context, diags)
    }
}

fn build_context<'a>(
    vars: &UnifiedVariables,
    pack: &'a Pack,
    diags: &mut Diagnostics,
) -> TemplateContext<'a> {
    let values = match vars.get(pack.variables_path()) {
        Some(pack_vars) => {
            let (values, conversion_diags) = convert_variables(pack_vars);
            diags.append(conversion_diags);
            values
        }
        None => ValueMap::new(),
    };

    let mut context = TemplateContext::new(PackData {
        pack,
        vars: values,
        meta: pack.metadata().to_value_map(),
    });

    for dep in pack.dependencies() {
        let key = dep.alias_or_name();
        if key == CURRENT_PACK_KEY {
            diags.push(Diagnostic::error(
                "Dependency key is reserved",
                format!(
                    "dependency '{}' at '{}' of pack '{}' uses the key '{}', which holds the current pack; it was not added",
                    dep.name(),
                    dep.variables_path(),
                    pack.name(),
                    CURRENT_PACK_KEY
                ),
            ));
            continue;
        }

        let child = build_context(vars, dep, diags);
        if context.dependencies.insert(key.to_string(), child).is_some() {
            diags.push(Diagnostic::warning(
                "Duplicate dependency key",
                format!(
                    "dependency '{}' at '{}' of pack '{}' reuses the key '{}'; the last one was kept",
                    dep.name(),
                    dep.variables_path(),
                    pack.name(),
                    key
                ),
            ));
        }
    }

    context
}
