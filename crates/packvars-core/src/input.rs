//! Reading variable sets from files
//!
//! Two inputs are supported:
//!
//! - **Override files** (TOML), the format written by
//!   [`ParsedVariables::as_override_file`](crate::ParsedVariables::as_override_file).
//!   Top-level keys are pack ids, second-level keys are variable names. They
//!   load into the unified layout.
//! - **Legacy JSON** of the form `{"pack": {"variable": value}}`, which
//!   loads into the legacy layout.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use packvars_sdk::{PackId, SourceRange, Variable, VariableId, VariableValue};
use toml::Spanned;

use crate::error::{Error, Result};
use crate::parsed::{LegacyVariables, UnifiedVariables};

/// Parse an override file into a unified variable set.
///
/// Each variable's declaration range covers its value in `content`.
pub fn parse_override_file(filename: &str, content: &str) -> Result<UnifiedVariables> {
    let packs: BTreeMap<String, BTreeMap<String, Spanned<toml::Value>>> =
        toml::from_str(content).map_err(|e| Error::OverrideParse {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;

    let mut out = HashMap::with_capacity(packs.len());
    for (pack, vars) in packs {
        let vars = vars
            .into_iter()
            .map(|(name, value)| {
                let range = SourceRange::from_span(filename, content, value.span());
                let var = Variable::new(name.as_str(), VariableValue::from_toml(value.get_ref()))
                    .with_range(range);
                (VariableId::from(name), Arc::new(var))
            })
            .collect();
        out.insert(PackId::from(pack), vars);
    }

    tracing::debug!(filename, packs = out.len(), "Parsed override file");
    Ok(out)
}

/// Parse a legacy JSON variables file.
///
/// JSON carries no positions, so every declaration range points at the
/// start of the file.
pub fn parse_legacy_json(filename: &str, content: &str) -> Result<LegacyVariables> {
    let packs: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
        serde_json::from_str(content).map_err(|source| Error::LegacyParse {
            filename: filename.to_string(),
            source,
        })?;

    let range = SourceRange {
        filename: filename.to_string(),
        ..SourceRange::default()
    };

    let out = packs
        .into_iter()
        .map(|(pack, vars)| {
            let vars = vars
                .into_iter()
                .map(|(name, value)| {
                    let var = Variable::new(name.as_str(), VariableValue::from_json(&value))
                        .with_range(range.clone());
                    (name, Arc::new(var))
                })
                .collect();
            (pack, vars)
        })
        .collect();
    Ok(out)
}

/// Layer `overlay` on top of `base`, variable by variable.
///
/// A variable present in both keeps the overlay's declaration.
pub fn merge_unified(base: &mut UnifiedVariables, overlay: UnifiedVariables) {
    for (pack, vars) in overlay {
        let target = base.entry(pack).or_default();
        for (name, var) in vars {
            if let Some(previous) = target.insert(name, var) {
                tracing::debug!(
                    variable = %previous.name,
                    replaced = %previous.decl_range.filename,
                    "Variable overridden by later file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packvars_sdk::Pos;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_dotted_and_table_forms() {
        let content = r#"
app.port = 8080
"app.db".user = "admin"

[worker]
replicas = 3
"#;
        let vars = parse_override_file("vars.toml", content).unwrap();

        assert_eq!(vars.len(), 3);
        assert_eq!(vars["app"]["port"].value, VariableValue::Integer(8080));
        assert_eq!(vars["app.db"]["user"].value, VariableValue::from("admin"));
        assert_eq!(vars["worker"]["replicas"].value, VariableValue::Integer(3));
    }

    #[test]
    fn test_parse_records_value_position() {
        let content = "# header\napp.port = 8080\n";
        let vars = parse_override_file("vars.toml", content).unwrap();

        let range = &vars["app"]["port"].decl_range;
        assert_eq!(range.filename, "vars.toml");
        assert_eq!(range.start, Pos::new(2, 12, 20));
    }

    #[test]
    fn test_parse_rejects_top_level_scalar() {
        let err = parse_override_file("bad.toml", "port = 8080\n").unwrap_err();
        assert!(matches!(err, Error::OverrideParse { ref filename, .. } if filename == "bad.toml"));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        assert!(parse_override_file("bad.toml", "app.port = \n").is_err());
    }

    #[test]
    fn test_parse_legacy_json() {
        let content = r#"{"app": {"port": 8080, "tags": ["a"], "token": null}}"#;
        let vars = parse_legacy_json("vars.json", content).unwrap();

        let app = &vars["app"];
        assert_eq!(app["port"].value, VariableValue::Integer(8080));
        assert_eq!(
            app["tags"].value,
            VariableValue::List(vec![VariableValue::from("a")])
        );
        assert!(app["token"].value.is_null());
        assert_eq!(app["port"].decl_range.filename, "vars.json");
    }

    #[test]
    fn test_parse_legacy_json_rejects_wrong_shape() {
        let err = parse_legacy_json("vars.json", r#"{"app": 1}"#).unwrap_err();
        assert!(matches!(err, Error::LegacyParse { .. }));
    }

    #[test]
    fn test_merge_overlay_wins() {
        let mut base = parse_override_file("a.toml", "app.port = 1\napp.host = \"x\"\n").unwrap();
        let overlay = parse_override_file("b.toml", "app.port = 2\nworker.n = 3\n").unwrap();

        merge_unified(&mut base, overlay);

        assert_eq!(base["app"]["port"].value, VariableValue::Integer(2));
        assert_eq!(base["app"]["port"].decl_range.filename, "b.toml");
        assert_eq!(base["app"]["host"].value, VariableValue::from("x"));
        assert_eq!(base["worker"]["n"].value, VariableValue::Integer(3));
    }
}
