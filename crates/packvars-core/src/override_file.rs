//! Override file generation
//!
//! An override file restates every loaded variable as a TOML assignment,
//! one commented block per variable:
//!
//! ```text
//! # variable "app.port"
//! #   type: number
//! app.port = 8080
//!
//! # variable "app.db.user"
//! "app.db".user = "admin"
//! ```
//!
//! Output is sorted by pack id and then variable id, so identical variable
//! sets always produce identical text. The file can be read back with
//! [`parse_override_file`](crate::input::parse_override_file).

use crate::parsed::ParsedVariables;

impl ParsedVariables {
    /// Render the loaded variables as an override file.
    pub fn as_override_file(&self) -> String {
        let vars = self.unified_view();
        let mut out = self.override_file_header();

        let mut packs: Vec<_> = vars.keys().collect();
        packs.sort();

        for pack in packs {
            let pack_vars = &vars[pack];
            let mut names: Vec<_> = pack_vars.keys().collect();
            names.sort();

            for name in names {
                out.push_str(&pack_vars[name].as_override_string(pack));
            }
        }

        out
    }

    /// Text placed above the variable blocks. Empty for now.
    fn override_file_header(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed::UnifiedVariables;
    use packvars_sdk::{PackId, Variable, VariableType, VariableValue};
    use std::sync::Arc;

    #[test]
    fn test_empty_store_renders_nothing() {
        assert_eq!(ParsedVariables::new().as_override_file(), "");
    }

    #[test]
    fn test_blocks_are_sorted() {
        let mut vars = UnifiedVariables::new();
        for (pack, name, value) in [
            ("worker", "replicas", VariableValue::from(2)),
            ("app", "region", VariableValue::from("eu")),
            ("app", "port", VariableValue::from(8080)),
        ] {
            vars.entry(PackId::from(pack))
                .or_default()
                .insert(name.into(), Arc::new(Variable::new(name, value)));
        }
        let mut store = ParsedVariables::new();
        store.load_unified(&vars).unwrap();

        insta::assert_snapshot!(store.as_override_file(), @r###"
        # variable "app.port"
        app.port = 8080

        # variable "app.region"
        app.region = "eu"

        # variable "worker.replicas"
        worker.replicas = 2
        "###);
    }

    #[test]
    fn test_header_lines_and_unset_values() {
        let mut vars = UnifiedVariables::new();
        vars.entry(PackId::from("app")).or_default().insert(
            "token".into(),
            Arc::new(
                Variable::new("token", VariableValue::Unknown)
                    .with_description("API token")
                    .with_type(VariableType::String),
            ),
        );
        let mut store = ParsedVariables::new();
        store.load_unified(&vars).unwrap();

        assert_eq!(
            store.as_override_file(),
            "# variable \"app.token\"\n#   description: API token\n#   type: string\n# app.token is not set\n\n"
        );
    }
}
