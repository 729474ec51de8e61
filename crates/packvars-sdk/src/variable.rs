//! Variable declarations

use std::fmt::Write as _;

use crate::id::{PackId, VariableId};
use crate::source::SourceRange;
use crate::value::{VariableType, VariableValue};

/// A declared variable with its resolved value.
///
/// Variables are produced by the parser and shared by reference; the core
/// holds them behind `Arc` and never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: VariableId,
    pub description: Option<String>,
    pub var_type: Option<VariableType>,
    pub value: VariableValue,
    pub decl_range: SourceRange,
}

impl Variable {
    pub fn new(name: impl Into<VariableId>, value: impl Into<VariableValue>) -> Self {
        Self {
            name: name.into(),
            description: None,
            var_type: None,
            value: value.into(),
            decl_range: SourceRange::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, var_type: VariableType) -> Self {
        self.var_type = Some(var_type);
        self
    }

    pub fn with_range(mut self, decl_range: SourceRange) -> Self {
        self.decl_range = decl_range;
        self
    }

    /// Render this variable as an override-file block for `pack`.
    ///
    /// The block is a commented header followed by a TOML dotted assignment,
    /// e.g. `app.port = 8080`, and ends with a blank line. Values TOML cannot
    /// hold are written as a comment so the file still loads.
    pub fn as_override_string(&self, pack: &PackId) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# variable \"{}.{}\"", pack, self.name);

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(
                out,
                "#   description: {}",
                description.replace('\n', "\n#   ")
            );
        }
        if let Some(var_type) = &self.var_type {
            let _ = writeln!(out, "#   type: {}", var_type);
        }

        match self.value.to_toml() {
            Some(value) => {
                let _ = writeln!(
                    out,
                    "{}.{} = {}",
                    toml_key(pack.as_str()),
                    toml_key(self.name.as_str()),
                    value
                );
            }
            None => {
                let _ = writeln!(out, "# {}.{} is not set", pack, self.name);
            }
        }

        out.push('\n');
        out
    }
}

/// Format `key` as a TOML key, quoting it unless it is a valid bare key.
fn toml_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if bare {
        key.to_string()
    } else {
        toml::Value::String(key.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_override_string_plain() {
        let var = Variable::new("port", 8080);
        assert_eq!(
            var.as_override_string(&PackId::from("app")),
            "# variable \"app.port\"\napp.port = 8080\n\n"
        );
    }

    #[test]
    fn test_override_string_with_header() {
        let var = Variable::new("region", "eu-west-1")
            .with_description("Where to run.\nPick the closest.")
            .with_type(VariableType::String);
        assert_eq!(
            var.as_override_string(&PackId::from("app")),
            concat!(
                "# variable \"app.region\"\n",
                "#   description: Where to run.\n",
                "#   Pick the closest.\n",
                "#   type: string\n",
                "app.region = \"eu-west-1\"\n",
                "\n",
            )
        );
    }

    #[test]
    fn test_override_string_quotes_dotted_pack_path() {
        let var = Variable::new("enabled", true);
        let out = var.as_override_string(&PackId::from("app.db"));
        assert!(out.contains("\"app.db\".enabled = true\n"), "got: {out}");
    }

    #[test]
    fn test_override_string_unset_value() {
        let var = Variable::new("token", VariableValue::Null);
        let out = var.as_override_string(&PackId::from("app"));
        assert_eq!(out, "# variable \"app.token\"\n# app.token is not set\n\n");
    }

    #[test]
    fn test_toml_key() {
        assert_eq!(toml_key("simple_name-1"), "simple_name-1");
        assert_eq!(toml_key("a.b"), "\"a.b\"");
        assert_eq!(toml_key(""), "\"\"");
    }
}
