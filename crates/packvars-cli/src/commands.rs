//! Command implementations

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use packvars_core::{
    ParsedVariables, UnifiedVariables, merge_unified, parse_legacy_json, parse_override_file,
};
use packvars_sdk::{Diagnostics, PackManifest};

use crate::error::{CliError, Result};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CliError::file(path, e))
}

/// Read override files in order, later files overriding earlier ones.
fn read_override_files(files: &[PathBuf]) -> Result<UnifiedVariables> {
    let mut merged = UnifiedVariables::new();
    for path in files {
        let content = read(path)?;
        let vars = parse_override_file(&path.display().to_string(), &content)?;
        tracing::debug!(?path, packs = vars.len(), "Read override file");
        merge_unified(&mut merged, vars);
    }
    Ok(merged)
}

fn load_override_store(files: &[PathBuf]) -> Result<ParsedVariables> {
    let mut store = ParsedVariables::new();
    store.load_unified(&read_override_files(files)?)?;
    Ok(store)
}

/// Print diagnostics to stderr and fail if any of them is an error.
fn report(diags: &Diagnostics) -> Result<()> {
    for diag in diags {
        let label = if diag.is_error() {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        let location = diag
            .subject
            .as_ref()
            .map(|s| format!("{}: ", s))
            .unwrap_or_default();
        if diag.detail.is_empty() {
            eprintln!("{}{}: {}", location, label, diag.summary);
        } else {
            eprintln!("{}{}: {}; {}", location, label, diag.summary, diag.detail);
        }
    }

    let errors = diags.errors().count();
    if errors > 0 {
        return Err(CliError::user(format!("{} variable error(s) found", errors)));
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

pub fn run_varfile(files: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let store = load_override_store(files)?;
    let text = store.as_override_file();

    match output {
        Some(path) => {
            fs::write(path, &text).map_err(|e| CliError::file(path, e))?;
            tracing::debug!(?path, bytes = text.len(), "Wrote override file");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .map_err(|e| CliError::file("<stdout>", e))?;
        }
    }
    Ok(())
}

pub fn run_context(pack: &Path, vars: &[PathBuf]) -> Result<()> {
    let pack = PackManifest::from_path(pack)?.into_pack();
    let store = load_override_store(vars)?;

    let (context, diags) = store.to_template_context(&pack);
    print_json(&context.to_value())?;
    report(&diags)
}

pub fn run_flatten(legacy: Option<&Path>, vars: &[PathBuf]) -> Result<()> {
    let store = match legacy {
        Some(path) => {
            let content = read(path)?;
            let mut store = ParsedVariables::new();
            store.load_legacy(&parse_legacy_json(&path.display().to_string(), &content)?)?;
            store
        }
        None => load_override_store(vars)?,
    };

    let (map, diags) = store.to_legacy_value_map();
    print_json(&serde_json::Value::Object(map))?;
    report(&diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packvars_sdk::{Diagnostic, Pos, SourceRange};
    use tempfile::TempDir;

    #[test]
    fn test_read_override_files_later_wins() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base.toml");
        let prod = temp.path().join("prod.toml");
        fs::write(&base, "app.port = 80\napp.host = \"a\"\n").unwrap();
        fs::write(&prod, "app.port = 443\n").unwrap();

        let merged = read_override_files(&[base, prod]).unwrap();

        let app = &merged["app"];
        assert_eq!(app["port"].value, packvars_sdk::VariableValue::Integer(443));
        assert_eq!(app["host"].value, packvars_sdk::VariableValue::from("a"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_override_files(&[PathBuf::from("/nonexistent/vars.toml")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/vars.toml"));
    }

    #[test]
    fn test_report_fails_only_on_errors() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning("Duplicate dependency key", "kept last"));
        assert!(report(&diags).is_ok());

        diags.push(
            Diagnostic::error("Failed to convert variable value", "value is not known")
                .with_subject(SourceRange::new("v.toml", Pos::default(), Pos::default())),
        );
        let err = report(&diags).unwrap_err();
        assert_eq!(err.to_string(), "1 variable error(s) found");
    }
}
