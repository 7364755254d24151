//! Template-root walk and template-file parsing.
//!
//! Each `.toml` file under the root maps short keys to raw SQL template
//! text. The file's path relative to the root, separators replaced by dots
//! and the extension dropped, is the statement-id prefix every key in the
//! file lives under.

use crate::error::{SqlError, SqlResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub(crate) const TEMPLATE_EXTENSION: &str = "toml";

/// Walk the template root and map every dotted id prefix to its file.
pub(crate) fn build_index(root: &Path) -> SqlResult<HashMap<String, PathBuf>> {
    let pattern = root.join("**").join(format!("*.{TEMPLATE_EXTENSION}"));
    let pattern = pattern.to_str().ok_or_else(|| {
        SqlError::validation(format!(
            "template root is not valid UTF-8: {}",
            root.display()
        ))
    })?;

    let mut index = HashMap::new();
    let entries = glob::glob(pattern)
        .map_err(|e| SqlError::validation(format!("invalid template glob {pattern}: {e}")))?;
    for entry in entries {
        let path = entry.map_err(|e| SqlError::Io(e.into_error()))?;
        if !path.is_file() {
            continue;
        }
        if let Some(prefix) = id_prefix(root, &path) {
            index.insert(prefix, path);
        }
    }
    Ok(index)
}

fn id_prefix(root: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(root).ok()?.with_extension("");
    let mut segments = Vec::new();
    for component in rel.components() {
        segments.push(component.as_os_str().to_str()?);
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

/// Read and parse one template file into (key, raw SQL) pairs.
pub(crate) fn parse_template_file(path: &Path) -> SqlResult<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| SqlError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if table.is_empty() {
        return Err(SqlError::TemplateFileEmpty(path.to_path_buf()));
    }

    let mut statements = Vec::with_capacity(table.len());
    for (key, value) in table {
        let toml::Value::String(text) = value else {
            return Err(SqlError::Parse {
                path: path.to_path_buf(),
                message: format!("statement {key:?} is not a string"),
            });
        };
        statements.push((key, text));
    }
    Ok(statements)
}
