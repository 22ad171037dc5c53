// load.rs — AST document loading
//
// Deserializes the parser's JSON output into `ast::Program`. Accepts the bare
// root object or the `{"type": "PROGRAM", "value": {...}}` wrapper. Any node
// with a missing or unknown tag fails here, so the validator only ever sees
// well-formed trees.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::ast::Program;

const PROGRAM_TAG: &str = "PROGRAM";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed AST document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("malformed AST document: wrapper tagged '{0}', expected 'PROGRAM'")]
    UnexpectedRoot(String),
}

/// Parse an AST document from JSON text.
pub fn from_str(text: &str) -> Result<Program, LoadError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(value)
}

/// Read and parse an AST document from a file.
pub fn from_path(path: &Path) -> Result<Program, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&text)
}

fn from_value(mut value: Value) -> Result<Program, LoadError> {
    if let Some(tag) = value.get("type").and_then(Value::as_str) {
        if tag != PROGRAM_TAG {
            return Err(LoadError::UnexpectedRoot(tag.to_string()));
        }
        value = value
            .get_mut("value")
            .map(Value::take)
            .unwrap_or(Value::Null);
    }
    Ok(serde_json::from_value(value)?)
}
