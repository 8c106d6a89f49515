//! The read-only category list resource.
//!
//! Served from a JSON side file when one exists, otherwise from a built-in
//! default. The file is re-read on every request and passed through verbatim.

use crate::types::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::ErrorKind;
use std::path::PathBuf;

pub const CATEGORIES_URI: &str = "expense://categories";
pub const CATEGORIES_MIME_TYPE: &str = "application/json";
pub const DEFAULT_CATEGORIES: &str =
    r#"{"categories": ["Food", "Travel", "Entertainment", "Bills", "Misc"]}"#;

/// One entry of a `resources/read` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CategoryResource {
    path: PathBuf,
}

impl CategoryResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn uri(&self) -> &'static str {
        CATEGORIES_URI
    }

    /// Raw resource body. No JSON validation: a corrupt file is returned as-is.
    pub fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DEFAULT_CATEGORIES.to_string()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "category file unreadable");
                Err(e.into())
            }
        }
    }

    pub fn contents(&self) -> Result<ResourceContents> {
        Ok(ResourceContents {
            uri: self.uri().to_string(),
            mime_type: CATEGORIES_MIME_TYPE.to_string(),
            text: self.read()?,
        })
    }

    /// Listing form for `resources/list`.
    pub fn to_listing(&self) -> Value {
        json!({
            "uri": self.uri(),
            "name": "categories",
            "description": "Return predefined categories as a JSON resource.",
            "mimeType": CATEGORIES_MIME_TYPE,
        })
    }
}
