//! Notebook documents
//!
//! Reads and writes nbformat v4 JSON.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

/// The only nbformat major version this crate understands
pub const NBFORMAT_VERSION: u32 = 4;

/// Minor version written for newly created notebooks
pub const NBFORMAT_MINOR: u32 = 4;

/// Errors that can occur while reading or writing a notebook
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("Invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported nbformat version {0} (expected 4)")]
    UnsupportedVersion(u32),
}

/// Result type for notebook operations
pub type Result<T> = std::result::Result<T, NotebookError>;

/// A notebook document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Notebook {
    /// Create an empty v4 notebook
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            metadata: Map::new(),
            nbformat: NBFORMAT_VERSION,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    /// Parse a notebook from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let nb: Notebook = serde_json::from_str(json)?;
        nb.check_version()
    }

    /// Parse a notebook from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let nb: Notebook = serde_json::from_reader(reader)?;
        nb.check_version()
    }

    /// Serialize the notebook to pretty-printed JSON with a trailing newline
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    fn check_version(self) -> Result<Self> {
        if self.nbformat != NBFORMAT_VERSION {
            return Err(NotebookError::UnsupportedVersion(self.nbformat));
        }
        Ok(self)
    }
}
