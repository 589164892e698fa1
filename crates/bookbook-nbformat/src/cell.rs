//! Notebook cells
//!
//! A cell is a type tag plus a text payload. Everything else nbformat stores
//! on a cell (outputs, execution count, ids, attachments) is carried along
//! untouched in [`Cell::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Narrative Markdown content
    Markdown,
    /// Raw content passed through to the output format
    Raw,
    /// Source code, optionally with outputs
    Code,
}

impl CellType {
    /// The nbformat name of this cell type
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
            CellType::Code => "code",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notebook cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Cell text. nbformat allows a string or a list of lines; both load here
    /// as one string, and it is written back as a list of lines.
    #[serde(with = "crate::source")]
    pub source: String,
    /// Remaining nbformat fields (`outputs`, `execution_count`, `id`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Create a cell of the given type with empty metadata
    pub fn new(cell_type: CellType, source: impl Into<String>) -> Self {
        Self {
            cell_type,
            metadata: Map::new(),
            source: source.into(),
            extra: Map::new(),
        }
    }

    /// Create a Markdown cell
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::new(CellType::Markdown, source)
    }

    /// Create a raw cell
    pub fn raw(source: impl Into<String>) -> Self {
        Self::new(CellType::Raw, source)
    }

    /// Create a raw cell tagged as LaTeX, so exporters only pass it through
    /// to LaTeX-based output formats
    pub fn latex(source: impl Into<String>) -> Self {
        Self::raw(source).with_metadata("raw_mimetype", Value::from("text/latex"))
    }

    /// Create a code cell with no outputs
    pub fn code(source: impl Into<String>) -> Self {
        let mut cell = Self::new(CellType::Code, source);
        cell.extra.insert("execution_count".to_string(), Value::Null);
        cell.extra.insert("outputs".to_string(), Value::Array(Vec::new()));
        cell
    }

    /// Return this cell with one metadata entry set
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn is_markdown(&self) -> bool {
        self.cell_type == CellType::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_cell_metadata() {
        let cell = Cell::latex("\\label{sec:x}");
        assert_eq!(cell.cell_type, CellType::Raw);
        assert_eq!(cell.metadata["raw_mimetype"], "text/latex");
    }

    #[test]
    fn test_code_cell_has_outputs() {
        let cell = Cell::code("print(1)");
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["cell_type"], "code");
        assert_eq!(json["outputs"], serde_json::json!([]));
        assert!(json["execution_count"].is_null());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let cell: Cell = serde_json::from_value(serde_json::json!({
            "cell_type": "code",
            "id": "abc123",
            "metadata": {"tags": ["hide"]},
            "source": "x = 1",
            "execution_count": 3,
            "outputs": []
        }))
        .unwrap();

        assert_eq!(cell.extra["id"], "abc123");
        assert_eq!(cell.extra["execution_count"], 3);

        let back = serde_json::to_value(&cell).unwrap();
        assert_eq!(back["id"], "abc123");
        assert_eq!(back["metadata"]["tags"][0], "hide");
    }

    #[test]
    fn test_cell_type_display() {
        assert_eq!(CellType::Markdown.to_string(), "markdown");
        assert_eq!(CellType::Raw.to_string(), "raw");
    }
}
