//! bookbook-nbformat: Jupyter notebook document model for bookbook
//!
//! This crate provides:
//! - Cell types (markdown, raw, code) as plain tagged records
//! - nbformat v4 JSON reading and writing
//!
//! ## Example
//!
//! ```rust
//! use bookbook_nbformat::{Cell, CellType, Notebook};
//!
//! let mut nb = Notebook::new();
//! nb.cells.push(Cell::markdown("# Hello\n\nWorld"));
//!
//! let json = nb.to_json_string().unwrap();
//! let parsed = Notebook::from_json_str(&json).unwrap();
//! assert_eq!(parsed.cells[0].cell_type, CellType::Markdown);
//! assert_eq!(parsed.cells[0].source, "# Hello\n\nWorld");
//! ```

pub mod cell;
pub mod notebook;
mod source;

pub use cell::{Cell, CellType};
pub use notebook::{Notebook, NotebookError};
