//! bookbook-core: Turn a collection of notebooks into one LaTeX-ready book
//!
//! This crate provides:
//! - Link rewriting from `[text](chapter.ipynb#section)` to `\ref{...}`
//! - Section labelling under each notebook's first heading
//! - Combining already-loaded notebooks into one notebook
//! - `_bookbook.toml` configuration
//!
//! Converting the combined notebook to LaTeX and running the typesetter are
//! left to external tools.

pub mod combine;
pub mod config;
pub mod label;
pub mod latex;
pub mod links;

pub use bookbook_nbformat::{Cell, CellType, Notebook, NotebookError};
pub use combine::{
    Chapter, CombineError, CombineOptions, DanglingRef, combine_notebooks, dangling_references,
};
pub use config::Config;
pub use label::{LabelError, label_section};
pub use links::{
    LinkError, LinkPolicy, NotebookRef, notebook_links, rewrite_links, try_rewrite_links,
};
