//! Section labels for notebook headings
//!
//! Each notebook becomes a chapter of the combined book. Its first cell must
//! start with the chapter heading; a raw LaTeX cell holding
//! `\label{sec:<slug>}` is inserted right after that heading so that
//! `\ref{sec:<slug>}` resolves to the chapter.

use crate::latex;
use bookbook_nbformat::{Cell, CellType};
use regex::Regex;
use std::sync::LazyLock;

/// Underline of a setext-style heading (`Title` followed by `=====`)
static SETEXT_UNDERLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=+\s*$").unwrap());

/// Errors from section labelling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("Cell does not start with a heading (expected '# Title' or a title underlined with '=')")]
    InvalidHeadingFormat,

    #[error("Expected a markdown cell with a heading, found a {0} cell")]
    NotMarkdown(CellType),
}

/// Number of lines the heading at the start of `lines` takes up
fn heading_line_count(lines: &[&str]) -> Option<usize> {
    match lines {
        [first, ..] if first.starts_with('#') => Some(1),
        [first, second, ..] if !first.trim().is_empty() && SETEXT_UNDERLINE_RE.is_match(second) => {
            Some(2)
        }
        _ => None,
    }
}

/// Split a heading cell and insert a `\label{sec:<slug>}` raw cell after the heading
///
/// Returns the heading cell, the label cell and, when there is any text after
/// the heading, a markdown cell with that text.
pub fn label_section(cell: &Cell, slug: &str) -> Result<Vec<Cell>, LabelError> {
    if cell.cell_type != CellType::Markdown {
        return Err(LabelError::NotMarkdown(cell.cell_type));
    }

    let lines: Vec<&str> = cell.source.lines().collect();
    let n = heading_line_count(&lines).ok_or(LabelError::InvalidHeadingFormat)?;

    let heading = lines[..n].join("\n");
    let remainder = lines[n..].join("\n");
    let remainder = remainder.trim();

    let mut cells = vec![
        Cell::markdown(heading),
        Cell::latex(latex::label(&latex::section_name(slug))),
    ];
    if !remainder.is_empty() {
        cells.push(Cell::markdown(remainder));
    }
    Ok(cells)
}
