//! Combining notebooks into a book
//!
//! Takes notebooks that have already been loaded and ordered by the caller
//! and concatenates them into a single notebook, one chapter per notebook.

use crate::label::{LabelError, label_section};
use crate::links::{LinkError, LinkPolicy, notebook_links, try_rewrite_links};
use bookbook_nbformat::Notebook;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Errors that can occur while combining notebooks
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error("Failed to find a heading in notebook {slug}: {source}")]
    Label {
        slug: String,
        #[source]
        source: LabelError,
    },

    #[error("Invalid link in notebook {slug}: {source}")]
    Link {
        slug: String,
        #[source]
        source: LinkError,
    },

    #[error("Notebook {slug} has no cells")]
    EmptyNotebook { slug: String },

    #[error("Cannot derive a chapter name from path: {0}")]
    InvalidFileName(PathBuf),
}

/// Result type for combine operations
pub type Result<T> = std::result::Result<T, CombineError>;

/// One notebook of the book, named by its file stem
#[derive(Debug, Clone)]
pub struct Chapter {
    /// File stem of the notebook, used in `sec:<slug>` labels
    pub slug: String,
    /// The loaded notebook; its first cell must start with a heading
    pub notebook: Notebook,
}

impl Chapter {
    pub fn new(slug: impl Into<String>, notebook: Notebook) -> Self {
        Self {
            slug: slug.into(),
            notebook,
        }
    }

    /// Name a chapter after the stem of the path it was loaded from
    ///
    /// Only the path string is inspected; nothing is read from disk.
    pub fn from_path_stem(path: &Path, notebook: Notebook) -> Result<Self> {
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CombineError::InvalidFileName(path.to_path_buf()))?;
        Ok(Self::new(slug, notebook))
    }
}

/// Options for combining notebooks
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Rewrite notebook links in markdown cells to `\ref{}` macros
    pub rewrite_links: bool,
    /// What to do with notebook links that cannot be rewritten
    pub link_policy: LinkPolicy,
    /// Copy the first non-empty notebook metadata to the combined notebook
    pub copy_metadata: bool,
    /// Log a warning for links to notebooks that are not part of the book
    pub warn_dangling: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            rewrite_links: true,
            link_policy: LinkPolicy::Permissive,
            copy_metadata: true,
            warn_dangling: true,
        }
    }
}

/// A link to a notebook that is not one of the chapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    /// Chapter containing the link
    pub from: String,
    /// Slug the link points at
    pub slug: String,
}

/// Find links in markdown cells that point at notebooks missing from the book
pub fn dangling_references(chapters: &[Chapter]) -> Vec<DanglingRef> {
    let known: HashSet<&str> = chapters.iter().map(|c| c.slug.as_str()).collect();

    let mut dangling = Vec::new();
    for chapter in chapters {
        for cell in chapter.notebook.cells.iter().filter(|c| c.is_markdown()) {
            for link in notebook_links(&cell.source) {
                if !known.contains(link.slug.as_str()) {
                    dangling.push(DanglingRef {
                        from: chapter.slug.clone(),
                        slug: link.slug,
                    });
                }
            }
        }
    }
    dangling
}

/// Combine chapters, in the given order, into one notebook
///
/// The first cell of every chapter is split by [`label_section`] so its
/// heading carries a `\label{sec:<slug>}`; the other cells are appended as
/// they are. Markdown cells then have their notebook links rewritten
/// according to `options`.
pub fn combine_notebooks(
    chapters: impl IntoIterator<Item = Chapter>,
    options: &CombineOptions,
) -> Result<Notebook> {
    let chapters: Vec<Chapter> = chapters.into_iter().collect();

    if options.warn_dangling {
        for r in dangling_references(&chapters) {
            warn!(
                "Notebook {} links to {}.ipynb, which is not part of the book",
                r.from, r.slug
            );
        }
    }

    let mut combined = Notebook::new();
    let count = chapters.len();

    for chapter in chapters {
        let Chapter { slug, notebook } = chapter;
        debug!("Adding notebook: {} ({} cells)", slug, notebook.cells.len());

        let mut cells = notebook.cells.into_iter();
        let first = cells
            .next()
            .ok_or_else(|| CombineError::EmptyNotebook { slug: slug.clone() })?;

        let mut chapter_cells = label_section(&first, &slug).map_err(|source| {
            CombineError::Label {
                slug: slug.clone(),
                source,
            }
        })?;
        chapter_cells.extend(cells);

        if options.rewrite_links {
            for cell in chapter_cells.iter_mut().filter(|c| c.is_markdown()) {
                cell.source = try_rewrite_links(&cell.source, options.link_policy).map_err(
                    |source| CombineError::Link {
                        slug: slug.clone(),
                        source,
                    },
                )?;
            }
        }

        combined.cells.extend(chapter_cells);

        if options.copy_metadata && combined.metadata.is_empty() {
            combined.metadata = notebook.metadata;
        }
    }

    info!("Combined {} notebooks", count);
    Ok(combined)
}
