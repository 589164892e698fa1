//! Notebook link rewriting
//!
//! Markdown links between notebooks of the same book are turned into LaTeX
//! cross-references:
//!
//! - `[text](01-intro.ipynb)` becomes `\ref{sec:01-intro}`
//! - `[text](01-intro.ipynb#Some-heading)` becomes `\ref{some-heading}`
//!
//! Links with a URL scheme (`https://...`) and anything that is not a
//! notebook reference are left exactly as written.

use crate::latex;
use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Code spans and fenced code blocks, or `[label](target)` /
/// `[label](target "title")`.
///
/// Alternation is leftmost-first: whichever construct starts first wins, so a
/// link inside backticks is consumed as code, while a code span inside a link
/// label stays part of the link. The label may hold one level of balanced
/// brackets. A leading `!` (image) or `\` (escaped bracket) is captured so
/// those can be skipped.
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<code>(?s:```.*?```|~~~.*?~~~)|`[^`\n]*`)",
        r"|(?P<prefix>\\|!)?\[(?P<label>(?:[^\[\]]|\[[^\[\]]*\])*)\]",
        r#"\(\s*(?P<target>[^)\s]+)(?:\s+"[^"]*")?\s*\)"#,
    ))
    .unwrap()
});

/// `<slug>.ipynb` or `<slug>.ipynb#<fragment>` where the slug is a bare file stem
static NOTEBOOK_TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/\\#?\s]+)\.ipynb(?:#(.+))?$").unwrap());

const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// How to treat link targets that mention a notebook but cannot be rewritten
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Leave them unchanged
    #[default]
    Permissive,
    /// Report them as errors
    Strict,
}

/// Errors from strict link rewriting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Malformed notebook link target: {target}")]
    MalformedTarget { target: String },
}

/// A link to another notebook in the same book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRef {
    /// File stem of the target notebook
    pub slug: String,
    /// Heading anchor inside the target notebook, as written in the link
    pub fragment: Option<String>,
}

impl NotebookRef {
    /// LaTeX label this link should point at
    pub fn label_name(&self) -> String {
        match &self.fragment {
            Some(fragment) => fragment.to_lowercase(),
            None => latex::section_name(&self.slug),
        }
    }

    /// The `\ref{...}` macro replacing the link
    pub fn to_latex(&self) -> String {
        latex::reference(&self.label_name())
    }
}

/// What a link target points at
#[derive(Debug, Clone, PartialEq, Eq)]
enum LinkTarget {
    External,
    Notebook(NotebookRef),
    /// Mentions a notebook but isn't a bare `<slug>.ipynb[#fragment]`
    Malformed,
    Other,
}

fn classify_target(target: &str) -> LinkTarget {
    // Only absolute URLs parse without a base
    if Url::parse(target).is_ok() {
        return LinkTarget::External;
    }

    if let Some(caps) = NOTEBOOK_TARGET_RE.captures(target) {
        return LinkTarget::Notebook(NotebookRef {
            slug: caps[1].to_string(),
            fragment: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }

    if target.contains(NOTEBOOK_EXTENSION) {
        LinkTarget::Malformed
    } else {
        LinkTarget::Other
    }
}

/// Classify one `MARKUP_RE` match; code, images and escaped brackets are
/// never links
fn classify_match(caps: &Captures<'_>) -> LinkTarget {
    match (caps.name("prefix"), caps.name("target")) {
        (None, Some(target)) => classify_target(target.as_str()),
        _ => LinkTarget::Other,
    }
}

/// Rewrite links to other notebooks into LaTeX `\ref{}` macros
///
/// Text without notebook links is returned unchanged, and so is every link
/// that is not a notebook reference.
pub fn rewrite_links(text: &str) -> String {
    MARKUP_RE
        .replace_all(text, |caps: &Captures<'_>| match classify_match(caps) {
            LinkTarget::Notebook(r) => r.to_latex(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Rewrite links, optionally rejecting malformed notebook targets
///
/// With [`LinkPolicy::Permissive`] this is [`rewrite_links`]. With
/// [`LinkPolicy::Strict`] the first target that mentions `.ipynb` without
/// being a bare `<slug>.ipynb` or `<slug>.ipynb#<fragment>` is an error.
pub fn try_rewrite_links(text: &str, policy: LinkPolicy) -> Result<String, LinkError> {
    if policy == LinkPolicy::Strict {
        for caps in MARKUP_RE.captures_iter(text) {
            if classify_match(&caps) == LinkTarget::Malformed {
                return Err(LinkError::MalformedTarget {
                    target: caps["target"].to_string(),
                });
            }
        }
    }
    Ok(rewrite_links(text))
}

/// All links to other notebooks in the text, in order of appearance
pub fn notebook_links(text: &str) -> Vec<NotebookRef> {
    MARKUP_RE
        .captures_iter(text)
        .filter_map(|caps| match classify_match(&caps) {
            LinkTarget::Notebook(r) => Some(r),
            _ => None,
        })
        .collect()
}
