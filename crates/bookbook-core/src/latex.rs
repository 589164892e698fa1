//! LaTeX cross-reference macros
//!
//! The exact byte form of these macros is what the typesetting stage matches
//! labels and references on.

/// Prefix of labels attached to notebook (chapter) headings
pub const SECTION_PREFIX: &str = "sec:";

/// Label name for a notebook, e.g. `sec:01-intro`
pub fn section_name(slug: &str) -> String {
    format!("{SECTION_PREFIX}{slug}")
}

/// `\label{<name>}`
pub fn label(name: &str) -> String {
    format!("\\label{{{name}}}")
}

/// `\ref{<name>}`
pub fn reference(name: &str) -> String {
    format!("\\ref{{{name}}}")
}
