//! Serde helpers for nbformat multiline strings
//!
//! nbformat stores text either as a single string or as a list of strings
//! that are joined without separators.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Multiline {
    Single(String),
    Lines(Vec<String>),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Multiline::deserialize(deserializer)? {
        Multiline::Single(s) => s,
        Multiline::Lines(lines) => lines.concat(),
    })
}

/// Write text as a list of lines, each keeping its trailing newline
pub fn serialize<S>(source: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(source.split_inclusive('\n'))
}
