//! Participant identifiers
//!
//! A participant is whatever name the admin typed in, trimmed of surrounding
//! whitespace. Names are case-sensitive: `"bob"` and `"Bob"` are two people.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A trimmed, case-sensitive participant name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Participant {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Trim every name, drop the ones left empty, and remove duplicates.
///
/// The first occurrence of each name wins, so the output keeps the order in
/// which the admin listed people.
pub fn normalize<I, S>(raw: I) -> Vec<Participant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(Participant::new)
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Parse the participant field of the admin form.
///
/// Accepts a JSON array of strings, or free text with one name per line
/// (commas also separate names).
pub fn parse_list(input: &str) -> Vec<Participant> {
    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        if let Ok(names) = serde_json::from_str::<Vec<String>>(trimmed) {
            return normalize(names);
        }
    }

    normalize(trimmed.split(['\n', ',']))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_participant_is_trimmed() {
        let p = Participant::new("  Alice \t");
        assert_eq!(p.as_str(), "Alice");
    }

    #[test]
    fn test_normalize_keeps_first_occurrence_order() {
        let names = normalize(["Carol", "Alice", "Carol", "Bob", "Alice"]);
        let names: Vec<&str> = names.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn test_normalize_trims_before_deduplicating() {
        let names = normalize(["Bob", " Bob ", "Bob\n"]);
        assert_eq!(names, vec![Participant::new("Bob")]);
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        let names = normalize(["bob", "Bob"]);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_normalize_drops_blank_entries() {
        let names = normalize(["", "   ", "Alice"]);
        assert_eq!(names, vec![Participant::new("Alice")]);
    }

    #[test]
    fn test_parse_list_json_array() {
        let names = parse_list(r#"["Alice", "Bob", "Alice"]"#);
        assert_eq!(
            names,
            vec![Participant::new("Alice"), Participant::new("Bob")]
        );
    }

    #[test]
    fn test_parse_list_lines_and_commas() {
        let names = parse_list("Alice\nBob, Carol\r\n\nDave");
        let names: Vec<&str> = names.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_parse_list_malformed_json_falls_back_to_text() {
        let names = parse_list("[Alice\nBob");
        let names: Vec<&str> = names.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["[Alice", "Bob"]);
    }
}
