//! Autocomplete suggestion entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::SuggestionKind;

/// A station, landmark or address offered while the user types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Upstream identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Classified kind
    pub kind: SuggestionKind,
}

impl Suggestion {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        let s = Suggestion::new("2", "東京タワー", SuggestionKind::Landmark);
        assert_eq!(s.to_string(), "東京タワー (Landmark)");
    }

    #[test]
    fn serializes_kind_in_snake_case() {
        let s = Suggestion::new("1", "新宿", SuggestionKind::Station);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"新宿","kind":"station"}"#);
    }
}
