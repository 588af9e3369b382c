//! Autocomplete mapper

use domain::{Suggestion, SuggestionKind};

use crate::wire::WireAutocompleteResponse;

/// Map suggestion records, classifying each by its type tag
///
/// Total: a missing `items` list yields no suggestions, and unrecognised or
/// absent tags classify as [`SuggestionKind::Station`].
pub fn map_suggestions(response: &WireAutocompleteResponse) -> Vec<Suggestion> {
    response
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| {
            Suggestion::new(
                item.id.clone(),
                item.name.clone(),
                SuggestionKind::from_type_tag(item.kind.as_deref()),
            )
        })
        .collect()
}
