//! Wire model
//!
//! Typed representation of the exact JSON shape returned by the routing API.
//! Field names follow the upstream `snake_case` keys. Nothing here is
//! interpreted: timestamps stay strings and section kinds stay tags until
//! the [`mapper`](crate::mapper) looks at them.
//!
//! Decoding is lenient. One undecodable route item or suggestion is dropped
//! instead of failing the whole document. A malformed coordinate or `unit`
//! block decodes as `None`. An undecodable section keeps its `type` tag and
//! `name` (when those are readable) so a broken point still bounds its
//! neighbouring moves.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use tracing::warn;

/// Prefix shared by every fare-tier key (`unit_0`, `unit_48`, `unit_128_train`, ...)
pub const FARE_TIER_PREFIX: &str = "unit_";

/// Top-level route search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    /// Route options; `None` when upstream omitted the key
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Option<Vec<RouteItem>>,
    /// Unit metadata (informational only)
    #[serde(default, deserialize_with = "lenient_option")]
    pub unit: Option<WireUnit>,
}

impl WireResponse {
    /// Decode a response body
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Number of decodable route items
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }
}

/// One route option: an aggregate summary plus the ordered section list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteItem {
    #[serde(default)]
    pub summary: RouteSummary,
    /// Interleaved point and move records (plus anything else upstream adds)
    #[serde(default, deserialize_with = "lenient_sections")]
    pub sections: Vec<RouteSection>,
}

/// Aggregate endpoints, timing, fare and transfer count of a route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSummary {
    /// Upstream rank/label of this option
    pub no: Option<String>,
    pub start: Option<WirePoint>,
    pub goal: Option<WirePoint>,
    #[serde(rename = "move")]
    pub movement: Option<SummaryMove>,
}

/// A named location
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePoint {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub coord: Option<WireCoord>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WireCoord {
    pub lat: f64,
    pub lon: f64,
}

/// Aggregate movement of a whole route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryMove {
    pub transit_count: Option<u32>,
    pub fare: Option<WireFare>,
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    /// Elapsed minutes
    pub time: Option<u32>,
    /// Meters
    pub distance: Option<u32>,
}

/// Kind tag of a section record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// A named stop or waypoint
    Point,
    /// Travel between the surrounding points
    Move,
    /// Anything else; skipped when pairing points and moves
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of a route's `sections` list
///
/// Which fields are meaningful depends on [`SectionKind`]: points carry
/// `name`/`coord`, moves carry the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSection {
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub coord: Option<WireCoord>,
    pub transport: Option<TransportInfo>,
    /// Transport-mode tag (`local_train`, `bus`, `walk`, ...)
    #[serde(rename = "move")]
    pub mode: Option<String>,
    pub from_time: Option<String>,
    pub to_time: Option<String>,
    /// Elapsed minutes
    pub time: Option<u32>,
    /// Meters
    pub distance: Option<u32>,
    pub line_name: Option<String>,
}

impl RouteSection {
    /// Section carrying only the `type` tag and `name` of a raw record
    fn tag_only(raw: &serde_json::Value) -> Self {
        let kind = raw
            .get("type")
            .cloned()
            .and_then(|tag| serde_json::from_value(tag).ok())
            .unwrap_or_default();
        let name = raw.get("name").and_then(serde_json::Value::as_str);
        Self {
            kind,
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.kind == SectionKind::Point
    }

    #[must_use]
    pub fn is_move(&self) -> bool {
        self.kind == SectionKind::Move
    }
}

/// Vehicle details attached to a move section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportInfo {
    pub fare: Option<WireFare>,
    /// Hex line color
    pub color: Option<String>,
    /// Line or direction name
    pub name: Option<String>,
}

/// Fare tiers keyed by upstream code
///
/// Only the base (`unit_0`) and IC-card (`unit_48`) tiers are named; every
/// other key is kept verbatim in `other` so operator-specific tiers such as
/// `unit_128_train` survive without being enumerated here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireFare {
    pub unit_0: Option<u32>,
    pub unit_48: Option<u32>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl WireFare {
    /// Additional fare tiers with a non-negative integer amount
    pub fn extra_tiers(&self) -> impl Iterator<Item = (&str, u32)> {
        self.other.iter().filter_map(|(key, value)| {
            if !key.starts_with(FARE_TIER_PREFIX) {
                return None;
            }
            let amount = u32::try_from(value.as_u64()?).ok()?;
            Some((key.as_str(), amount))
        })
    }
}

/// Unit metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireUnit {
    pub currency: Option<String>,
    pub datum: Option<String>,
    pub coord_unit: Option<String>,
    pub distance: Option<String>,
    pub time: Option<String>,
}

/// Top-level autocomplete response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAutocompleteResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Option<Vec<WireSuggestion>>,
}

impl WireAutocompleteResponse {
    /// Decode a response body
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// One autocomplete record
#[derive(Debug, Clone, Deserialize)]
pub struct WireSuggestion {
    pub id: String,
    pub name: String,
    /// Free-text type tag (`station`, `landmark`, `address`, ...)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Decode a list element by element, dropping elements that fail to decode
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| {
        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index, error = %e, "Dropping undecodable list element");
                    None
                },
            })
            .collect()
    }))
}

/// Decode an optional value, treating a malformed one as absent
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed optional field");
            None
        },
    }))
}

/// Decode sections; an undecodable one keeps only its `type` tag and `name`
fn lenient_sections<'de, D>(deserializer: D) -> Result<Vec<RouteSection>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                warn!(index, error = %e, "Undecodable section reduced to its tag");
                RouteSection::tag_only(&value)
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_items_is_none() {
        let resp = WireResponse::from_json("{}").unwrap();
        assert!(resp.items.is_none());
        assert_eq!(resp.item_count(), 0);
    }

    #[test]
    fn test_null_items_is_none() {
        let resp = WireResponse::from_json(r#"{"items": null}"#).unwrap();
        assert!(resp.items.is_none());
    }

    #[test]
    fn test_section_kinds() {
        let json = r#"[
            {"type": "point", "name": "押上"},
            {"type": "move", "move": "local_train"},
            {"type": "transfer"},
            {"name": "untagged"}
        ]"#;
        let sections: Vec<RouteSection> = serde_json::from_str(json).unwrap();
        assert_eq!(sections[0].kind, SectionKind::Point);
        assert_eq!(sections[1].kind, SectionKind::Move);
        assert_eq!(sections[1].mode.as_deref(), Some("local_train"));
        assert_eq!(sections[2].kind, SectionKind::Other);
        assert_eq!(sections[3].kind, SectionKind::Other);
    }

    #[test]
    fn test_undecodable_item_is_dropped() {
        let json = r#"{
            "items": [
                {"summary": {"no": "1"}, "sections": []},
                {"summary": {"move": {"time": "twelve"}}, "sections": []},
                {"summary": {"no": "3"}, "sections": []}
            ]
        }"#;
        let resp = WireResponse::from_json(json).unwrap();
        let items = resp.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].summary.no.as_deref(), Some("1"));
        assert_eq!(items[1].summary.no.as_deref(), Some("3"));
    }

    #[test]
    fn test_undecodable_section_keeps_position() {
        let json = r#"{
            "summary": {},
            "sections": [
                {"type": "point", "name": "A"},
                {"type": "move", "time": -5},
                {"type": "point", "name": "B"}
            ]
        }"#;
        let item: RouteItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.sections.len(), 3);
        assert!(item.sections[1].is_move());
        assert!(item.sections[1].time.is_none());
        assert!(item.sections[2].is_point());
    }

    #[test]
    fn test_undecodable_point_stays_a_named_point() {
        let json = r#"[
            {"type": "point", "name": "M", "distance": "far"},
            {"type": "point", "name": 42, "time": "soon"},
            {"type": 7, "name": "X", "time": "soon"}
        ]"#;
        let item: RouteItem =
            serde_json::from_str(&format!(r#"{{"sections": {json}}}"#)).unwrap();

        assert!(item.sections[0].is_point());
        assert_eq!(item.sections[0].name.as_deref(), Some("M"));
        assert!(item.sections[1].is_point());
        assert!(item.sections[1].name.is_none());
        assert_eq!(item.sections[2].kind, SectionKind::Other);
    }

    #[test]
    fn test_malformed_coord_is_none() {
        let json = r#"{
            "start": {"name": "A", "coord": {"lat": 35.7}},
            "goal": {"name": "B", "coord": {"lat": "35.6", "lon": 139.7}}
        }"#;
        let summary: RouteSummary = serde_json::from_str(json).unwrap();
        let start = summary.start.unwrap();
        assert_eq!(start.name.as_deref(), Some("A"));
        assert!(start.coord.is_none());
        assert!(summary.goal.unwrap().coord.is_none());

        let section: RouteSection =
            serde_json::from_str(r#"{"type": "point", "name": "M", "coord": {"lat": "35.7"}}"#)
                .unwrap();
        assert!(section.is_point());
        assert!(section.coord.is_none());
    }

    #[test]
    fn test_malformed_unit_is_none() {
        let resp = WireResponse::from_json(
            r#"{"items": [{"summary": {"no": "1"}}], "unit": {"currency": 392}}"#,
        )
        .unwrap();
        assert!(resp.unit.is_none());
        assert_eq!(resp.item_count(), 1);

        let resp = WireResponse::from_json(r#"{"items": [], "unit": {"currency": "JPY"}}"#)
            .unwrap();
        assert_eq!(resp.unit.and_then(|u| u.currency).as_deref(), Some("JPY"));
    }

    #[test]
    fn test_fare_keeps_unknown_tiers() {
        let json = r#"{
            "unit_0": 210,
            "unit_48": 209,
            "unit_128_train": 200,
            "unit_133_train": 190,
            "fare_season": "normal"
        }"#;
        let fare: WireFare = serde_json::from_str(json).unwrap();
        assert_eq!(fare.unit_0, Some(210));
        assert_eq!(fare.unit_48, Some(209));

        let extra: Vec<(&str, u32)> = fare.extra_tiers().collect();
        assert_eq!(extra, vec![("unit_128_train", 200), ("unit_133_train", 190)]);
    }

    #[test]
    fn test_fare_ignores_non_integer_tiers() {
        let json = r#"{"unit_0": 210, "unit_7": "n/a", "unit_9": -1}"#;
        let fare: WireFare = serde_json::from_str(json).unwrap();
        assert!(fare.unit_48.is_none());
        assert_eq!(fare.extra_tiers().count(), 0);
    }

    #[test]
    fn test_autocomplete_drops_incomplete_items() {
        let json = r#"{"items": [
            {"id": "1", "name": "新宿", "type": "station"},
            {"name": "no id"},
            {"id": "3", "name": "渋谷"}
        ]}"#;
        let resp = WireAutocompleteResponse::from_json(json).unwrap();
        let items = resp.items.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].kind.is_none());
    }

    #[test]
    fn test_invalid_document_is_error() {
        assert!(WireResponse::from_json("not json").is_err());
        assert!(WireResponse::from_json(r#"{"items": "nope"}"#).is_err());
    }
}
