//! Property-based tests for the response mapper
//!
//! Section lists are generated as random sequences of points, moves and
//! unrelated records; the mapper must pair every bounded move with its
//! nearest neighbouring points.

use integration_transit::{WireResponse, map_response};
use proptest::prelude::*;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Point,
    Move,
    Other,
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        3 => Just(Kind::Point),
        3 => Just(Kind::Move),
        1 => Just(Kind::Other),
    ]
}

fn build_sections(kinds: &[Kind]) -> Vec<Value> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| match kind {
            Kind::Point => json!({"type": "point", "name": format!("P{i}")}),
            Kind::Move => json!({
                "type": "move",
                "move": "local_train",
                "from_time": "2025-08-29T08:00:00+09:00",
                "to_time": "2025-08-29T08:10:00+09:00",
                "time": 10,
                "line_name": format!("L{i}")
            }),
            Kind::Other => json!({"type": "transfer", "name": format!("X{i}")}),
        })
        .collect()
}

fn build_response(sections: Vec<Value>) -> WireResponse {
    let doc = json!({
        "items": [{
            "summary": {
                "start": {"name": "Start"},
                "goal": {"name": "Goal"},
                "move": {
                    "transit_count": 0,
                    "fare": {"unit_0": 170},
                    "from_time": "2025-08-29T08:00:00+09:00",
                    "to_time": "2025-08-29T09:00:00+09:00",
                    "time": 60
                }
            },
            "sections": sections
        }]
    });
    serde_json::from_value(doc).unwrap()
}

/// Expected (from, to) per bounded move, by brute force
fn expected_pairs(kinds: &[Kind]) -> Vec<(String, String)> {
    kinds
        .iter()
        .enumerate()
        .filter(|(_, k)| matches!(k, Kind::Move))
        .filter_map(|(i, _)| {
            let before = (0..i).rev().find(|&j| matches!(kinds[j], Kind::Point))?;
            let after = (i + 1..kinds.len()).find(|&j| matches!(kinds[j], Kind::Point))?;
            Some((format!("P{before}"), format!("P{after}")))
        })
        .collect()
}

proptest! {
    #[test]
    fn moves_pair_with_nearest_points(kinds in proptest::collection::vec(kind_strategy(), 0..24)) {
        let routes = map_response(&build_response(build_sections(&kinds)));
        prop_assert_eq!(routes.len(), 1);

        let actual: Vec<(String, String)> = routes[0]
            .segments
            .iter()
            .map(|s| (s.from.clone(), s.to.clone()))
            .collect();
        prop_assert_eq!(actual, expected_pairs(&kinds));
    }

    #[test]
    fn segments_keep_section_order(kinds in proptest::collection::vec(kind_strategy(), 0..24)) {
        let routes = map_response(&build_response(build_sections(&kinds)));
        let lines: Vec<usize> = routes[0]
            .segments
            .iter()
            .filter_map(|s| s.line.as_deref()?.strip_prefix('L')?.parse().ok())
            .collect();
        prop_assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn arbitrary_timestamps_never_panic(from in ".{0,40}", to in ".{0,40}") {
        let doc = json!({
            "items": [{
                "summary": {
                    "start": {"name": "A"},
                    "goal": {"name": "B"},
                    "move": {
                        "transit_count": 0,
                        "fare": {"unit_0": 0},
                        "from_time": from,
                        "to_time": to,
                        "time": 0
                    }
                },
                "sections": [
                    {"type": "point", "name": "A"},
                    {"type": "move", "from_time": from, "to_time": to, "time": 0},
                    {"type": "point", "name": "B"}
                ]
            }]
        });
        let response: WireResponse = serde_json::from_value(doc).unwrap();
        let routes = map_response(&response);
        prop_assert!(routes.len() <= 1);
        for route in &routes {
            prop_assert!(route.departure_time <= route.arrival_time);
            for segment in &route.segments {
                prop_assert!(segment.departure_time <= segment.arrival_time);
            }
        }
    }
}
