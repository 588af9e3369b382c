//! Response mapper
//!
//! Rebuilds domain [`Route`]s from a decoded [`WireResponse`].
//!
//! The upstream section list encodes each leg positionally: a `move` record
//! travels from the nearest `point` before it to the nearest `point` after
//! it. Records of any other kind may sit in between and are skipped while
//! scanning. Whatever cannot be reconstructed (bad timestamps, a move with no
//! bounding point) is dropped and logged; mapping itself never fails.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use domain::{FARE_IC_CARD, FARE_REGULAR, GeoLocation, Route, Segment, TransportKind};
use thiserror::Error;
use tracing::debug;

use crate::wire::{RouteItem, RouteSection, WireCoord, WireFare, WireResponse};

/// Why a route item or move section was left out
#[derive(Debug, Error)]
enum Skip {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("unparseable {field}: {value:?}")]
    BadTimestamp { field: &'static str, value: String },

    #[error("arrival precedes departure")]
    Reversed,

    #[error("no point before move")]
    NoPrecedingPoint,

    #[error("no point after move")]
    NoFollowingPoint,
}

/// Map every reconstructable route item, stamping them with the current time
pub fn map_response(response: &WireResponse) -> Vec<Route> {
    map_response_at(response, Utc::now())
}

/// Map every reconstructable route item, stamping them with `searched_at`
pub fn map_response_at(response: &WireResponse, searched_at: DateTime<Utc>) -> Vec<Route> {
    let Some(items) = response.items.as_deref() else {
        debug!("Response has no items");
        return Vec::new();
    };

    let routes: Vec<Route> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match map_item(item, searched_at) {
            Ok(route) => Some(route),
            Err(reason) => {
                debug!(index, %reason, "Dropping route item");
                None
            },
        })
        .collect();

    debug!(items = items.len(), routes = routes.len(), "Mapped transit response");
    routes
}

fn map_item(item: &RouteItem, searched_at: DateTime<Utc>) -> Result<Route, Skip> {
    let summary = &item.summary;
    let movement = summary
        .movement
        .as_ref()
        .ok_or(Skip::Missing("summary.move"))?;

    let departure = parse_timestamp("summary.move.from_time", movement.from_time.as_deref())?;
    let arrival = parse_timestamp("summary.move.to_time", movement.to_time.as_deref())?;
    if arrival < departure {
        return Err(Skip::Reversed);
    }

    let from = summary
        .start
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .ok_or(Skip::Missing("summary.start.name"))?;
    let to = summary
        .goal
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .ok_or(Skip::Missing("summary.goal.name"))?;
    let total_minutes = movement.time.ok_or(Skip::Missing("summary.move.time"))?;
    let transfer_count = movement
        .transit_count
        .ok_or(Skip::Missing("summary.move.transit_count"))?;
    let fare = movement
        .fare
        .as_ref()
        .ok_or(Skip::Missing("summary.move.fare"))?;
    let total_fare = fare.unit_0.ok_or(Skip::Missing("summary.move.fare.unit_0"))?;

    let origin = summary.start.as_ref().and_then(|p| p.coord).and_then(to_location);
    let destination = summary.goal.as_ref().and_then(|p| p.coord).and_then(to_location);

    let route = Route::new(
        from,
        to,
        departure,
        arrival,
        total_minutes,
        total_fare,
        transfer_count,
    )
    .with_segments(map_segments(&item.sections))
    .with_searched_at(searched_at)
    .with_rank(summary.no.clone())
    .with_total_distance(movement.distance)
    .with_fares(fare_tiers(fare))
    .with_endpoints(origin, destination);

    if !route.endpoints_match_segments() {
        debug!(
            from = %route.from,
            to = %route.to,
            "Segment endpoints differ from route summary"
        );
    }

    Ok(route)
}

/// Fare map: `regular`, `ic_card` when reported, then other tiers under their wire keys
fn fare_tiers(fare: &WireFare) -> BTreeMap<String, u32> {
    let mut tiers: BTreeMap<String, u32> = fare
        .extra_tiers()
        .map(|(key, amount)| (key.to_string(), amount))
        .collect();
    if let Some(regular) = fare.unit_0 {
        tiers.insert(FARE_REGULAR.to_string(), regular);
    }
    if let Some(ic_card) = fare.unit_48 {
        tiers.insert(FARE_IC_CARD.to_string(), ic_card);
    }
    tiers
}

fn to_location(coord: WireCoord) -> Option<GeoLocation> {
    GeoLocation::new(coord.lat, coord.lon).ok()
}

fn map_segments(sections: &[RouteSection]) -> Vec<Segment> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, section)| section.is_move())
        .filter_map(|(index, section)| match map_move(sections, index, section) {
            Ok(segment) => Some(segment),
            Err(reason) => {
                debug!(index, %reason, "Skipping move section");
                None
            },
        })
        .collect()
}

fn map_move(sections: &[RouteSection], index: usize, section: &RouteSection) -> Result<Segment, Skip> {
    let from = preceding_point(sections, index)
        .and_then(|p| p.name.as_deref())
        .ok_or(Skip::NoPrecedingPoint)?;
    let to = following_point(sections, index)
        .and_then(|p| p.name.as_deref())
        .ok_or(Skip::NoFollowingPoint)?;

    let departure = parse_timestamp("from_time", section.from_time.as_deref())?;
    let arrival = parse_timestamp("to_time", section.to_time.as_deref())?;
    let duration = section.time.ok_or(Skip::Missing("time"))?;
    if arrival < departure {
        return Err(Skip::Reversed);
    }

    let kind = TransportKind::from_mode_tag(section.mode.as_deref());
    let transport = section.transport.as_ref();
    let distance = if kind == TransportKind::Walk {
        section.distance
    } else {
        None
    };

    Ok(Segment::new(kind, from, to, departure, arrival, duration)
        .with_line(section.line_name.clone())
        .with_direction(transport.and_then(|t| t.name.clone()))
        .with_fare(transport.and_then(|t| t.fare.as_ref()).and_then(|f| f.unit_0))
        .with_distance(distance)
        .with_color(transport.and_then(|t| t.color.clone())))
}

/// Nearest `point` strictly before `index`
fn preceding_point(sections: &[RouteSection], index: usize) -> Option<&RouteSection> {
    sections[..index].iter().rev().find(|s| s.is_point())
}

/// Nearest `point` strictly after `index`
fn following_point(sections: &[RouteSection], index: usize) -> Option<&RouteSection> {
    sections.get(index + 1..)?.iter().find(|s| s.is_point())
}

fn parse_timestamp(field: &'static str, raw: Option<&str>) -> Result<DateTime<FixedOffset>, Skip> {
    let raw = raw.ok_or(Skip::Missing(field))?;
    DateTime::parse_from_rfc3339(raw).map_err(|_| Skip::BadTimestamp {
        field,
        value: raw.to_string(),
    })
}
