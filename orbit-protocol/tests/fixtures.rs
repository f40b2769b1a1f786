//! Decode the captured API, live feed, and TLE fixtures end to end

use orbit_protocol::*;
use orbit_types::prelude::*;

const CATALOG: &str = include_str!("../test_fixtures/satellites_page.json");
const LIVE_FEED: &str = include_str!("../test_fixtures/live_feed.jsonl");
const TLE_FILE: &str = include_str!("../test_fixtures/stations.tle");
const POSITIONS: &str = include_str!("../test_fixtures/positions_page.json");

fn session_start() -> UtcTimestamp {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

#[test]
fn satellites_page() {
    let recs = parse_catalog(CATALOG, session_start()).unwrap();
    assert_eq!(recs.len(), 4);

    let (ok, failed): (Vec<_>, Vec<_>) = recs.into_iter().partition(|r| r.is_ok());
    assert_eq!(ok.len(), 3);
    assert_eq!(failed.len(), 1);

    let objs: Vec<TrackedObject> = ok.into_iter().map(Result::unwrap).collect();
    let kinds: Vec<SatelliteKind> = objs.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![SatelliteKind::Iss, SatelliteKind::Starlink, SatelliteKind::Gps]
    );

    assert!(objs[0].record.elements().is_some());
    let starlink = objs[1].record.elements().unwrap();
    assert_eq!(
        starlink.epoch,
        "2026-01-01T12:00:00Z".parse::<UtcTimestamp>().unwrap()
    );
    assert!(objs[2].record.sample().is_some());
}

#[test]
fn live_feed() {
    let msgs: Vec<LiveMessage> = LIVE_FEED
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| parse_live_message(l).unwrap())
        .collect();
    assert_eq!(msgs.len(), 5);
    assert_eq!(msgs[0], LiveMessage::Heartbeat);

    let positions: Vec<&LivePosition> = msgs
        .iter()
        .filter_map(|m| match m {
            LiveMessage::Position(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(positions.len(), 2);
    assert!(positions[1].timestamp > positions[0].timestamp);

    assert!(matches!(&msgs[2], LiveMessage::Status(s) if !s.is_active));
    assert_eq!(msgs[4], LiveMessage::Unsupported("debris_alert".to_owned()));
}

#[test]
fn tle_file() {
    let (rest, set) = parse_unstructured_tle_set(TLE_FILE).unwrap();
    assert!(rest.is_empty());
    assert_eq!(set.len(), 2);
    for tle in set.iter() {
        let el = parse_tle_elements(tle).unwrap();
        assert!(el.mean_motion > 0.0);
        assert!(el.eccentricity_or_circular() < 1.0);
    }
}

#[test]
fn positions_page() {
    let positions = parse_positions(POSITIONS).unwrap();
    assert_eq!(positions.len(), 3);
    assert_eq!(positions[0].satellite_id(), SatelliteId::new(28474));
    assert_eq!(positions[0].range_km, Some(21050.0));
    assert_eq!(positions[1].azimuth_degrees, None);
    assert_eq!(
        positions[1].sample().timestamp,
        "2026-01-01T00:00:10Z".parse::<UtcTimestamp>().unwrap()
    );
}
