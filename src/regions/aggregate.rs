// Per-region event aggregation.
//
// Groups events by Brazilian state code, sums RSVP confirmations per group,
// and ranks regions by confirmation volume. Pure functions — the result is
// fully determined by the input, recomputed from scratch on every call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A mobilization event as provided by the event-list source.
///
/// RSVPs are bucketed by participant category (pedestrian, motorcyclist,
/// truck driver, ...); the categories themselves are opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Brazilian state code (e.g. "SP"). Empty means unknown.
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub rsvps: HashMap<String, u32>,
}

impl Event {
    /// Sum of RSVP counts across all participant categories.
    pub fn total_confirmations(&self) -> u32 {
        self.rsvps.values().sum()
    }
}

/// Aggregated totals for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalTotal {
    pub region: String,
    pub total_events: u32,
    pub total_confirmations: u32,
}

/// Fold a list of events into per-region totals.
///
/// Events with a missing/empty region are excluded from all groups rather
/// than collected into an "unknown" bucket — a placeholder bucket would
/// rank against real state codes in `top_regions`.
pub fn aggregate_by_region(events: &[Event]) -> HashMap<String, RegionalTotal> {
    let mut totals: HashMap<String, RegionalTotal> = HashMap::new();
    let mut skipped = 0u32;

    for event in events {
        if event.region.is_empty() {
            skipped += 1;
            continue;
        }
        let entry = totals
            .entry(event.region.clone())
            .or_insert_with(|| RegionalTotal {
                region: event.region.clone(),
                total_events: 0,
                total_confirmations: 0,
            });
        entry.total_events += 1;
        entry.total_confirmations += event.total_confirmations();
    }

    if skipped > 0 {
        debug!(skipped, "Excluded events with no region from aggregation");
    }

    totals
}

/// Rank regions descending by confirmation volume.
///
/// Ties are broken by region code ascending. Returns at most `n` entries.
pub fn top_regions(totals: &HashMap<String, RegionalTotal>, n: usize) -> Vec<RegionalTotal> {
    let mut ranked: Vec<RegionalTotal> = totals.values().cloned().collect();
    ranked.sort_by(|a, b| {
        b.total_confirmations
            .cmp(&a.total_confirmations)
            .then_with(|| a.region.cmp(&b.region))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, region: &str, confirmations: u32) -> Event {
        Event {
            id: id.to_string(),
            region: region.to_string(),
            date: String::new(),
            time: String::new(),
            rsvps: HashMap::from([("pedestrian".to_string(), confirmations)]),
        }
    }

    #[test]
    fn test_sp_rj_scenario() {
        let events = vec![
            event("a", "SP", 10),
            event("b", "SP", 20),
            event("c", "SP", 5),
            event("d", "RJ", 100),
        ];
        let totals = aggregate_by_region(&events);

        assert_eq!(totals["SP"].total_events, 3);
        assert_eq!(totals["SP"].total_confirmations, 35);
        assert_eq!(totals["RJ"].total_events, 1);
        assert_eq!(totals["RJ"].total_confirmations, 100);

        let top = top_regions(&totals, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].region, "RJ");
    }

    #[test]
    fn test_multi_category_rsvps_are_summed() {
        let mut e = event("a", "MG", 10);
        e.rsvps.insert("motorcyclist".to_string(), 7);
        e.rsvps.insert("truck_driver".to_string(), 3);

        let totals = aggregate_by_region(&[e]);
        assert_eq!(totals["MG"].total_confirmations, 20);
    }

    #[test]
    fn test_empty_region_is_excluded() {
        let events = vec![event("a", "", 50), event("b", "BA", 5)];
        let totals = aggregate_by_region(&events);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["BA"].total_confirmations, 5);
    }

    #[test]
    fn test_order_independent() {
        let mut events = vec![
            event("a", "SP", 10),
            event("b", "RJ", 100),
            event("c", "SP", 20),
        ];
        let forward = aggregate_by_region(&events);
        events.reverse();
        let backward = aggregate_by_region(&events);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_tie_broken_by_region_code() {
        let events = vec![event("a", "RS", 10), event("b", "CE", 10)];
        let totals = aggregate_by_region(&events);
        let top = top_regions(&totals, 2);
        assert_eq!(top[0].region, "CE");
        assert_eq!(top[1].region, "RS");
    }

    #[test]
    fn test_top_respects_n() {
        let events = vec![
            event("a", "SP", 3),
            event("b", "RJ", 2),
            event("c", "MG", 1),
        ];
        let totals = aggregate_by_region(&events);
        assert_eq!(top_regions(&totals, 2).len(), 2);
        assert_eq!(top_regions(&totals, 10).len(), 3);
        assert!(top_regions(&totals, 0).is_empty());
    }
}
