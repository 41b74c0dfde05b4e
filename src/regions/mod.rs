// Regional aggregation — fold events into per-state totals and rank them.

pub mod aggregate;

pub use aggregate::{aggregate_by_region, top_regions, Event, RegionalTotal};
