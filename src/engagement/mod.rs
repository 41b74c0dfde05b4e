// Engagement scoring — the "Chama do Povo" intensity indicator.
//
// Tracks per-event view/share/confirmation counters and derives a bounded
// 0-100 intensity score with a discrete tier label.

pub mod counters;
pub mod intensity;

pub use counters::{load_counters, update_counters, ActionKind, EngagementCounters};
pub use intensity::{compute_intensity, IntensityTier, IntensityWeights};
