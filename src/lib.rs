// Brasa: engagement and mobilization analytics for civic protest events.
//
// This is the library root. Each module corresponds to a major subsystem
// of the mobilization core.

pub mod badges;
pub mod config;
pub mod dedup;
pub mod engagement;
pub mod mirror;
pub mod output;
pub mod regions;
pub mod status;
pub mod store;
