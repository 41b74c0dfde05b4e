// Output formatting — terminal display for engagement, regions, and badges.

pub mod terminal;

pub use terminal::{show_badges, show_counters, show_regions, show_report};
