// System status display — shows DB stats and per-namespace record counts.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::store::Store;

/// Display system status to the terminal.
pub async fn show(store: &Arc<dyn Store>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `brasa init` to set up the database.");
        return Ok(());
    }

    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let tracked_events = store.key_count("engagement:").await?;
    let rsvps = store.key_count("rsvp:").await?;
    let users = store.key_count("participation:").await?;

    println!("Tracked events: {}", tracked_events);
    if tracked_events == 0 {
        println!("  Run `brasa track <event-id> <action>` to start counting");
    }
    println!("RSVP records: {}", rsvps);
    println!("Users with participation: {}", users);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
