// Terminal rendering with colored output.
//
// These are display-only helpers; all numbers are computed by the
// subsystem modules and passed in as-is.

use colored::Colorize;

use crate::badges::{badge_by_id, UserParticipation};
use crate::engagement::{EngagementCounters, IntensityTier};
use crate::mirror::CensorshipReport;
use crate::regions::RegionalTotal;

/// Display an event's engagement counters with an intensity bar.
pub fn show_counters(counters: &EngagementCounters) {
    let tier = IntensityTier::from_intensity(counters.intensity);

    println!(
        "\n{}",
        format!("=== Chama do Povo: {} ===", counters.event_id).bold()
    );
    println!(
        "  views: {}  shares: {}  confirmations: {}",
        counters.views, counters.shares, counters.confirmations
    );

    let bar_width: usize = 20;
    let filled = (counters.intensity as usize * bar_width) / 100;
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled));

    // Color the bar based on intensity
    let colored_bar = if counters.intensity >= 80 {
        bar.bright_red()
    } else if counters.intensity >= 40 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    };

    println!(
        "  {} {}/100 {}",
        colored_bar,
        counters.intensity,
        tier.as_str().bold()
    );
}

/// Display ranked regional totals as a table.
pub fn show_regions(ranked: &[RegionalTotal]) {
    if ranked.is_empty() {
        println!("No events with a region to aggregate.");
        return;
    }

    println!("\n{}", "=== Mobilização por estado ===".bold());
    println!("  {:<4} {:>8} {:>14}", "UF", "events", "confirmations");
    for (i, total) in ranked.iter().enumerate() {
        let line = format!(
            "  {:<4} {:>8} {:>14}",
            total.region, total.total_events, total.total_confirmations
        );
        if i == 0 {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line);
        }
    }
}

/// Display a user's earned badges, highlighting the newly earned ones.
pub fn show_badges(
    participation: &UserParticipation,
    earned: &std::collections::BTreeSet<String>,
    new: &std::collections::BTreeSet<String>,
) {
    println!(
        "\n{}",
        format!("=== Conquistas de {} ===", participation.user_id).bold()
    );
    println!(
        "  events: {}  shares: {}  states: {}",
        participation.events_attended,
        participation.shares_count,
        participation.states_visited.len()
    );

    if earned.is_empty() {
        println!("  No badges earned yet.");
        return;
    }

    for id in earned {
        let Some(badge) = badge_by_id(id) else {
            continue;
        };
        let label = format!("{} {} — {}", badge.icon, badge.name, badge.description);
        if new.contains(id) {
            println!("  {} {}", label.bold().bright_green(), "NOVA!".bright_green());
        } else {
            println!("  {}", label);
        }
    }
}

/// Display the censorship heuristic report.
pub fn show_report(report: &CensorshipReport) {
    println!("\n{}", "=== Verificação de acesso ===".bold());
    if report.is_blocked {
        println!("  {}", "Possível interferência detectada".bright_red().bold());
        for e in &report.evidence {
            println!("  - {}", e);
        }
        for r in &report.recommendations {
            println!("  {}", r.bright_yellow());
        }
        println!(
            "  {}",
            "Heurística de melhor esforço — não é uma confirmação de bloqueio.".dimmed()
        );
    } else {
        println!("  {}", "Nenhum sinal de bloqueio".bright_green());
    }
}
