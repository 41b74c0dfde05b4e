use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use brasa::badges;
use brasa::config::Config;
use brasa::dedup::{self, ClientProfile};
use brasa::engagement::{self, ActionKind, IntensityWeights};
use brasa::mirror;
use brasa::output;
use brasa::regions::{aggregate_by_region, top_regions, Event};
use brasa::status;
use brasa::store::{SqliteStore, Store};

/// Brasa: engagement and mobilization analytics for civic protest events.
///
/// Tracks per-event engagement (the "Chama do Povo" indicator), aggregates
/// mobilization by state, evaluates milestone badges, and checks whether
/// the platform's domain looks blocked.
#[derive(Parser)]
#[command(name = "brasa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the local database
    Init,

    /// Record an engagement action for an event
    Track {
        /// The event identifier
        event_id: String,
        /// The action kind: view, share, or confirm
        #[arg(value_enum)]
        action: ActionKind,
    },

    /// Submit an RSVP for an event (deduplicated per device)
    Rsvp {
        /// The event identifier
        event_id: String,
        /// Participant category (e.g. pedestrian, motorcyclist, truck-driver)
        participant_type: String,
        /// Client user agent (fingerprint input)
        #[arg(long, default_value = "brasa-cli")]
        user_agent: String,
        /// Client locale (fingerprint input)
        #[arg(long, default_value = "pt-BR")]
        language: String,
        /// Screen width in pixels (fingerprint input)
        #[arg(long, default_value = "1920")]
        width: u32,
        /// Screen height in pixels (fingerprint input)
        #[arg(long, default_value = "1080")]
        height: u32,
        /// Timezone offset in minutes (fingerprint input)
        #[arg(long, default_value = "180")]
        tz_offset: i32,
        /// Canvas rendering digest (fingerprint input)
        #[arg(long, default_value = "")]
        canvas_digest: String,
    },

    /// Aggregate events by state and show the ranking
    Regions {
        /// Path to a JSON file with the event list
        #[arg(long)]
        events: String,
        /// How many regions to show (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Record that a user attended an event in a state
    Attend {
        /// The user identifier
        user_id: String,
        /// Brazilian state code (e.g. SP)
        state: String,
    },

    /// Record that a user shared an event
    Share {
        /// The user identifier
        user_id: String,
    },

    /// Evaluate a user's milestone badges
    Badges {
        /// The user identifier
        user_id: String,
    },

    /// Check whether the platform origin looks blocked
    Probe,

    /// Show system status (DB stats, record counts)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brasa=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Brasa database...");
            SqliteStore::initialize(&config.db_path)?;
            println!("Database initialized at: {}", config.db_path);
        }

        Commands::Track { event_id, action } => {
            let store = open_store(&config)?;
            let weights = IntensityWeights::default();
            let counters =
                engagement::update_counters(store.as_ref(), &event_id, action, &weights).await?;
            output::show_counters(&counters);
        }

        Commands::Rsvp {
            event_id,
            participant_type,
            user_agent,
            language,
            width,
            height,
            tz_offset,
            canvas_digest,
        } => {
            let store = open_store(&config)?;
            let profile = ClientProfile {
                user_agent,
                language,
                screen_width: width,
                screen_height: height,
                timezone_offset_min: tz_offset,
                canvas_digest,
            };
            let fingerprint = dedup::compute_fingerprint(&profile);

            if dedup::has_submitted(store.as_ref(), &event_id, &fingerprint).await? {
                println!("This device already confirmed attendance for {}.", event_id);
                return Ok(());
            }

            dedup::mark_submitted(store.as_ref(), &event_id, &participant_type, &fingerprint)
                .await?;
            let weights = IntensityWeights::default();
            let counters = engagement::update_counters(
                store.as_ref(),
                &event_id,
                ActionKind::Confirm,
                &weights,
            )
            .await?;
            println!("RSVP recorded ({}).", participant_type);
            output::show_counters(&counters);
        }

        Commands::Regions { events, top } => {
            let raw = std::fs::read_to_string(&events)
                .with_context(|| format!("Failed to read event list from {}", events))?;
            let events: Vec<Event> = serde_json::from_str(&raw)
                .context("Event list is not valid JSON (expected an array of events)")?;
            let totals = aggregate_by_region(&events);
            let ranked = top_regions(&totals, top);
            output::show_regions(&ranked);
        }

        Commands::Attend { user_id, state } => {
            let store = open_store(&config)?;
            let mut participation = badges::load_participation(store.as_ref(), &user_id).await?;
            participation.events_attended += 1;
            participation.states_visited.insert(state.to_uppercase());
            badges::save_participation(store.as_ref(), &participation).await?;
            println!(
                "Attendance recorded: {} events, {} states.",
                participation.events_attended,
                participation.states_visited.len()
            );
            notify_milestones(store.as_ref(), &user_id).await?;
        }

        Commands::Share { user_id } => {
            let store = open_store(&config)?;
            let mut participation = badges::load_participation(store.as_ref(), &user_id).await?;
            participation.shares_count += 1;
            badges::save_participation(store.as_ref(), &participation).await?;
            println!("Share recorded: {} total.", participation.shares_count);
            notify_milestones(store.as_ref(), &user_id).await?;
        }

        Commands::Badges { user_id } => {
            let store = open_store(&config)?;
            let participation = badges::load_participation(store.as_ref(), &user_id).await?;
            let before = badges::load_earned(store.as_ref(), &user_id).await?;
            let after = badges::evaluate_badges(&participation);
            let new = badges::newly_earned(&before, &after);
            output::show_badges(&participation, &after, &new);
            badges::save_earned(store.as_ref(), &user_id, &after).await?;
        }

        Commands::Probe => {
            config.require_origin()?;
            let client = reqwest::Client::builder()
                .user_agent("brasa/0.1 (reachability-probe)")
                .build()
                .context("Failed to build HTTP client")?;
            let report = mirror::detect_censorship(&client, &config).await;
            output::show_report(&report);
        }

        Commands::Status => {
            let store = open_store(&config)?;
            status::show(&store, &config.db_path).await?;
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    Ok(Arc::new(SqliteStore::open(&config.db_path)?))
}

/// Evaluate badges after a participation change and announce any newly
/// earned ones (the milestone-notification trigger).
async fn notify_milestones(store: &dyn Store, user_id: &str) -> Result<()> {
    let participation = badges::load_participation(store, user_id).await?;
    let before = badges::load_earned(store, user_id).await?;
    let after = badges::evaluate_badges(&participation);
    let new = badges::newly_earned(&before, &after);

    if !new.is_empty() {
        output::show_badges(&participation, &after, &new);
    }
    badges::save_earned(store, user_id, &after).await?;
    Ok(())
}
