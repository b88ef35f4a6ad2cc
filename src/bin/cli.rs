//! Iftar Tracker CLI
//!
//! Browse, vote on, and submit Cumilla iftar listings from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use iftar_tracker::{
    app::{App, VoteOutcome},
    config,
    error::Result,
    models::{Mosque, NewMosque, VoteKind},
    services::{Backend, RestBackend},
    storage::{JsonVoteLedger, VoteLedger},
};

/// Iftar Tracker - Cumilla mosque iftar listings
#[derive(Parser, Debug)]
#[command(
    name = "iftar",
    version,
    about = "Community tracker for mosque iftar offerings in Cumilla"
)]
struct Cli {
    /// Path to storage directory containing config, seed, and the vote ledger
    #[arg(short, long, default_value = "data")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entries, ranked by net credibility score
    List {
        /// Filter by a name or location substring
        #[arg(long)]
        search: Option<String>,

        /// Print the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Cast a credibility vote for an entry
    Vote {
        /// Entry identifier
        id: String,

        /// "true" or "fake"
        kind: VoteKind,
    },

    /// Submit a new entry
    Add {
        /// Mosque name
        #[arg(long)]
        name: String,

        /// Location label (area or address)
        #[arg(long)]
        location: String,

        /// The mosque serves biryani
        #[arg(long)]
        biryani: bool,

        /// Menu items, comma separated
        #[arg(long, value_delimiter = ',')]
        menu: Vec<String>,

        /// Latitude
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude
        #[arg(long)]
        longitude: Option<f64>,
    },

    /// Watch the backend and re-render on every change
    #[cfg(feature = "watch")]
    Watch {
        /// Seconds between change polls (default from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Validate configuration and seed data
    Validate,

    /// Show storage and backend status
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_entries(entries: &[Mosque]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    for mosque in entries {
        println!(
            "{}",
            mosque.format("[{id}] {name} | {location} | true {true_count} / fake {fake_count} (net {net})")
        );
        if !mosque.menu_items.is_empty() {
            println!("{}", mosque.format("      menu: {menu}"));
        }
        if let Some(map) = mosque.map_url() {
            println!("      map: {map}");
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Iftar tracker starting...");

    let config = config::load_config(&cli.storage_dir.join("config.toml"));
    let seed = config::load_seed(&cli.storage_dir.join("seed.toml"));

    let backend: Option<Arc<dyn Backend>> = match config::resolve_endpoint(&config) {
        Some(endpoint) => Some(Arc::new(RestBackend::new(&endpoint, &config.client)?)),
        None => {
            log::warn!("Backend not configured; running in seed-only mode");
            None
        }
    };

    let ledger = Arc::new(JsonVoteLedger::open(cli.storage_dir.join("votes.json")).await?);
    let mut app = App::new(seed.clone(), backend.clone(), ledger.clone());

    match cli.command {
        Command::List { search, json } => {
            app.refresh().await?;
            let entries = app.search(search.as_deref().unwrap_or(""));

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }

        Command::Vote { id, kind } => {
            app.refresh().await?;

            match app.cast_vote(&id, kind).await? {
                VoteOutcome::Recorded => {
                    let entry = app.snapshot().get(&id).cloned();
                    log::info!("Vote '{kind}' recorded for entry {id}");
                    if let Some(entry) = entry {
                        print_entries(&[entry]);
                    }
                }
                VoteOutcome::AlreadyVoted(previous) => {
                    log::warn!("Already voted '{previous}' for entry {id}; nothing sent");
                }
                VoteOutcome::Disabled => {
                    log::warn!("Voting is disabled without a configured backend");
                }
            }
        }

        Command::Add {
            name,
            location,
            biryani,
            menu,
            latitude,
            longitude,
        } => {
            app.refresh().await?;

            let submission = NewMosque {
                name,
                location,
                has_biryani: biryani,
                menu_items: menu,
                latitude,
                longitude,
            };
            match app.submit(submission).await? {
                Some(created) => {
                    log::info!("Entry created with id {}", created.id);
                    print_entries(&[created]);
                }
                None => log::warn!("Submission is disabled without a configured backend"),
            }
        }

        #[cfg(feature = "watch")]
        Command::Watch { interval } => {
            use std::time::Duration;

            use iftar_tracker::services::PollingWatcher;

            let Some(backend) = backend else {
                return Err(iftar_tracker::error::AppError::config(
                    "Watch requires a configured backend",
                ));
            };

            app.refresh().await?;
            print_entries(&app.search(""));

            let secs = interval.unwrap_or(config.watch.poll_interval_secs);
            log::info!("Watching for changes every {secs}s (Ctrl-C to stop)");

            let watcher = PollingWatcher::new(backend, Duration::from_secs(secs));
            let mut events = watcher.spawn();
            while events.recv().await.is_some() {
                log::info!("Change detected; refreshing");
                app.refresh().await?;
                print_entries(&app.search(""));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let (config, seed) = config::load_all(&cli.storage_dir)?;
            log::info!("✓ Config OK (user agent: {})", config.client.user_agent);
            log::info!("✓ Seed OK ({} entries)", seed.mosques.len());

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Mode: {}",
                if app.is_degraded() {
                    "seed-only (backend not configured)"
                } else {
                    "connected"
                }
            );
            log::info!("Seed entries: {}", seed.mosques.len());
            log::info!("Votes cast from this client: {}", ledger.count().await?);

            if let Some(backend) = &backend {
                match backend.table_counts().await {
                    Ok(counts) => log::info!(
                        "Backend rows: {} mosques, {} votes",
                        counts.mosques,
                        counts.votes
                    ),
                    Err(e) => log::warn!("Could not reach backend: {e}"),
                }
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
