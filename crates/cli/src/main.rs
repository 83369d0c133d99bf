use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripplan_core::config::Settings;
use tripplan_core::domain::itinerary::Itinerary;
use tripplan_core::domain::saved::SavedItinerary;
use tripplan_core::session::{PlannerEvent, PlannerSession};
use tripplan_core::storage::{find, FileBlobStore, PersistenceGateway};

mod render;

#[derive(Debug, Parser)]
#[command(name = "tripplan")]
struct Args {
    /// Directory holding the saved-itinerary blob. Defaults to TRIPPLAN_DATA_DIR.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Destination catalog JSON file. Defaults to TRIPPLAN_CATALOG.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved itineraries.
    List,

    /// Day-by-day overview of a saved itinerary.
    Show { id: String },

    /// Delete a saved itinerary (no-op if the id is unknown).
    Delete { id: String },

    /// Replay a JSON array of planner events and print the result.
    Plan {
        #[arg(long)]
        events: PathBuf,

        /// First day of the initial (pre-event) plan, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        start: Option<String>,

        /// Save the result under this name.
        #[arg(long)]
        save: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    if let Some(path) = args.catalog {
        settings.catalog_path = Some(path);
    }

    let res = run(&settings, args.command);
    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "tripplan failed");
    }
    res
}

fn run(settings: &Settings, command: Command) -> anyhow::Result<()> {
    let gateway = PersistenceGateway::with_key(
        FileBlobStore::new(&settings.data_dir),
        settings.storage_key.clone(),
    );

    match command {
        Command::List => {
            let saved = gateway.load_all()?;
            print!("{}", render::saved_list(&saved));
        }
        Command::Show { id } => {
            let saved = gateway.load_all()?;
            let entry = find(&saved, &id).with_context(|| format!("no saved itinerary {id}"))?;
            println!("{}", entry.name);
            print!("{}", render::overview(&entry.itinerary, None));
        }
        Command::Delete { id } => {
            if !gateway.delete(&id)? {
                tracing::info!(%id, "nothing to delete");
            }
        }
        Command::Plan {
            events: events_path,
            start,
            save,
        } => {
            let catalog = settings.load_catalog()?;
            let text = std::fs::read_to_string(&events_path)
                .with_context(|| format!("failed to read {}", events_path.display()))?;
            let events: Vec<PlannerEvent> = serde_json::from_str(&text).with_context(|| {
                format!("{} is not a JSON array of events", events_path.display())
            })?;

            let start = match start {
                Some(s) => tripplan_core::time::parse_date(&s)?,
                None => chrono::Local::now().date_naive(),
            };
            let initial = PlannerSession::new(Itinerary::new(start, start)?);
            let session = initial.replay(&events, &catalog)?;
            tracing::info!(events = events.len(), "replayed planner events");

            print!(
                "{}",
                render::overview(&session.itinerary, Some(session.current_day))
            );

            if let Some(name) = save {
                anyhow::ensure!(!name.trim().is_empty(), "--save name must be non-empty");
                let entry = SavedItinerary::snapshot(&name, &session.itinerary, chrono::Utc::now());
                let id = entry.id.clone();
                gateway.insert(entry)?;
                println!("saved as {id}");
            }
        }
    }

    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
