//! Command implementations for the feeding point CLI.
//!
//! Every command runs against a [`StationStore`]: a local SQLite file when
//! `--local` is given, otherwise the hosted backend configured through
//! `SUPABASE_URL` / `SUPABASE_ANON_KEY`.

use clap::{Args, Subcommand};
use fp_store::{BackendConfig, LocalStore, RemoteStore, StationStore};
use std::path::PathBuf;

pub mod export;
pub mod stations;

pub use fp_core::StationStatus;

/// Where stations are read from and written to.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Use a local SQLite file instead of the hosted backend
    #[arg(long, global = true)]
    pub local: Option<PathBuf>,

    /// Hosted backend URL
    #[arg(long, env = "SUPABASE_URL", hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// Hosted backend anonymous key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List feeding points, most recently updated first
    List {
        /// Only points with this status (ok, needs_water, needs_food, needs_maintenance)
        #[arg(long)]
        status: Option<StationStatus>,
    },

    /// List feeding points by distance from a position
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Maximum number of points to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Add a feeding point at a random spot near the default map centre
    AddRandom,

    /// Mark a feeding point as stocked
    Refill {
        /// Station id
        id: String,
    },

    /// Write all feeding points to a CSV file
    Export {
        /// Output path for the CSV
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
}

pub async fn run(backend: BackendArgs, command: Command) -> anyhow::Result<()> {
    match backend.local {
        Some(path) => {
            log::info!("using local store {}", path.display());
            let store = LocalStore::open(&path)?;
            execute(&store, command).await
        }
        None => {
            let config = BackendConfig::new(backend.supabase_url, backend.supabase_anon_key)?;
            let store = RemoteStore::new(config);
            execute(&store, command).await
        }
    }
}

/// Run one command against `store`, printing its output to stdout.
pub async fn execute<S: StationStore>(store: &S, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { status } => {
            for line in stations::list(store, status).await? {
                println!("{}", line);
            }
        }
        Command::Nearby { lat, lon, limit } => {
            for line in stations::nearby(store, lat, lon, limit).await? {
                println!("{}", line);
            }
        }
        Command::AddRandom => {
            let station = stations::add_random(store, &mut rand::thread_rng()).await?;
            println!("added {} ({})", station.id, station.title);
        }
        Command::Refill { id } => {
            stations::refill(store, &id).await?;
            println!("refilled {}", id);
        }
        Command::Export { output } => {
            let count = export::export_csv(store, &output).await?;
            println!("wrote {} feeding points to {}", count, output.display());
        }
    }
    Ok(())
}
