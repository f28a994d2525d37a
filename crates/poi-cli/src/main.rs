use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use poi_cli::commands::{open_store, query, records, Outcome};
use poi_cli::output::OutputFormat;
use poi_lib::{PoiId, PoiPatch};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage and query points of interest")]
struct Cli {
    /// SQLite database file. Parent directories are created when missing.
    #[arg(long, global = true, env = "POI_DATABASE_PATH", default_value = "pois.db")]
    database: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database file and schema if they do not exist.
    Init,
    /// Add a point of interest.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// List every point of interest in insertion order.
    List,
    /// Show one point of interest.
    Show { id: PoiId },
    /// Case-insensitive substring search on names.
    Search { name: String },
    /// Points of interest within a Euclidean distance of (x, y), boundary included.
    Near {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        max_distance: f64,
    },
    /// Change some fields of a point of interest.
    Update {
        id: PoiId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Delete a point of interest.
    Delete { id: PoiId },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let store = open_store(&cli.database)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    let outcome = match cli.command {
        Command::Init => records::handle_init(&store, &cli.database, &mut out),
        Command::Add { name, x, y } => records::handle_add(&store, &mut out, format, &name, x, y),
        Command::List => query::handle_list(&store, &mut out, format),
        Command::Show { id } => records::handle_show(&store, &mut out, format, id),
        Command::Search { name } => query::handle_search(&store, &mut out, format, &name),
        Command::Near { x, y, max_distance } => {
            query::handle_near(&store, &mut out, format, x, y, max_distance)
        }
        Command::Update { id, name, x, y } => {
            let patch = PoiPatch { name, x, y };
            records::handle_update(&store, &mut out, format, id, &patch)
        }
        Command::Delete { id } => records::handle_delete(&store, &mut out, format, id),
    }?;
    out.flush()?;

    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::NotFound => ExitCode::FAILURE,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
