use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "linedict-cmd")]
#[command(about = "Command-line utility for dictionary-encoded line artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SimdMode {
    On,
    Off,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file into a dictionary artifact
    Encode {
        /// Number of parallel workers (defaults to the number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Maximum number of lines a worker reads at once
        #[arg(long)]
        batch_size: Option<usize>,

        /// Overwrite the artifact if it already exists
        #[arg(long)]
        force: bool,

        /// Text file to encode, one entry per line
        input: String,

        /// Path of the artifact to create
        artifact: String,
    },

    /// Look up lines in an artifact
    Query {
        /// Match lines starting with the query instead of equal to it
        #[arg(long)]
        prefix: bool,

        /// Use the wide-register prefix comparison
        #[arg(long, value_enum, default_value_t = SimdMode::On)]
        simd: SimdMode,

        /// Artifact to query
        artifact: String,

        /// Line content (or prefix) to look for
        query: String,
    },

    /// Scan a text file for the first line equal to the query, without encoding it
    Search {
        /// Text file to scan
        input: String,

        /// Line content to look for
        query: String,
    },

    /// Inspect an artifact and display summary information
    Inspect {
        /// Increase verbosity (-v lists every symbol)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Artifact to inspect
        artifact: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            workers,
            batch_size,
            force,
            input,
            artifact,
        } => commands::encode::run(input, artifact, workers, batch_size, force),
        Commands::Query {
            prefix,
            simd,
            artifact,
            query,
        } => commands::query::run(artifact, query, prefix, simd == SimdMode::On),
        Commands::Search { input, query } => commands::search::run(input, query),
        Commands::Inspect { verbose, artifact } => commands::inspect::run(verbose, artifact),
    }
}
