//! brq: Block Range Query - CLI for validating and dumping block range expressions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "brq")]
#[command(about = "Block Range Query - validate and dump block range expressions")]
#[command(version)]
struct Cli {
    /// Keywords file (TOML with `periods` and `specials` lists)
    #[arg(long = "config", global = true, env = "BLOCKRANGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log parser decisions to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the verbose JSON form of each expression
    #[command(visible_alias = "p")]
    Parse {
        /// Range expressions (e.g. 10-1000:10, london:weekly)
        #[arg(required = true)]
        exprs: Vec<String>,

        /// Indent the JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },

    /// Validate expressions, reporting the offending token for each failure
    Check {
        #[arg(required = true)]
        exprs: Vec<String>,
    },

    /// Print the canonical compact form of each expression
    Compact {
        #[arg(required = true)]
        exprs: Vec<String>,
    },

    /// Export the pin list of a manifest file
    Pins {
        /// Manifest JSON file
        manifest: PathBuf,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "csv")]
        format: PinsFormat,

        /// Export the previous pins instead of the new ones
        #[arg(long = "previous")]
        previous: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PinsFormat {
    Csv,
    Tsv,
    Json,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Only the expression commands consult the keyword catalogs
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Parse { exprs, pretty } => commands::load_parser(config)
            .and_then(|parser| commands::parse(&parser, &exprs, pretty)),
        Commands::Check { exprs } => commands::load_parser(config)
            .and_then(|parser| commands::check(&parser, &exprs)),
        Commands::Compact { exprs } => commands::load_parser(config)
            .and_then(|parser| commands::compact(&parser, &exprs)),
        Commands::Pins { manifest, format, previous } => commands::pins(&manifest, format, previous),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
