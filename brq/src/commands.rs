//! CLI command implementations.

use std::io::{self, Write};
use std::path::Path;

use blockrange::range::{encode, encode_pretty};
use blockrange::{Keywords, Manifest, Parser};
use tracing::debug;

use crate::PinsFormat;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Range(#[from] blockrange::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0} of {1} expressions failed to parse")]
    Invalid(usize, usize),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Build a parser from an optional keywords file.
pub fn load_parser(config: Option<&Path>) -> Result<Parser> {
    let keywords = match config {
        Some(path) => {
            debug!(path = %path.display(), "loading keywords");
            let contents = std::fs::read_to_string(path)?;
            Keywords::from_toml_str(&contents)?
        }
        None => Keywords::default(),
    };
    Ok(Parser::new(keywords))
}

pub fn parse(parser: &Parser, exprs: &[String], pretty: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for expr in exprs {
        let range = parser.parse(expr).map_err(blockrange::Error::from)?;
        let json = if pretty {
            encode_pretty(&range)?
        } else {
            encode(&range)?
        };
        writeln!(stdout, "{}", json)?;
    }
    Ok(())
}

pub fn check(parser: &Parser, exprs: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut failed = 0;
    for expr in exprs {
        match parser.parse(expr) {
            Ok(_) => writeln!(stdout, "ok {}", expr)?,
            Err(e) => {
                failed += 1;
                let token = e.token().unwrap_or("");
                writeln!(stdout, "error {}: {} (token '{}')", expr, e, token)?;
            }
        }
    }
    if failed > 0 {
        return Err(CliError::Invalid(failed, exprs.len()));
    }
    Ok(())
}

pub fn compact(parser: &Parser, exprs: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for expr in exprs {
        let range = parser.parse(expr).map_err(blockrange::Error::from)?;
        writeln!(stdout, "{}", range)?;
    }
    Ok(())
}

pub fn pins(manifest: &Path, format: PinsFormat, previous: bool) -> Result<()> {
    let contents = std::fs::read_to_string(manifest)?;
    let manifest = Manifest::from_json(&contents)?;
    let pins = if previous {
        &manifest.previous_pins
    } else {
        &manifest.new_pins
    };
    debug!(count = pins.len(), previous, "exporting pins");

    let mut stdout = io::stdout().lock();
    match format {
        PinsFormat::Csv => write!(stdout, "{}", pins.csv_output().to_delimited(b',')?)?,
        PinsFormat::Tsv => write!(stdout, "{}", pins.csv_output().to_delimited(b'\t')?)?,
        PinsFormat::Json => {
            let json = serde_json::to_string_pretty(&pins.json_output()?)
                .map_err(blockrange::Error::from)?;
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
