use clap::Parser;
use qschema::*;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Validate a SQLite schema and resolve SELECT queries against it.
#[derive(Parser)]
#[command(name = "qschema")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File of `;`-terminated CREATE TABLE statements.
    schema: PathBuf,

    /// SELECT query file to resolve against the schema (repeatable).
    #[arg(short, long = "query")]
    queries: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    tables: &'a [Table],
    queries: Vec<QueryReport>,
    warnings: Vec<Warning>,
}

#[derive(Serialize)]
struct QueryReport {
    file: PathBuf,
    #[serde(flatten)]
    info: QueryInfo,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result {
    let config = config()?;
    let mut warnings = Vec::new();
    let mut reporter = |warning: Warning| {
        TracingReporter.report(warning.clone());
        warnings.push(warning);
    };

    let schema = std::fs::read_to_string(&cli.schema)?;
    let database = parse_schema(&schema, &mut reporter)?;
    info!(
        tables = database.tables.len(),
        "Parsed schema {}",
        cli.schema.display()
    );

    let mut queries = Vec::with_capacity(cli.queries.len());
    for file in cli.queries {
        let sql = std::fs::read_to_string(&file)?;
        let info = parse_select(&sql, &database, &mut reporter)?;
        info!(columns = info.columns.len(), "Resolved query {}", file.display());
        queries.push(QueryReport { file, info });
    }

    if config.deny_warnings && !warnings.is_empty() {
        return Err(Error::DeniedWarnings(warnings.len()));
    }
    let report = Report {
        tables: &database.tables,
        queries,
        warnings,
    };
    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
