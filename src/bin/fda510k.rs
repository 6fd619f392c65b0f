//! FDA 510(k) search CLI binary.
//!
//! Queries the openFDA device clearance endpoint for records matching a
//! product code and writes them to stdout as JSON or NDJSON.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use openfda_510k::cli::{Cli, OutputFormat};
use openfda_510k::{output, ClearanceQuery, DeviceClearance, FdaClient, List};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays a clean record stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let query = match ClearanceQuery::new(&cli.product_code) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match FdaClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check the OPENFDA_API_URL environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &query, &cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &FdaClient, query: &ClearanceQuery, cli: &Cli) -> openfda_510k::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let records =
                DeviceClearance::list_all(client, query, cli.page_size, cli.limit).await?;
            let mut stdout = io::stdout().lock();
            output::write_json(&mut stdout, &records)?;
            stdout.flush()?;
        }
        OutputFormat::Ndjson => {
            // Lines are flushed per record; a mid-run abort leaves only
            // complete, independently valid lines behind.
            let stdout = io::stdout();
            DeviceClearance::list_with(client, query, cli.page_size, cli.limit, |record| {
                output::write_ndjson_line(&stdout, &record)
            })
            .await?;
        }
    }
    Ok(())
}
