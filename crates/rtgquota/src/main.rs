mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use rtgquota_core::{Evaluation, run_check};

use crate::cli::Cli;
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments; help, version, and usage errors all exit UNKNOWN
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{}", err.render());
                }
                _ => output::print_line(&output::usage_line(&err)),
            }
            std::process::exit(exit_code::UNKNOWN);
        }
    };

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    let code = match run(&cli).await {
        Ok(eval) => {
            output::print_line(&output::status_line(&eval));
            eval.exit_code()
        }
        Err(err) => {
            let code = err.exit_code();
            output::print_line(&output::error_line(&err));
            if cli.verbose > 0 {
                eprintln!("{:?}", miette::Report::new(err));
            }
            code
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<Evaluation, CliError> {
    // Validate everything before touching the database
    let check = config::check_config(cli)?;
    let source = config::source_config(&cli.db)?;

    tracing::info!(
        router = %check.target.router,
        interface = %check.target.interface,
        db = %format!("{}:{}/{}", source.host, source.port, source.database),
        "running quota check"
    );

    let client = rtgquota_core::connect(&source).await?;
    let result = run_check(&client, &check, chrono::Utc::now()).await;
    client.close().await;

    Ok(result?)
}
