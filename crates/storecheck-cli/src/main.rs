//! Storecheck CLI
//!
//! ## Usage
//!
//! ```bash
//! storecheck config --plan                      # Resolved config and session endpoint
//! storecheck catalog --strict                   # Check the product API
//! storecheck signin -u invalid -p invalid       # Try an API sign-in
//! storecheck purchase --product "Galaxy S20"    # Buy through the browser
//! ```

use clap::Parser;
use std::process::ExitCode;
use storecheck_cli::{handlers, Cli, CliResult, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storecheck::logging::init(cli.log_level());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = handlers::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Config(args) => handlers::execute_config(&config, &args),
        Commands::Catalog(args) => handlers::execute_catalog(config, &args).await,
        Commands::Signin(args) => handlers::execute_signin(config, &args).await,
        #[cfg(feature = "webdriver")]
        Commands::Purchase(args) => handlers::execute_purchase(&config, &args).await,
        #[cfg(not(feature = "webdriver"))]
        Commands::Purchase(_) => Err(storecheck_cli::CliError::config(
            "Browser support not enabled. Rebuild with --features webdriver",
        )),
    }
}
