//! CLI entry point - the composition root.
//!
//! Loads `.env`, initialises logging, parses arguments and dispatches to
//! the command handlers.

use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use vidfetch_cli::{Cli, CliError, Commands, handlers};
use vidfetch_core::StorageLayout;
use vidfetch_download::YtDlpFetcher;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before parsing so env fallbacks see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let result = match command {
        Commands::Serve(args) => return handlers::serve::execute(&args).await,
        Commands::Download {
            url,
            storage,
            fetcher,
        } => match StorageLayout::resolve(storage.storage_dir.as_deref()) {
            Ok(layout) => {
                let fetcher = Arc::new(YtDlpFetcher::new(fetcher.to_config()));
                handlers::download::execute(&url, &layout, fetcher)
                    .await
                    .map(|_| ())
            }
            Err(e) => Err(CliError::Storage(e.to_string())),
        },
        Commands::CheckDeps { fetcher } => {
            handlers::check_deps::execute(&YtDlpFetcher::new(fetcher.to_config())).await
        }
        Commands::Paths { storage } => handlers::paths::execute(&storage),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
