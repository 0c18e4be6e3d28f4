//! Serve command handler.

use anyhow::Result;

use crate::commands::ServeArgs;

/// Run the HTTP service until Ctrl+C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = args.to_server_config();
    tracing::debug!(target: "vidfetch.http", ?config, "Starting web server");
    vidfetch_axum::start_server(config).await
}
