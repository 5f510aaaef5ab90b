//! The main entry point for the catalog demo console.
use anyhow::Result;

/// The main function of the application.
///
/// Parses command-line arguments and launches the interactive console.
///
/// # Errors
///
/// Returns an error if the console fails to start or encounters a critical
/// error during execution.
#[tokio::main]
async fn main() -> Result<()> {
    catalog_demo::app::launch().await
}
