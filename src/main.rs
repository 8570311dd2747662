// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load settings, hand off to the UI.
// - A path on the command line is imported directly, without the menu.

use cushions_cli::{settings::Settings, ui};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to warnings only so log lines don't interleave with the menu.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let settings = Settings::load();

    match std::env::args_os().nth(1) {
        Some(path) => {
            ui::import_path(&settings, &PathBuf::from(path)).await?;
        }
        None => ui::main_menu(&settings).await?,
    }
    Ok(())
}
