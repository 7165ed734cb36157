//! Handler for the `devsignal vocabulary` command.

use anyhow::{Context, Result};
use devsignal_config::{self as cli, load_settings};

pub(crate) fn handle(args: cli::VocabularyArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let settings = load_settings(args.config.as_deref(), &cwd)
        .context("failed to load devsignal config")?;
    let json = serde_json::to_string_pretty(&settings.vocabulary)
        .context("failed to serialize vocabulary")?;
    println!("{json}");
    Ok(())
}
