pub(crate) mod profile;
pub(crate) mod vocabulary;

use anyhow::Result;
use devsignal_config as cli;

pub(crate) fn dispatch(cli: cli::Cli) -> Result<()> {
    match cli.command {
        cli::Commands::Profile(args) => profile::handle(args),
        cli::Commands::Vocabulary(args) => vocabulary::handle(args),
    }
}
