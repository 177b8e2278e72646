use anyhow::Result;
use clap::Parser;

use lockbox::cli::{handle_db_command, run_session, DbCommands};
use lockbox::config::paths::LockboxPaths;
use lockbox::config::registry::Registry;
use lockbox::storage::Storage;

#[derive(Parser)]
#[command(
    name = "lockbox",
    version,
    about = "Local encrypted credential store",
    long_about = "Lockbox keeps named encrypted databases of credentials and notes, \
                  protected by a master passphrase and an optional second factor. \
                  Running it without a subcommand opens an interactive session on \
                  the selected database."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<DbCommands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LockboxPaths::new()?;
    let storage = Storage::new(paths.clone());
    let mut registry = Registry::load_or_create(&paths)?;

    match cli.command {
        Some(cmd) => handle_db_command(&storage, &mut registry, cmd)?,
        None => run_session(&storage, &registry)?,
    }

    Ok(())
}
