//! Database management subcommands
//!
//! Everything that runs without an unlocked session: creating, listing,
//! selecting, deleting, and renaming databases. Registry changes are saved
//! only after the filesystem operation succeeds.

use clap::Subcommand;

use crate::cli::prompts;
use crate::config::registry::Registry;
use crate::error::LockboxResult;
use crate::session::Session;
use crate::storage::Storage;

/// Database management commands
#[derive(Subcommand)]
pub enum DbCommands {
    /// Create a new database and select it
    New {
        /// Database name
        name: String,
    },
    /// List known databases
    List,
    /// Select a database
    Switch {
        /// Database name
        name: String,
    },
    /// Delete a database, its records, and its archive
    Delete {
        /// Database name
        name: String,
    },
    /// Rename a database
    Rename {
        /// Current name
        from: String,
        /// New name
        to: String,
    },
    /// Show the selected database
    Current,
}

/// Handle a database management command
pub fn handle_db_command(
    storage: &Storage,
    registry: &mut Registry,
    cmd: DbCommands,
) -> LockboxResult<()> {
    match cmd {
        DbCommands::New { name } => {
            registry.add(&name)?;
            let passphrase = prompts::prompt_new_passphrase()?;
            Session::create(storage.clone(), &name, &passphrase)?;
            registry.save(storage.paths())?;
            println!("Created database '{}' and selected it.", name);
        }

        DbCommands::List => {
            if registry.databases.is_empty() {
                println!("No databases yet. Run 'lockbox new <name>' to create one.");
                return Ok(());
            }
            for db in &registry.databases {
                let marker = if registry.selected.as_deref() == Some(db) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, db);
            }
        }

        DbCommands::Switch { name } => {
            registry.switch(&name)?;
            registry.save(storage.paths())?;
            println!("Selected database '{}'.", name);
        }

        DbCommands::Delete { name } => {
            println!("This permanently deletes '{}' and everything archived in it.", name);
            if !prompts::confirm("Delete this database?")? {
                println!("Delete aborted.");
                return Ok(());
            }
            storage.delete(&name)?;
            registry.remove(&name)?;
            registry.save(storage.paths())?;
            println!("Deleted database '{}'.", name);
        }

        DbCommands::Rename { from, to } => {
            storage.rename(&from, &to)?;
            registry.rename(&from, &to)?;
            registry.save(storage.paths())?;
            println!("Renamed database '{}' to '{}'.", from, to);
        }

        DbCommands::Current => match &registry.selected {
            Some(name) => println!("{}", name),
            None => println!("No database selected."),
        },
    }

    Ok(())
}
