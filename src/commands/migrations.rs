//! `migrations` subcommands: schema bookkeeping of the configured store file.
//!
//! The file is inspected as-is; nothing is migrated here. Opening the store
//! through any other command applies pending migrations.

use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Schema version of the store and whether it is behind
    Status,
    /// Applied migrations, oldest first
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let path = Config::read()?.database_path()?;
    if !path.exists() {
        msg_bail_anyhow!(Message::DatabaseMissing(path.display().to_string()));
    }
    let conn = Db::open_without_migrations(&path)?;
    msg_info!(Message::DatabaseOpened(path.display().to_string()));

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?));
            if needs_migration(&conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&conn)?;
            msg_print!(Message::MigrationHistory, true);
            View::migration_history(&history);
        }
    }

    Ok(())
}
