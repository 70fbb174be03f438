pub mod category;
pub mod export;
pub mod init;
pub mod migrations;
pub mod problem;
pub mod stats;

use crate::libs::error::TrackerError;
use crate::libs::messages::Message;
use crate::libs::problem::{Priority, ProblemFilter, Status};
use crate::{msg_error, msg_error_anyhow};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Report, list, and resolve problems", arg_required_else_help = true)]
    Problem(problem::ProblemArgs),
    #[command(about = "Manage problem categories", arg_required_else_help = true)]
    Category(category::CategoryArgs),
    #[command(about = "Show status and priority statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Export problems to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Inspect the database schema version", arg_required_else_help = true)]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Problem(args) => problem::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Filter flags shared by `problem list` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only problems with this status
    #[arg(long, value_enum)]
    status: Option<Status>,
    /// Only problems with this priority
    #[arg(long, value_enum)]
    priority: Option<Priority>,
    /// Only problems with this category text
    #[arg(long)]
    category: Option<String>,
    /// Only problems referencing this category id
    #[arg(long)]
    category_id: Option<i64>,
    /// Case-insensitive text searched in title, description, and location
    #[arg(short, long)]
    search: Option<String>,
}

impl From<FilterArgs> for ProblemFilter {
    fn from(args: FilterArgs) -> Self {
        ProblemFilter {
            status: args.status.map(|s| s.to_string()),
            priority: args.priority.map(|p| p.to_string()),
            category: args.category,
            category_id: args.category_id,
            search: args.search,
        }
    }
}

/// Prints recoverable outcomes (validation, not found) and propagates the rest.
fn report(err: TrackerError) -> Result<()> {
    match err {
        TrackerError::Validation(reason) => {
            msg_error!(reason);
            Ok(())
        }
        TrackerError::NotFound(id) => {
            msg_error!(Message::ProblemNotFound(id));
            Ok(())
        }
        other => Err(msg_error_anyhow!(other)),
    }
}
