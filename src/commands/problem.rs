//! `problem` subcommands: the CLI face of the problem store.

use super::{report, FilterArgs};
use crate::{
    db::{db::Db, problems::Problems, updates::Updates},
    libs::{
        config::Config,
        error::TrackerError,
        messages::Message,
        problem::{NewProblem, Priority, ProblemFilter, ProblemPatch, Status},
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProblemArgs {
    #[command(subcommand)]
    command: ProblemCommand,
}

#[derive(Debug, Subcommand)]
enum ProblemCommand {
    /// List problems, most urgent first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a problem with its updates
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Report a new problem
    Create(CreateArgs),
    /// Change selected fields of a problem
    Update(UpdateArgs),
    /// Delete a problem and its updates
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Append an update note to a problem
    Note { id: i64, message: String },
}

#[derive(Debug, Args)]
struct CreateArgs {
    title: String,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(long)]
    category_id: Option<i64>,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
    #[arg(short, long, value_enum)]
    status: Option<Status>,
    #[arg(short, long)]
    location: Option<String>,
    #[arg(short, long)]
    reported_by: Option<String>,
    #[arg(short, long)]
    assigned_to: Option<String>,
    #[arg(short, long)]
    estimated_cost: Option<f64>,
    #[arg(short, long)]
    notes: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: i64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, conflicts_with = "clear_category_id")]
    category_id: Option<i64>,
    #[arg(long)]
    clear_category_id: bool,
    #[arg(long, value_enum)]
    priority: Option<Priority>,
    #[arg(long, value_enum, conflicts_with = "resolve")]
    status: Option<Status>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    assigned_to: Option<String>,
    #[arg(long, conflicts_with = "clear_actual_cost")]
    actual_cost: Option<f64>,
    #[arg(long)]
    clear_actual_cost: bool,
    #[arg(long)]
    notes: Option<String>,
    /// Resolution time, RFC 3339
    #[arg(long, conflicts_with_all = ["clear_resolved_at", "resolve"])]
    resolved_at: Option<DateTime<Utc>>,
    #[arg(long)]
    clear_resolved_at: bool,
    /// Mark as resolved now
    #[arg(long)]
    resolve: bool,
}

impl CreateArgs {
    fn into_new_problem(self, config: &Config) -> NewProblem {
        NewProblem {
            title: self.title,
            description: self.description,
            category_id: self.category_id,
            category: self.category,
            priority: self
                .priority
                .map(|p| p.to_string())
                .or_else(|| config.default_priority().map(str::to_string)),
            status: self.status.map(|s| s.to_string()),
            location: self.location,
            reported_by: self.reported_by.or_else(|| config.default_reporter().map(str::to_string)),
            assigned_to: self.assigned_to,
            estimated_cost: self.estimated_cost,
            notes: self.notes,
        }
    }
}

impl From<UpdateArgs> for ProblemPatch {
    fn from(args: UpdateArgs) -> Self {
        let mut patch = ProblemPatch {
            title: args.title,
            description: args.description,
            category: args.category,
            category_id: presence(args.category_id, args.clear_category_id),
            priority: args.priority.map(|p| p.to_string()),
            status: args.status.map(|s| s.to_string()),
            location: args.location,
            assigned_to: args.assigned_to,
            actual_cost: presence(args.actual_cost, args.clear_actual_cost),
            notes: args.notes,
            resolved_at: presence(args.resolved_at, args.clear_resolved_at),
        };
        if args.resolve {
            patch = patch.resolve(Utc::now());
        }
        patch
    }
}

/// `--x value` sets, `--clear-x` nulls, neither leaves the field alone.
fn presence<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    match (value, clear) {
        (Some(v), _) => Some(Some(v)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

pub fn cmd(args: ProblemArgs) -> Result<()> {
    let db = Db::new()?;
    match args.command {
        ProblemCommand::List { filter, json } => handle_list(&db, filter.into(), json),
        ProblemCommand::Show { id, json } => handle_show(&db, id, json),
        ProblemCommand::Create(args) => handle_create(&db, args),
        ProblemCommand::Update(args) => handle_update(&db, args),
        ProblemCommand::Delete { id, yes } => handle_delete(&db, id, yes),
        ProblemCommand::Note { id, message } => handle_note(&db, id, &message),
    }
}

fn handle_list(db: &Db, filter: ProblemFilter, json: bool) -> Result<()> {
    let problems = Problems::new(db).find(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&problems)?);
        return Ok(());
    }
    if problems.is_empty() {
        msg_info!(Message::NoProblemsFound);
        return Ok(());
    }

    msg_print!(Message::ProblemsHeader(problems.len()), true);
    View::problems(&problems);
    Ok(())
}

fn handle_show(db: &Db, id: i64, json: bool) -> Result<()> {
    let details = match Problems::new(db).find_by_id(id) {
        Ok(details) => details,
        Err(err) => return report(err),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    msg_print!(Message::ProblemHeader(details.problem.id, details.problem.title.clone()), true);
    View::problem(&details);

    if details.updates.is_empty() {
        msg_info!(Message::NoUpdatesYet);
    } else {
        msg_print!(Message::UpdatesHeader(details.updates.len()), true);
        View::updates(&details.updates);
    }
    Ok(())
}

fn handle_create(db: &Db, args: CreateArgs) -> Result<()> {
    let config = Config::read()?;
    let fields = args.into_new_problem(&config);

    match Problems::new(db).create(&fields) {
        Ok(problem) => {
            msg_success!(Message::ProblemCreated(problem.id));
            Ok(())
        }
        Err(err) => report(err),
    }
}

fn handle_update(db: &Db, args: UpdateArgs) -> Result<()> {
    let id = args.id;
    let patch = ProblemPatch::from(args);
    if patch.is_empty() {
        msg_warning!(Message::NoFieldsToUpdate);
        return Ok(());
    }

    match Problems::new(db).update(id, &patch) {
        Ok(problem) => {
            msg_success!(Message::ProblemUpdated(problem.id));
            Ok(())
        }
        Err(err) => report(err),
    }
}

fn handle_delete(db: &Db, id: i64, yes: bool) -> Result<()> {
    let problems = Problems::new(db);
    let problem = match problems.get(id)? {
        Some(problem) => problem,
        None => {
            msg_info!(Message::ProblemAlreadyAbsent(id));
            return Ok(());
        }
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteProblem(problem.id, problem.title.clone()).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    problems.delete(id)?;
    msg_success!(Message::ProblemDeleted(id));
    Ok(())
}

fn handle_note(db: &Db, id: i64, message: &str) -> Result<()> {
    match Updates::new(db).add(id, message) {
        Ok(update) => {
            msg_success!(Message::UpdateAdded(update.problem_id));
            Ok(())
        }
        Err(err) if err.is_integrity() => {
            tracing::debug!(id, error = %err, "note rejected by foreign key");
            report(TrackerError::NotFound(id))
        }
        Err(err) => report(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_tags_fields() {
        assert_eq!(presence(Some(3), false), Some(Some(3)));
        assert_eq!(presence::<i64>(None, true), Some(None));
        assert_eq!(presence::<i64>(None, false), None);
    }
}
