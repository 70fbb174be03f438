//! Human-readable text for every [`Message`].
//!
//! All user-facing wording lives here so commands only pick a variant and
//! supply its parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === PROBLEM MESSAGES ===
            Message::ProblemCreated(id) => format!("Problem #{} reported", id),
            Message::ProblemUpdated(id) => format!("Problem #{} updated", id),
            Message::ProblemDeleted(id) => format!("Problem #{} deleted together with its updates", id),
            Message::ProblemNotFound(id) => format!("Problem #{} not found", id),
            Message::ProblemAlreadyAbsent(id) => format!("Problem #{} does not exist, nothing to delete", id),
            Message::ProblemsHeader(count) => format!("Problems ({})", count),
            Message::ProblemHeader(id, title) => format!("Problem #{}: {}", id, title),
            Message::NoProblemsFound => "No problems match the given filters".to_string(),
            Message::NoFieldsToUpdate => "No fields to update".to_string(),
            Message::ConfirmDeleteProblem(id, title) => format!("Delete problem #{} '{}' and all of its updates?", id, title),
            Message::OrphanCategoryId(id) => format!("Category #{} does not exist; the problem keeps the reference anyway", id),

            // === UPDATE (NOTE) MESSAGES ===
            Message::UpdateAdded(problem_id) => format!("Update added to problem #{}", problem_id),
            Message::UpdatesHeader(count) => format!("Updates ({})", count),
            Message::NoUpdatesYet => "No updates yet".to_string(),

            // === CATEGORY MESSAGES ===
            Message::CategoriesHeader => "Categories".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryDeleted(name) => format!("Category '{}' deleted", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found", name),
            Message::CategoryAlreadyExists(name) => format!("Category '{}' already exists", name),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),
            Message::CategoryStillReferenced(name, count) => {
                format!("{} problem(s) still reference '{}' and will keep the stale category id", count, name)
            }
            Message::CategoriesSeeded(count) => format!("Seeded {} default categories", count),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader => "📊 Site Problems Overview".to_string(),
            Message::StatusDistributionHeader => "Status Distribution".to_string(),
            Message::PriorityDistributionHeader => "Priority Distribution".to_string(),
            Message::RecentIssuesHeader => "Most Urgent Issues".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleDatabase => "Database location".to_string(),
            Message::ConfigModuleDefaults => "Defaults for new problems".to_string(),
            Message::SelectConfigModules => "Select settings to configure".to_string(),
            Message::PromptDatabasePath => "Path to the database file".to_string(),
            Message::PromptDefaultReporter => "Default reporter name".to_string(),
            Message::PromptDefaultPriority => "Default priority (critical, high, medium, low)".to_string(),
            Message::InvalidPriority(value) => format!("'{}' is not a known priority", value),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseOpened(path) => format!("Database opened at {}", path),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::DatabaseMissing(path) => format!("Database file not found: {}", path),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path, count) => format!("Exported {} problem(s) to {}", count, path),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        f.write_str(&text)
    }
}
