use crate::db::categories::Category;
use crate::db::statistics::ProblemStatistics;
use crate::libs::problem::{Problem, ProblemDetails, ProblemUpdate};
use chrono::{DateTime, Local, Utc};
use prettytable::{row, Table};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    pub fn problems(problems: &[Problem]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "PRIORITY", "STATUS", "TITLE", "CATEGORY", "LOCATION", "ASSIGNED", "CREATED"]);
        for problem in problems {
            table.add_row(row![
                problem.id,
                problem.priority,
                problem.status,
                problem.title,
                problem.category,
                problem.location,
                problem.assigned_to,
                local_time(&problem.created_at)
            ]);
        }
        table.printstd();
    }

    pub fn problem(details: &ProblemDetails) {
        let problem = &details.problem;
        let mut table = Table::new();

        table.add_row(row!["Description", problem.description]);
        table.add_row(row!["Category", category_label(problem)]);
        table.add_row(row!["Priority", problem.priority]);
        table.add_row(row!["Status", problem.status]);
        table.add_row(row!["Location", problem.location]);
        table.add_row(row!["Reported by", problem.reported_by]);
        table.add_row(row!["Assigned to", problem.assigned_to]);
        table.add_row(row!["Estimated cost", cost(problem.estimated_cost)]);
        table.add_row(row!["Actual cost", cost(problem.actual_cost)]);
        table.add_row(row!["Created", local_time(&problem.created_at)]);
        table.add_row(row!["Updated", local_time(&problem.updated_at)]);
        table.add_row(row!["Resolved", problem.resolved_at.as_ref().map(local_time).unwrap_or_default()]);
        table.add_row(row!["Notes", problem.notes]);
        table.printstd();
    }

    pub fn updates(updates: &[ProblemUpdate]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "WHEN", "MESSAGE"]);
        for update in updates {
            table.add_row(row![update.id, local_time(&update.created_at), update.message]);
        }
        table.printstd();
    }

    pub fn categories(categories: &[Category]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "NAME", "COLOR"]);
        for category in categories {
            table.add_row(row![category.id, category.icon, category.name, category.color]);
        }
        table.printstd();
    }

    pub fn summary(stats: &ProblemStatistics) {
        let summary = stats.summary();
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "OPEN", "CRITICAL", "RESOLVED"]);
        table.add_row(row![summary.total, summary.open, summary.critical, summary.resolved]);
        table.printstd();
    }

    pub fn status_distribution(stats: &ProblemStatistics) {
        let mut table = Table::new();
        for (status, total) in stats.status_distribution() {
            table.add_row(row![status.label(), total]);
        }
        table.printstd();
    }

    pub fn priority_distribution(stats: &ProblemStatistics) {
        let mut table = Table::new();
        for (priority, total) in stats.priority_distribution() {
            table.add_row(row![priority.label(), total]);
        }
        table.printstd();
    }

    /// Applied schema migrations as `(version, name, applied_at)` rows.
    pub fn migration_history(history: &[(u32, String, String)]) {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED"]);
        for (version, name, applied_at) in history {
            table.add_row(row![format!("v{}", version), name, applied_at]);
        }
        table.printstd();
    }
}

fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

fn cost(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn category_label(problem: &Problem) -> String {
    match problem.category_id {
        Some(id) if problem.category.is_empty() => format!("#{}", id),
        Some(id) => format!("{} (#{})", problem.category, id),
        None => problem.category.clone(),
    }
}
