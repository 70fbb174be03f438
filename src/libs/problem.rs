//! Problem records, their notes, and the inputs accepted by the repositories.
//!
//! Priority and status are stored as free text so that the tracker never
//! rejects a label it does not know. [`Priority`] and [`Status`] describe the
//! well-known labels and are used for severity ordering, CLI parsing, and
//! zero-filled dashboard views.
//!
//! ## Partial Updates
//!
//! [`ProblemPatch`] tags every field with presence:
//!
//! - `None`: the field is left untouched
//! - `Some(value)`: the field is overwritten, even with an empty string
//! - `Some(None)` on nullable fields: the column is cleared to `NULL`
//!
//! When deserialized from JSON, an explicit `null` on a text field clears it
//! to an empty string, while an omitted key leaves it untouched.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rusqlite::Row;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_STATUS: &str = "open";
pub const DEFAULT_REPORTER: &str = "Anonymous";

/// Rank given to priority labels outside the known set.
pub const UNKNOWN_SEVERITY_RANK: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities from most to least urgent.
    pub const ALL: [Priority; 4] = [Priority::Critical, Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Severity rank, `0` being the most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown priority '{}'", s))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Status {
    Open,
    InProgress,
    OnHold,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Open, Status::InProgress, Status::OnHold, Status::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in-progress",
            Status::OnHold => "on-hold",
            Status::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::OnHold => "On Hold",
            Status::Resolved => "Resolved",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked site issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    /// Free-text category name, kept independently of `category_id`.
    pub category: String,
    pub priority: String,
    pub status: String,
    pub location: String,
    pub reported_by: String,
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: String,
}

impl Problem {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Problem {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            category_id: row.get("category_id")?,
            category: row.get("category")?,
            priority: row.get("priority")?,
            status: row.get("status")?,
            location: row.get("location")?,
            reported_by: row.get("reported_by")?,
            assigned_to: row.get("assigned_to")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            resolved_at: row.get("resolved_at")?,
            estimated_cost: row.get("estimated_cost")?,
            actual_cost: row.get("actual_cost")?,
            notes: row.get("notes")?,
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved.as_str()
    }
}

/// A timestamped note attached to a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemUpdate {
    pub id: i64,
    pub problem_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ProblemUpdate {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ProblemUpdate {
            id: row.get("id")?,
            problem_id: row.get("problem_id")?,
            message: row.get("message")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A problem together with its notes, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDetails {
    #[serde(flatten)]
    pub problem: Problem,
    pub updates: Vec<ProblemUpdate>,
}

/// Fields accepted when reporting a new problem.
///
/// Everything except `title` is optional; omitted fields receive their
/// defaults on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProblem {
    pub title: String,
    pub description: Option<String>,
    #[serde(alias = "category_id")]
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub estimated_cost: Option<f64>,
    pub notes: Option<String>,
}

impl NewProblem {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: &str) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_category(mut self, category_id: Option<i64>, category: &str) -> Self {
        self.category_id = category_id;
        self.category = Some(category.to_string());
        self
    }
}

/// Presence-tagged partial update of a problem.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemPatch {
    #[serde(deserialize_with = "text_or_clear")]
    pub title: Option<String>,
    #[serde(deserialize_with = "text_or_clear")]
    pub description: Option<String>,
    #[serde(deserialize_with = "text_or_clear")]
    pub category: Option<String>,
    #[serde(alias = "category_id", deserialize_with = "present")]
    pub category_id: Option<Option<i64>>,
    #[serde(deserialize_with = "text_or_clear")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "text_or_clear")]
    pub status: Option<String>,
    #[serde(deserialize_with = "text_or_clear")]
    pub location: Option<String>,
    #[serde(deserialize_with = "text_or_clear")]
    pub assigned_to: Option<String>,
    #[serde(deserialize_with = "present")]
    pub actual_cost: Option<Option<f64>>,
    #[serde(deserialize_with = "text_or_clear")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "present")]
    pub resolved_at: Option<Option<DateTime<Utc>>>,
}

impl ProblemPatch {
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Number of fields explicitly present in the patch.
    pub fn field_count(&self) -> usize {
        [
            self.title.is_some(),
            self.description.is_some(),
            self.category.is_some(),
            self.category_id.is_some(),
            self.priority.is_some(),
            self.status.is_some(),
            self.location.is_some(),
            self.assigned_to.is_some(),
            self.actual_cost.is_some(),
            self.notes.is_some(),
            self.resolved_at.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Marks the problem resolved at `at`.
    pub fn resolve(mut self, at: DateTime<Utc>) -> Self {
        self.status = Some(Status::Resolved.as_str().to_string());
        self.resolved_at = Some(Some(at));
        self
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn text_or_clear<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

/// Optional criteria for listing problems. Every present field narrows the
/// result with AND; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "category_id")]
    pub category_id: Option<i64>,
    /// Case-insensitive substring matched against title, description, and location.
    pub search: Option<String>,
}

impl ProblemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank() {
        assert_eq!(Priority::Critical.rank(), 0);
        assert_eq!(Priority::Low.rank(), 3);
        assert!(Priority::ALL.iter().all(|p| p.rank() < UNKNOWN_SEVERITY_RANK));
        assert!(Priority::Critical.rank() < Priority::High.rank());
    }

    #[test]
    fn test_status_labels_round_trip_through_from_str() {
        assert_eq!("in-progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(Status::OnHold.as_str(), "on-hold");
        assert!("closed".parse::<Status>().is_err());
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: ProblemPatch = serde_json::from_str(r#"{"status":"resolved"}"#).unwrap();
        assert_eq!(patch.status.as_deref(), Some("resolved"));
        assert_eq!(patch.resolved_at, None);
        assert_eq!(patch.field_count(), 1);

        let patch: ProblemPatch = serde_json::from_str(r#"{"actualCost":null,"notes":null}"#).unwrap();
        assert_eq!(patch.actual_cost, Some(None));
        assert_eq!(patch.notes.as_deref(), Some(""));
        assert_eq!(patch.field_count(), 2);

        let patch: ProblemPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_filter_accepts_snake_case_category_id() {
        let filter: ProblemFilter = serde_json::from_str(r#"{"category_id":3}"#).unwrap();
        assert_eq!(filter.category_id, Some(3));
    }
}
