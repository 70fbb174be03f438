//! Problem persistence: listing, lookup, and mutations.
//!
//! ## Operations
//!
//! - [`Problems::find`]: filtered list, most severe first, then newest first
//! - [`Problems::find_by_id`]: one problem with its notes, or `NotFound`
//! - [`Problems::create`]: inserts with defaults for omitted fields
//! - [`Problems::update`]: presence-tagged partial update
//! - [`Problems::delete`]: hard delete, cascading to notes
//!
//! Each operation is a single statement (plus a read-back), so it is atomic
//! on its own. Read-then-write sequences are not wrapped in transactions and
//! concurrent writers simply overwrite each other.

use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::query::ProblemQuery;
use crate::db::updates::Updates;
use crate::libs::error::{Result, TrackerError};
use crate::libs::messages::Message;
use crate::libs::problem::{
    NewProblem, Problem, ProblemDetails, ProblemFilter, ProblemPatch, DEFAULT_PRIORITY, DEFAULT_REPORTER, DEFAULT_STATUS,
};
use crate::msg_warning;
use chrono::Utc;
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

const INSERT_PROBLEM: &str = "INSERT INTO problems (
    title, description, category_id, category, priority, status, location,
    reported_by, assigned_to, estimated_cost, notes, created_at, updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)";
const SELECT_PROBLEM_BY_ID: &str = "SELECT * FROM problems WHERE id = ?1";
const DELETE_PROBLEM: &str = "DELETE FROM problems WHERE id = ?1";

pub struct Problems<'a> {
    db: &'a Db,
    conn: &'a Connection,
}

impl<'a> Problems<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db, conn: &db.conn }
    }

    /// Lists problems matching every present criterion.
    pub fn find(&self, filter: &ProblemFilter) -> Result<Vec<Problem>> {
        let query = ProblemQuery::from_filter(filter);
        let mut stmt = self.conn.prepare(&query.sql())?;
        let problems = stmt
            .query_map(params_from_iter(query.params().iter()), Problem::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(count = problems.len(), ?filter, "problems listed");
        Ok(problems)
    }

    pub fn get(&self, id: i64) -> Result<Option<Problem>> {
        let problem = self.conn.query_row(SELECT_PROBLEM_BY_ID, params![id], Problem::from_row).optional()?;
        Ok(problem)
    }

    /// The problem with its notes, newest first.
    pub fn find_by_id(&self, id: i64) -> Result<ProblemDetails> {
        let problem = self.get(id)?.ok_or(TrackerError::NotFound(id))?;
        let updates = Updates::new(self.db).list_for(id)?;
        Ok(ProblemDetails { problem, updates })
    }

    pub fn create(&self, fields: &NewProblem) -> Result<Problem> {
        if fields.title.trim().is_empty() {
            return Err(TrackerError::validation("Title is required"));
        }

        if let Some(category_id) = fields.category_id {
            if Categories::new(self.db).get_by_id(category_id)?.is_none() {
                msg_warning!(Message::OrphanCategoryId(category_id));
            }
        }

        let now = Utc::now();
        self.conn.execute(
            INSERT_PROBLEM,
            params![
                fields.title,
                fields.description.clone().unwrap_or_default(),
                fields.category_id,
                fields.category.clone().unwrap_or_default(),
                or_default(&fields.priority, DEFAULT_PRIORITY),
                or_default(&fields.status, DEFAULT_STATUS),
                fields.location.clone().unwrap_or_default(),
                or_default(&fields.reported_by, DEFAULT_REPORTER),
                fields.assigned_to.clone().unwrap_or_default(),
                fields.estimated_cost.unwrap_or(0.0),
                fields.notes.clone().unwrap_or_default(),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "problem created");

        self.get(id)?.ok_or(TrackerError::NotFound(id))
    }

    /// Applies the fields present in `patch` and refreshes `updated_at`.
    ///
    /// An unknown id updates nothing and surfaces as `NotFound` on read-back.
    pub fn update(&self, id: i64, patch: &ProblemPatch) -> Result<Problem> {
        if patch.is_empty() {
            return Err(TrackerError::validation("No fields to update"));
        }
        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(TrackerError::validation("Title cannot be empty"));
        }

        let (mut assignments, mut values) = assignments(patch);
        assignments.push("updated_at = ?");
        values.push(Box::new(Utc::now()));
        values.push(Box::new(id));

        let sql = format!("UPDATE problems SET {} WHERE id = ?", assignments.join(", "));
        let affected = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        tracing::debug!(id, affected, fields = patch.field_count(), "problem update");

        self.get(id)?.ok_or(TrackerError::NotFound(id))
    }

    /// Removes the problem and its notes. Returns `false` if it did not exist.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute(DELETE_PROBLEM, params![id])?;
        tracing::debug!(id, affected, "problem delete");
        Ok(affected > 0)
    }
}

fn or_default<'v>(value: &'v Option<String>, default: &'v str) -> &'v str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

/// `SET` fragments and their values for every field present in the patch.
fn assignments(patch: &ProblemPatch) -> (Vec<&'static str>, Vec<Box<dyn ToSql>>) {
    let mut columns: Vec<&'static str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    let mut set = |column: &'static str, value: Box<dyn ToSql>| {
        columns.push(column);
        values.push(value);
    };

    if let Some(title) = &patch.title {
        set("title = ?", Box::new(title.clone()));
    }
    if let Some(description) = &patch.description {
        set("description = ?", Box::new(description.clone()));
    }
    if let Some(category) = &patch.category {
        set("category = ?", Box::new(category.clone()));
    }
    if let Some(category_id) = patch.category_id {
        set("category_id = ?", Box::new(category_id));
    }
    if let Some(priority) = &patch.priority {
        set("priority = ?", Box::new(priority.clone()));
    }
    if let Some(status) = &patch.status {
        set("status = ?", Box::new(status.clone()));
    }
    if let Some(location) = &patch.location {
        set("location = ?", Box::new(location.clone()));
    }
    if let Some(assigned_to) = &patch.assigned_to {
        set("assigned_to = ?", Box::new(assigned_to.clone()));
    }
    if let Some(actual_cost) = patch.actual_cost {
        set("actual_cost = ?", Box::new(actual_cost));
    }
    if let Some(notes) = &patch.notes {
        set("notes = ?", Box::new(notes.clone()));
    }
    if let Some(resolved_at) = patch.resolved_at {
        set("resolved_at = ?", Box::new(resolved_at));
    }

    (columns, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignments_follow_presence() {
        let patch = ProblemPatch {
            actual_cost: Some(None),
            notes: Some(String::new()),
            ..Default::default()
        };
        let (columns, values) = assignments(&patch);
        assert_eq!(columns, vec!["actual_cost = ?", "notes = ?"]);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_or_default_treats_empty_as_missing() {
        assert_eq!(or_default(&None, "medium"), "medium");
        assert_eq!(or_default(&Some(String::new()), "medium"), "medium");
        assert_eq!(or_default(&Some("high".to_string()), "medium"), "high");
    }
}
