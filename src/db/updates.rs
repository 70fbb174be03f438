use crate::db::db::Db;
use crate::libs::error::{Result, TrackerError};
use crate::libs::problem::ProblemUpdate;
use chrono::Utc;
use rusqlite::{params, Connection};

const INSERT_UPDATE: &str = "INSERT INTO updates (problem_id, message, created_at) VALUES (?1, ?2, ?3)";
const SELECT_UPDATE_BY_ID: &str = "SELECT * FROM updates WHERE id = ?1";
const SELECT_UPDATES_BY_PROBLEM: &str = "SELECT * FROM updates WHERE problem_id = ?1 ORDER BY created_at DESC, id DESC";
const COUNT_UPDATES_BY_PROBLEM: &str = "SELECT COUNT(*) FROM updates WHERE problem_id = ?1";

/// Notes appended to problems.
///
/// Notes are only ever inserted and listed; they disappear with their parent
/// problem through the `ON DELETE CASCADE` foreign key.
pub struct Updates<'a> {
    conn: &'a Connection,
}

impl<'a> Updates<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Appends a note to a problem.
    ///
    /// The problem id is not looked up beforehand; an unknown id is rejected
    /// by the foreign key as [`TrackerError::Integrity`].
    pub fn add(&self, problem_id: i64, message: &str) -> Result<ProblemUpdate> {
        if message.trim().is_empty() {
            return Err(TrackerError::validation("Message is required"));
        }

        self.conn.execute(INSERT_UPDATE, params![problem_id, message, Utc::now()])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, problem_id, "update added");

        let update = self.conn.query_row(SELECT_UPDATE_BY_ID, params![id], ProblemUpdate::from_row)?;
        Ok(update)
    }

    /// Notes of a problem, newest first.
    pub fn list_for(&self, problem_id: i64) -> Result<Vec<ProblemUpdate>> {
        let mut stmt = self.conn.prepare(SELECT_UPDATES_BY_PROBLEM)?;
        let updates = stmt
            .query_map(params![problem_id], ProblemUpdate::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(updates)
    }

    pub fn count_for(&self, problem_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_UPDATES_BY_PROBLEM, params![problem_id], |row| row.get(0))?;
        Ok(count as usize)
    }
}
