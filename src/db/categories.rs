//! Problem categories with display metadata.
//!
//! Categories are seeded on every store initialization; the seed uses
//! `INSERT OR IGNORE` so repeated starts never duplicate or fail. Problems
//! reference categories loosely, so removing one leaves referencing problems
//! untouched.

use crate::db::db::Db;
use crate::libs::error::{Result, TrackerError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

/// `(name, icon, color)` seeded on first start.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 10] = [
    ("Safety Issues", "⚠️", "red"),
    ("Material Delays", "📦", "orange"),
    ("Equipment Failure", "⚙️", "yellow"),
    ("Labor Shortage", "👷", "blue"),
    ("Weather-Related", "🌧️", "cyan"),
    ("Design Issues", "📐", "purple"),
    ("Quality Control", "✓", "green"),
    ("Site Access", "🚧", "pink"),
    ("Communication", "📞", "indigo"),
    ("Budget/Cost", "💰", "emerald"),
];

const SEED_CATEGORY: &str = "INSERT OR IGNORE INTO categories (name, icon, color) VALUES (?1, ?2, ?3)";
const INSERT_CATEGORY: &str = "INSERT INTO categories (name, icon, color, created_at) VALUES (?1, ?2, ?3, ?4)";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_ALL_CATEGORIES: &str = "SELECT * FROM categories ORDER BY name";
const SELECT_CATEGORY_BY_ID: &str = "SELECT * FROM categories WHERE id = ?1";
const SELECT_CATEGORY_BY_NAME: &str = "SELECT * FROM categories WHERE name = ?1";
const COUNT_REFERENCING_PROBLEMS: &str = "SELECT COUNT(*) FROM problems WHERE category_id = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            id: row.get("id")?,
            name: row.get("name")?,
            icon: row.get("icon")?,
            color: row.get("color")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Inserts the default categories that are not present yet and returns
    /// how many were added.
    pub fn seed_defaults(&self) -> Result<usize> {
        let mut stmt = self.conn.prepare(SEED_CATEGORY)?;
        let mut inserted = 0;
        for (name, icon, color) in DEFAULT_CATEGORIES {
            inserted += stmt.execute(params![name, icon, color])?;
        }
        if inserted > 0 {
            tracing::debug!(inserted, "seeded default categories");
        }
        Ok(inserted)
    }

    /// All categories ordered by name.
    pub fn list(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let categories = stmt.query_map([], Category::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = self.conn.query_row(SELECT_CATEGORY_BY_ID, params![id], Category::from_row).optional()?;
        Ok(category)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = self.conn.query_row(SELECT_CATEGORY_BY_NAME, params![name], Category::from_row).optional()?;
        Ok(category)
    }

    /// Creates a category. A duplicate name is an integrity error.
    pub fn create(&self, name: &str, icon: &str, color: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(TrackerError::validation("Category name is required"));
        }
        self.conn.execute(INSERT_CATEGORY, params![name, icon, color, Utc::now()])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name, "category created");

        self.get_by_id(id)?
            .ok_or_else(|| TrackerError::Integrity(format!("category {} vanished after insert", id)))
    }

    /// Deletes a category. Problems keep their `category_id` and `category`
    /// text. Returns `false` if no such category existed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute(DELETE_CATEGORY, params![id])?;
        tracing::debug!(id, affected, "category delete");
        Ok(affected > 0)
    }

    /// Number of problems whose `category_id` points at `id`.
    pub fn problem_count(&self, id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_REFERENCING_PROBLEMS, params![id], |row| row.get(0))?;
        Ok(count as usize)
    }
}
