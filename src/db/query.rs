//! Dynamic, parameterized query construction for listing problems.
//!
//! The builder only ever appends fixed SQL fragments; every user-supplied
//! value travels as a bound parameter.
//!
//! ```rust
//! use punchlist::db::query::ProblemQuery;
//! use punchlist::libs::problem::ProblemFilter;
//!
//! let query = ProblemQuery::from_filter(&ProblemFilter::all().status("open").search("crane"));
//! assert_eq!(query.params().len(), 4);
//! ```

use crate::libs::problem::{Priority, ProblemFilter, UNKNOWN_SEVERITY_RANK};
use rusqlite::types::Value;

const SELECT_PROBLEMS: &str = "SELECT * FROM problems";
const WHERE_STATUS: &str = "status = ?";
const WHERE_PRIORITY: &str = "priority = ?";
const WHERE_CATEGORY: &str = "category = ?";
const WHERE_CATEGORY_ID: &str = "category_id = ?";
const WHERE_SEARCH: &str = "(title LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\' OR location LIKE ? ESCAPE '\\')";

#[derive(Debug, Clone, Default)]
pub struct ProblemQuery {
    clauses: Vec<&'static str>,
    params: Vec<Value>,
}

impl ProblemQuery {
    pub fn from_filter(filter: &ProblemFilter) -> Self {
        let mut query = Self::default();

        if let Some(status) = non_empty(&filter.status) {
            query.push(WHERE_STATUS, vec![Value::Text(status.to_string())]);
        }
        if let Some(priority) = non_empty(&filter.priority) {
            query.push(WHERE_PRIORITY, vec![Value::Text(priority.to_string())]);
        }
        if let Some(category) = non_empty(&filter.category) {
            query.push(WHERE_CATEGORY, vec![Value::Text(category.to_string())]);
        }
        if let Some(category_id) = filter.category_id {
            query.push(WHERE_CATEGORY_ID, vec![Value::Integer(category_id)]);
        }
        if let Some(search) = non_empty(&filter.search) {
            let pattern = like_pattern(search);
            query.push(WHERE_SEARCH, vec![Value::Text(pattern.clone()), Value::Text(pattern.clone()), Value::Text(pattern)]);
        }

        query
    }

    fn push(&mut self, clause: &'static str, params: Vec<Value>) {
        self.clauses.push(clause);
        self.params.extend(params);
    }

    pub fn sql(&self) -> String {
        let mut sql = String::from(SELECT_PROBLEMS);
        if !self.clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&severity_order());
        sql.push_str(" ASC, created_at DESC, id DESC");
        sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Wraps `search` in wildcards, escaping LIKE metacharacters so the text
/// matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `CASE` expression mapping priority labels to their severity rank.
fn severity_order() -> String {
    let arms: Vec<String> = Priority::ALL
        .iter()
        .map(|p| format!("WHEN '{}' THEN {}", p.as_str(), p.rank()))
        .collect();
    format!("CASE priority {} ELSE {} END", arms.join(" "), UNKNOWN_SEVERITY_RANK)
}
