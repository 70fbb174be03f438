//! Grouped problem counts for the dashboard.
//!
//! Only values that actually occur are reported; callers use
//! [`ProblemStatistics::status_count`] and friends to default the rest to zero.

use crate::db::db::Db;
use crate::libs::error::Result;
use crate::libs::problem::{Priority, Status};
use rusqlite::Connection;
use serde::Serialize;

const COUNT_BY_STATUS: &str = "SELECT status, COUNT(*) AS total FROM problems GROUP BY status ORDER BY status";
const COUNT_BY_PRIORITY: &str = "SELECT priority, COUNT(*) AS total FROM problems GROUP BY priority ORDER BY priority";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatistics {
    pub by_status: Vec<GroupCount>,
    pub by_priority: Vec<GroupCount>,
}

/// Headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub total: usize,
    pub open: usize,
    pub critical: usize,
    pub resolved: usize,
}

impl ProblemStatistics {
    pub fn status_count(&self, status: &str) -> usize {
        count_for(&self.by_status, status)
    }

    pub fn priority_count(&self, priority: &str) -> usize {
        count_for(&self.by_priority, priority)
    }

    /// Counts for every known status, zero-filled, in workflow order.
    pub fn status_distribution(&self) -> Vec<(Status, usize)> {
        Status::ALL.into_iter().map(|s| (s, self.status_count(s.as_str()))).collect()
    }

    /// Counts for every known priority, zero-filled, most urgent first.
    pub fn priority_distribution(&self) -> Vec<(Priority, usize)> {
        Priority::ALL.into_iter().map(|p| (p, self.priority_count(p.as_str()))).collect()
    }

    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            total: self.by_status.iter().map(|g| g.total).sum(),
            open: self.status_count(Status::Open.as_str()),
            critical: self.priority_count(Priority::Critical.as_str()),
            resolved: self.status_count(Status::Resolved.as_str()),
        }
    }
}

fn count_for(groups: &[GroupCount], value: &str) -> usize {
    groups.iter().find(|g| g.value == value).map(|g| g.total).unwrap_or(0)
}

pub struct Statistics<'a> {
    conn: &'a Connection,
}

impl<'a> Statistics<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    /// Counts per distinct status and per distinct priority over all problems.
    pub fn compute(&self) -> Result<ProblemStatistics> {
        Ok(ProblemStatistics {
            by_status: self.group(COUNT_BY_STATUS)?,
            by_priority: self.group(COUNT_BY_PRIORITY)?,
        })
    }

    fn group(&self, sql: &str) -> Result<Vec<GroupCount>> {
        let mut stmt = self.conn.prepare(sql)?;
        let groups = stmt
            .query_map([], |row| {
                Ok(GroupCount {
                    value: row.get(0)?,
                    total: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }
}
