//! Export of filtered problem lists to CSV or JSON.
//!
//! ```rust,no_run
//! use punchlist::db::db::Db;
//! use punchlist::libs::export::{ExportFormat, Exporter};
//! use punchlist::libs::problem::ProblemFilter;
//!
//! let db = Db::new()?;
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.export(&db, &ProblemFilter::all().status("open"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::db::problems::Problems;
use crate::libs::problem::{Problem, ProblemFilter};
use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named `punchlist_export_<timestamp>.<ext>`
    /// in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("punchlist_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes every problem matching `filter` and returns how many were written.
    pub fn export(&self, db: &Db, filter: &ProblemFilter) -> Result<usize> {
        let problems = Problems::new(db).find(filter)?;

        match self.format {
            ExportFormat::Csv => self.export_csv(&problems)?,
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(&problems)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
            }
        }

        Ok(problems.len())
    }

    fn export_csv(&self, problems: &[Problem]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record([
            "ID",
            "Title",
            "Description",
            "Category",
            "Category ID",
            "Priority",
            "Status",
            "Location",
            "Reported By",
            "Assigned To",
            "Created At",
            "Updated At",
            "Resolved At",
            "Estimated Cost",
            "Actual Cost",
            "Notes",
        ])?;

        for p in problems {
            wtr.write_record(&[
                p.id.to_string(),
                p.title.clone(),
                p.description.clone(),
                p.category.clone(),
                p.category_id.map(|id| id.to_string()).unwrap_or_default(),
                p.priority.clone(),
                p.status.clone(),
                p.location.clone(),
                p.reported_by.clone(),
                p.assigned_to.clone(),
                p.created_at.to_rfc3339(),
                p.updated_at.to_rfc3339(),
                p.resolved_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                p.estimated_cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
                p.actual_cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
                p.notes.clone(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
