//! # Punchlist - Site problem tracking
//!
//! A command-line utility for recording, filtering, and resolving on-site
//! problems such as construction-site issues.
//!
//! ## Features
//!
//! - **Problem Tracking**: Report problems with priority, status, location, and costs
//! - **Filtering**: Combine status, priority, category, and free-text search
//! - **Notes**: Append timestamped updates to any problem
//! - **Categories**: Seeded classification list with icons and colors
//! - **Statistics**: Status and priority distributions for a dashboard view
//! - **Data Export**: Export filtered lists to CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use punchlist::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
