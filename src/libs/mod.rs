//! Core library modules for the punchlist application.
//!
//! - **Domain**: problem records, filters, partial updates, error taxonomy
//! - **Infrastructure**: configuration, data directory, messaging
//! - **Presentation**: console tables and file export
//!
//! ```rust
//! use punchlist::libs::problem::{NewProblem, Priority};
//!
//! let problem = NewProblem::new("Rebar exposed at column C4").with_priority(Priority::High.as_str());
//! assert_eq!(problem.priority.as_deref(), Some("high"));
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod problem;
pub mod view;
