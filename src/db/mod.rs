//! Persistence layer for the punchlist application.
//!
//! Everything is stored in a single SQLite file. A [`db::Db`] handle owns the
//! connection; the repositories below borrow it:
//!
//! - [`categories::Categories`]: seeded classification list
//! - [`problems::Problems`]: listing, lookup, and mutations of problems
//! - [`updates::Updates`]: notes appended to problems
//! - [`statistics::Statistics`]: grouped counts for the dashboard
//!
//! ```rust
//! use punchlist::db::{db::Db, problems::Problems, statistics::Statistics, updates::Updates};
//! use punchlist::libs::problem::{NewProblem, ProblemPatch};
//!
//! let db = Db::in_memory().unwrap();
//! let problems = Problems::new(&db);
//! let problem = problems.create(&NewProblem::new("Crane permit expired").with_priority("high")).unwrap();
//! Updates::new(&db).add(problem.id, "Renewal requested").unwrap();
//! problems.update(problem.id, &ProblemPatch::default().status("in-progress")).unwrap();
//!
//! let stats = Statistics::new(&db).compute().unwrap();
//! assert_eq!(stats.status_count("in-progress"), 1);
//! ```

/// Store handle: connection, foreign keys, initialization, and disposal.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

pub mod categories;

/// Problem listing and mutations.
pub mod problems;

/// Parameterized query construction for filtered problem lists.
pub mod query;

pub mod statistics;

pub mod updates;
