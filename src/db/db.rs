use crate::db::categories::Categories;
use crate::db::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::msg_debug;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a handle waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Explicit handle to the problem store.
///
/// Opening a handle switches on foreign-key enforcement, applies pending
/// migrations, and seeds the default categories. Repositories borrow the
/// handle for the duration of their work; dropping or [`close`](Db::close)-ing
/// it releases the connection.
///
/// ```rust
/// use punchlist::db::db::Db;
/// use punchlist::db::problems::Problems;
/// use punchlist::libs::problem::{NewProblem, ProblemFilter};
///
/// let db = Db::in_memory().unwrap();
/// let problems = Problems::new(&db);
/// problems.create(&NewProblem::new("Scaffold tie missing")).unwrap();
/// assert_eq!(problems.find(&ProblemFilter::all()).unwrap().len(), 1);
/// ```
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the store at the configured location.
    pub fn new() -> anyhow::Result<Db> {
        let path = Config::read()?.database_path()?;
        Ok(Self::open(path)?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let conn = Connection::open(path.as_ref())?;
        msg_debug!(Message::DatabaseOpened(path.as_ref().display().to_string()));
        Self::from_connection(conn)
    }

    /// Private in-memory store, mostly useful in tests.
    pub fn in_memory() -> Result<Db> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Raw connection with foreign keys enabled but no schema work applied.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    fn from_connection(conn: Connection) -> Result<Db> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let mut db = Db { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Applies migrations and seeds default categories. Safe to repeat.
    pub fn initialize(&mut self) -> Result<()> {
        init_with_migrations(&mut self.conn)?;
        let seeded = Categories::new(self).seed_defaults()?;
        if seeded > 0 {
            msg_debug!(Message::CategoriesSeeded(seeded));
        }
        Ok(())
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}
