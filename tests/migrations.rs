#[cfg(test)]
mod tests {
    use punchlist::db::db::Db;
    use punchlist::db::categories::Categories;
    use punchlist::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use punchlist::libs::view::View;
    use std::path::PathBuf;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("punchlist.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_open_applies_all_migrations(ctx: &mut MigrationTestContext) {
        Db::open(&ctx.db_path).unwrap().close().unwrap();

        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&conn).unwrap(), 2);
        assert!(!needs_migration(&conn).unwrap());
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
        assert!(manager.is_migration_applied(&conn, 2).unwrap());

        let history = manager.get_migration_history(&conn).unwrap();
        let names: Vec<&str> = history.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["create_problem_tables", "add_filter_indices"]);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), 2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_enforces_foreign_keys(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        let enabled: i64 = db.conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(enabled, 1);

        let orphan = db.conn.execute(
            "INSERT INTO updates (problem_id, message, created_at) VALUES (99, 'orphan', CURRENT_TIMESTAMP)",
            [],
        );
        assert!(orphan.is_err());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_concurrent_first_open(ctx: &mut MigrationTestContext) {
        for round in 0..10 {
            let path = ctx.db_path.with_file_name(format!("concurrent-{}.db", round));
            let barrier = Arc::new(Barrier::new(4));

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let path = path.clone();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        Db::open(&path).map(|_| ()).map_err(|err| err.to_string())
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), Ok(()), "round {}", round);
            }

            let db = Db::open(&path).unwrap();
            let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
            assert_eq!(history.len(), 2);
            assert_eq!(Categories::new(&db).list().unwrap().len(), 10);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_history_renders(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();

        View::migration_history(&history);
        assert_eq!(history[0].0, 1);
        assert_eq!(history[1].1, "add_filter_indices");
    }
}
