#[cfg(test)]
mod tests {
    use punchlist::db::db::Db;
    use punchlist::db::problems::Problems;
    use punchlist::libs::export::{ExportFormat, Exporter};
    use punchlist::libs::problem::{NewProblem, Problem, ProblemFilter};
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("punchlist.db")).unwrap();

            let problems = Problems::new(&db);
            problems
                .create(&NewProblem::new("Dust control, east side").with_priority("high"))
                .unwrap();
            problems
                .create(&NewProblem::new("Welding \"hot work\" permit").with_status("resolved"))
                .unwrap();

            ExportTestContext { temp_dir, db }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("problems.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(path.clone()));

        let count = exporter.export(&ctx.db, &ProblemFilter::all()).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "ID");
        assert_eq!(&headers[1], "Title");

        let titles: Vec<String> = reader.records().map(|r| r.unwrap()[1].to_string()).collect();
        assert_eq!(titles, vec!["Dust control, east side", "Welding \"hot work\" permit"]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json_with_filter(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("open.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(path.clone()));

        let count = exporter.export(&ctx.db, &ProblemFilter::all().status("open")).unwrap();
        assert_eq!(count, 1);

        let exported: Vec<Problem> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].title, "Dust control, east side");
        assert_eq!(exported[0].priority, "high");
    }

    #[test]
    fn test_default_output_path() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("punchlist_export_"));
        assert!(name.ends_with(".json"));
    }
}
