#[cfg(test)]
mod tests {
    use punchlist::db::db::Db;
    use punchlist::db::problems::Problems;
    use punchlist::db::statistics::{GroupCount, Statistics, StatisticsSummary};
    use punchlist::libs::problem::{NewProblem, Priority, ProblemPatch, Status};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StatisticsTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for StatisticsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("punchlist.db")).unwrap();
            StatisticsTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_empty_store(ctx: &mut StatisticsTestContext) {
        let stats = Statistics::new(&ctx.db).compute().unwrap();

        assert!(stats.by_status.is_empty());
        assert!(stats.by_priority.is_empty());
        assert_eq!(stats.summary(), StatisticsSummary::default());
        assert!(stats.status_distribution().iter().all(|(_, total)| *total == 0));
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_counts_per_group(ctx: &mut StatisticsTestContext) {
        let problems = Problems::new(&ctx.db);
        problems.create(&NewProblem::new("a").with_priority("critical")).unwrap();
        problems.create(&NewProblem::new("b").with_priority("critical")).unwrap();
        problems.create(&NewProblem::new("c").with_priority("low").with_status("on-hold")).unwrap();
        let d = problems.create(&NewProblem::new("d")).unwrap();
        problems.update(d.id, &ProblemPatch::default().status("resolved")).unwrap();

        let stats = Statistics::new(&ctx.db).compute().unwrap();

        assert_eq!(stats.status_count("open"), 2);
        assert_eq!(stats.status_count("on-hold"), 1);
        assert_eq!(stats.status_count("resolved"), 1);
        assert_eq!(stats.status_count("in-progress"), 0);
        assert!(stats.by_status.iter().all(|g| g.value != "in-progress"));

        assert_eq!(stats.priority_count("critical"), 2);
        assert_eq!(stats.priority_count("medium"), 1);
        assert_eq!(stats.priority_count("low"), 1);
        assert_eq!(stats.by_priority.iter().map(|g| g.total).sum::<usize>(), 4);

        assert_eq!(
            stats.summary(),
            StatisticsSummary {
                total: 4,
                open: 2,
                critical: 2,
                resolved: 1
            }
        );
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_distributions_are_zero_filled(ctx: &mut StatisticsTestContext) {
        Problems::new(&ctx.db).create(&NewProblem::new("only")).unwrap();

        let stats = Statistics::new(&ctx.db).compute().unwrap();

        assert_eq!(
            stats.status_distribution(),
            vec![(Status::Open, 1), (Status::InProgress, 0), (Status::OnHold, 0), (Status::Resolved, 0)]
        );
        assert_eq!(
            stats.priority_distribution(),
            vec![(Priority::Critical, 0), (Priority::High, 0), (Priority::Medium, 1), (Priority::Low, 0)]
        );
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_unknown_labels_are_grouped(ctx: &mut StatisticsTestContext) {
        Problems::new(&ctx.db)
            .create(&NewProblem::new("custom").with_status("waiting-on-client"))
            .unwrap();

        let stats = Statistics::new(&ctx.db).compute().unwrap();
        assert_eq!(
            stats.by_status,
            vec![GroupCount {
                value: "waiting-on-client".to_string(),
                total: 1
            }]
        );
        assert_eq!(stats.summary().total, 1);
    }
}
