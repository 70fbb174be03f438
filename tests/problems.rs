#[cfg(test)]
mod tests {
    use chrono::Utc;
    use punchlist::db::db::Db;
    use punchlist::db::problems::Problems;
    use punchlist::db::updates::Updates;
    use punchlist::libs::error::TrackerError;
    use punchlist::libs::problem::{NewProblem, Problem, ProblemFilter, ProblemPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ProblemTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ProblemTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("punchlist.db")).unwrap();
            ProblemTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_create_applies_defaults(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let problem = problems.create(&NewProblem::new("Leaking pipe in basement")).unwrap();

        assert!(problem.id > 0);
        assert_eq!(problem.title, "Leaking pipe in basement");
        assert_eq!(problem.priority, "medium");
        assert_eq!(problem.status, "open");
        assert_eq!(problem.reported_by, "Anonymous");
        assert_eq!(problem.estimated_cost, Some(0.0));
        assert_eq!(problem.actual_cost, None);
        assert_eq!(problem.resolved_at, None);
        assert_eq!(problem.created_at, problem.updated_at);
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_create_keeps_given_fields(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let fields = NewProblem {
            reported_by: Some("Site Manager".to_string()),
            assigned_to: Some("Plumbing crew".to_string()),
            estimated_cost: Some(1250.5),
            ..NewProblem::new("Cracked slab")
                .with_priority("critical")
                .with_status("in-progress")
                .with_location("Level 2, grid B3")
                .with_category(Some(7), "Quality Control")
        };

        let created = problems.create(&fields).unwrap();
        let fetched = problems.get(created.id).unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.priority, "critical");
        assert_eq!(fetched.status, "in-progress");
        assert_eq!(fetched.location, "Level 2, grid B3");
        assert_eq!(fetched.category_id, Some(7));
        assert_eq!(fetched.category, "Quality Control");
        assert_eq!(fetched.reported_by, "Site Manager");
        assert_eq!(fetched.estimated_cost, Some(1250.5));
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_create_rejects_blank_title(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);

        for title in ["", "   "] {
            let err = problems.create(&NewProblem::new(title)).unwrap_err();
            assert!(matches!(err, TrackerError::Validation(_)));
            assert_eq!(err.status_code(), 400);
        }
        assert!(problems.find(&ProblemFilter::all()).unwrap().is_empty());
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_create_tolerates_unknown_category_id(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let problem = problems
            .create(&NewProblem::new("Orphaned").with_category(Some(9999), ""))
            .unwrap();
        assert_eq!(problem.category_id, Some(9999));
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_find_by_id_includes_updates(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let updates = Updates::new(&ctx.db);
        let problem = problems.create(&NewProblem::new("Crane inspection overdue")).unwrap();

        updates.add(problem.id, "Inspector booked").unwrap();
        updates.add(problem.id, "Inspection passed").unwrap();

        let details = problems.find_by_id(problem.id).unwrap();
        assert_eq!(details.problem, problem);
        assert_eq!(details.updates.len(), 2);
        assert_eq!(details.updates[0].message, "Inspection passed");
        assert_eq!(details.updates[1].message, "Inspector booked");
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_find_by_id_unknown(ctx: &mut ProblemTestContext) {
        let err = Problems::new(&ctx.db).find_by_id(424242).unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(424242)));
        assert_eq!(err.status_code(), 404);
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_update_changes_only_present_fields(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let original = problems
            .create(&NewProblem::new("Blocked gate").with_location("North entrance").with_priority("high"))
            .unwrap();

        let updated = problems.update(original.id, &ProblemPatch::default().status("in-progress")).unwrap();

        assert_eq!(updated.status, "in-progress");
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.location, original.location);
        assert_eq!(updated.priority, original.priority);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_status_resolved_leaves_resolved_at_unset(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let original = problems.create(&NewProblem::new("Puddle at stair core")).unwrap();

        let updated = problems.update(original.id, &ProblemPatch::default().status("resolved")).unwrap();

        assert_eq!(updated.status, "resolved");
        assert_eq!(updated.resolved_at, None);
        let expected = Problem {
            status: "resolved".to_string(),
            updated_at: updated.updated_at,
            ..original
        };
        assert_eq!(updated, expected);
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_update_resolves_and_clears(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let problem = problems.create(&NewProblem::new("Broken scaffold clamp")).unwrap();

        let resolved_at = Utc::now();
        let patch = ProblemPatch {
            actual_cost: Some(Some(80.0)),
            ..ProblemPatch::default().resolve(resolved_at)
        };
        let resolved = problems.update(problem.id, &patch).unwrap();
        assert!(resolved.is_resolved());
        assert_eq!(resolved.status, "resolved");
        assert_eq!(resolved.resolved_at, Some(resolved_at));
        assert_eq!(resolved.actual_cost, Some(80.0));

        let reopen = ProblemPatch {
            actual_cost: Some(None),
            resolved_at: Some(None),
            ..ProblemPatch::default().status("open")
        };
        let reopened = problems.update(problem.id, &reopen).unwrap();
        assert_eq!(reopened.status, "open");
        assert_eq!(reopened.resolved_at, None);
        assert_eq!(reopened.actual_cost, None);
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_update_from_json_body(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let problem = problems
            .create(&NewProblem::new("Water ingress").with_category(Some(3), "Weather-Related"))
            .unwrap();

        let patch: ProblemPatch =
            serde_json::from_str(r#"{"categoryId": null, "assignedTo": "Roofer", "notes": null}"#).unwrap();
        let updated = problems.update(problem.id, &patch).unwrap();

        assert_eq!(updated.category_id, None);
        assert_eq!(updated.category, "Weather-Related");
        assert_eq!(updated.assigned_to, "Roofer");
        assert_eq!(updated.notes, "");
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_update_validation(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let problem = problems.create(&NewProblem::new("Loose handrail")).unwrap();

        let err = problems.update(problem.id, &ProblemPatch::default()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "No fields to update");
        assert_eq!(problems.get(problem.id).unwrap().unwrap(), problem);

        let err = problems.update(problem.id, &ProblemPatch::default().title("  ")).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(problems.get(problem.id).unwrap().unwrap().title, "Loose handrail");
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_update_unknown_id(ctx: &mut ProblemTestContext) {
        let err = Problems::new(&ctx.db)
            .update(777, &ProblemPatch::default().status("resolved"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test_context(ProblemTestContext)]
    #[test]
    fn test_delete_cascades_to_updates(ctx: &mut ProblemTestContext) {
        let problems = Problems::new(&ctx.db);
        let updates = Updates::new(&ctx.db);
        let problem = problems.create(&NewProblem::new("Missing signage")).unwrap();
        let neighbour = problems.create(&NewProblem::new("Hoarding panel loose")).unwrap();
        for message in ["Signs ordered", "Signs delivered", "Signs installed"] {
            updates.add(problem.id, message).unwrap();
        }
        updates.add(neighbour.id, "Panel re-fixed").unwrap();
        assert_eq!(updates.count_for(problem.id).unwrap(), 3);

        assert!(problems.delete(problem.id).unwrap());
        assert!(problems.get(problem.id).unwrap().is_none());
        assert!(problems.find_by_id(problem.id).unwrap_err().is_not_found());
        assert_eq!(updates.count_for(problem.id).unwrap(), 0);

        let kept = problems.find_by_id(neighbour.id).unwrap();
        assert_eq!(kept.updates.len(), 1);
        assert_eq!(kept.updates[0].message, "Panel re-fixed");

        assert!(!problems.delete(problem.id).unwrap());
    }
}
