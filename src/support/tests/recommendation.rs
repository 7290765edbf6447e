use super::common::{
    applied_intervention, difficulty, entry, student, MemoryCatalog, UnavailableCatalog,
};
use crate::support::domain::{DifficultyKind, InterventionKind, Severity};
use crate::support::recommendation::{recommend, RecommendationError};

#[test]
fn targeted_entries_are_collected_in_encounter_order() {
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);
    let writing = difficulty("dif-2", DifficultyKind::Writing, Severity::Mild);
    let catalog = MemoryCatalog::default()
        .with_targeted(
            "dif-1",
            vec![entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading])],
        )
        .with_targeted(
            "dif-2",
            vec![entry("cat-2", InterventionKind::Pedagogical, &[DifficultyKind::Writing])],
        );

    let result = recommend(&student("stu-1"), &[reading, writing], &[], &catalog)
        .expect("recommendation succeeds");

    let ids: Vec<&str> = result.iter().map(|entry| entry.id().0.as_str()).collect();
    assert_eq!(ids, vec!["cat-1", "cat-2"]);
}

#[test]
fn an_entry_shared_by_two_difficulties_appears_once() {
    let shared = entry(
        "cat-1",
        InterventionKind::Pedagogical,
        &[DifficultyKind::Reading, DifficultyKind::Writing],
    );
    let catalog = MemoryCatalog::default()
        .with_targeted("dif-1", vec![shared.clone()])
        .with_targeted("dif-2", vec![shared]);
    let difficulties = [
        difficulty("dif-1", DifficultyKind::Reading, Severity::Mild),
        difficulty("dif-2", DifficultyKind::Writing, Severity::Mild),
    ];

    let result = recommend(&student("stu-1"), &difficulties, &[], &catalog)
        .expect("recommendation succeeds");

    assert_eq!(result.len(), 1);
}

#[test]
fn applied_entries_are_excluded_regardless_of_intervention_status() {
    let catalog = MemoryCatalog::default().with_targeted(
        "dif-1",
        vec![
            entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading]),
            entry("cat-2", InterventionKind::Pedagogical, &[DifficultyKind::Reading]),
        ],
    );
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);
    // A canceled application still counts as already tried.
    let canceled = applied_intervention("int-1", "stu-1", "cat-1")
        .cancel()
        .expect("cancel succeeds");

    let result = recommend(&student("stu-1"), &[reading], &[canceled], &catalog)
        .expect("recommendation succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id().0, "cat-2");
}

#[test]
fn inactive_entries_are_never_recommended() {
    let retired = entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading])
        .deactivate()
        .expect("deactivate succeeds");
    let catalog = MemoryCatalog::default().with_targeted("dif-1", vec![retired]);
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);

    let result = recommend(&student("stu-1"), &[reading], &[], &catalog)
        .expect("recommendation succeeds");

    assert!(result.is_empty());
}

#[test]
fn fallback_pass_keeps_generic_and_intersecting_entries() {
    // No targeted entries at all, so the broader pass runs.
    let catalog = MemoryCatalog::default().with_entries(vec![
        entry("cat-1", InterventionKind::Multidisciplinary, &[]),
        entry("cat-2", InterventionKind::Pedagogical, &[DifficultyKind::Reading]),
        entry("cat-3", InterventionKind::Behavioral, &[DifficultyKind::Behavioral]),
    ]);
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);

    let result = recommend(&student("stu-1"), &[reading], &[], &catalog)
        .expect("recommendation succeeds");

    let ids: Vec<&str> = result.iter().map(|entry| entry.id().0.as_str()).collect();
    assert_eq!(ids, vec!["cat-1", "cat-2"]);
}

#[test]
fn fallback_pass_is_skipped_when_targeting_found_anything() {
    let catalog = MemoryCatalog::default()
        .with_targeted(
            "dif-1",
            vec![entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading])],
        )
        .with_entries(vec![entry("cat-2", InterventionKind::Multidisciplinary, &[])]);
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);

    let result = recommend(&student("stu-1"), &[reading], &[], &catalog)
        .expect("recommendation succeeds");

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id().0, "cat-1");
}

#[test]
fn severe_difficulty_moves_multidisciplinary_entries_to_the_front() {
    let catalog = MemoryCatalog::default().with_targeted(
        "dif-1",
        vec![
            entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading]),
            entry("cat-2", InterventionKind::Multidisciplinary, &[DifficultyKind::Reading]),
            entry("cat-3", InterventionKind::Psychological, &[DifficultyKind::Reading]),
            entry("cat-4", InterventionKind::Multidisciplinary, &[DifficultyKind::Reading]),
        ],
    );
    let severe = difficulty("dif-1", DifficultyKind::Reading, Severity::Severe);

    let result = recommend(&student("stu-1"), &[severe], &[], &catalog)
        .expect("recommendation succeeds");

    let ids: Vec<&str> = result.iter().map(|entry| entry.id().0.as_str()).collect();
    // Relative order is preserved inside each partition.
    assert_eq!(ids, vec!["cat-2", "cat-4", "cat-1", "cat-3"]);
}

#[test]
fn without_a_severe_difficulty_the_order_is_untouched() {
    let catalog = MemoryCatalog::default().with_targeted(
        "dif-1",
        vec![
            entry("cat-1", InterventionKind::Pedagogical, &[DifficultyKind::Reading]),
            entry("cat-2", InterventionKind::Multidisciplinary, &[DifficultyKind::Reading]),
        ],
    );
    let moderate = difficulty("dif-1", DifficultyKind::Reading, Severity::Moderate);

    let result = recommend(&student("stu-1"), &[moderate], &[], &catalog)
        .expect("recommendation succeeds");

    let ids: Vec<&str> = result.iter().map(|entry| entry.id().0.as_str()).collect();
    assert_eq!(ids, vec!["cat-1", "cat-2"]);
}

#[test]
fn an_empty_catalog_yields_an_empty_list() {
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);

    let result = recommend(&student("stu-1"), &[reading], &[], &MemoryCatalog::default())
        .expect("recommendation succeeds");

    assert!(result.is_empty());
}

#[test]
fn a_student_without_difficulties_is_a_precondition_failure() {
    let result = recommend(&student("stu-1"), &[], &[], &MemoryCatalog::default());

    assert!(
        matches!(result, Err(RecommendationError::NoDifficulties(ref id)) if id == "stu-1")
    );
}

#[test]
fn catalog_failures_propagate() {
    let reading = difficulty("dif-1", DifficultyKind::Reading, Severity::Mild);

    let result = recommend(&student("stu-1"), &[reading], &[], &UnavailableCatalog);

    assert!(matches!(result, Err(RecommendationError::Lookup(_))));
}
