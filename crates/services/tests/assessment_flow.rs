use std::sync::Arc;

use finlit_content::ContentStore;
use finlit_core::model::{Category, Level, UserId};
use finlit_core::time::fixed_clock;
use finlit_services::{AssessmentService, LearningLoopService};
use finlit_storage::repository::{InMemoryRepository, ProgressRepository};

#[test]
fn shipped_pretest_places_an_all_correct_sheet_at_intermediate() {
    let store = ContentStore::load().unwrap();
    let service = AssessmentService::new(&store).with_clock(fixed_clock());

    // All five shipped pretest answers correct. Level accumulators come out
    // novice 2, intermediate 4, advanced 3, so intermediate wins.
    let result = service.assess(UserId::guest(), &[1, 2, 0, 0, 2]);

    assert_eq!(result.primary_level, Level::Intermediate);
    assert_eq!(result.strengths, vec![Category::Taxation]);
    assert_eq!(
        result.strengths.len() + result.improvement_areas.len(),
        Category::COUNT
    );
}

#[test]
fn shipped_pretest_places_an_empty_sheet_at_novice() {
    let store = ContentStore::load().unwrap();
    let service = AssessmentService::new(&store).with_clock(fixed_clock());

    let result = service.assess(UserId::guest(), &[]);

    assert_eq!(result.primary_level, Level::Novice);
    assert!(result.strengths.is_empty());
    assert_eq!(result.improvement_areas.len(), Category::COUNT);
    // Improvement summary plus the novice guidance line.
    assert_eq!(result.recommended_topics.len(), 2);
}

#[test]
fn assessment_persists_the_users_level() {
    let repo = InMemoryRepository::new();
    let store = Arc::new(ContentStore::load().unwrap());
    let service = LearningLoopService::new(
        fixed_clock(),
        store,
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    );
    let user = UserId::new("assessed-1");

    let result = service.assess_user(&user, &[1, 2, 0, 0, 2]).unwrap();
    assert_eq!(result.primary_level, Level::Intermediate);

    let stored = repo.load_progress(&user).unwrap().unwrap();
    assert_eq!(stored.current_level(), Level::Intermediate);
    assert_eq!(stored.total_quizzes_completed(), 0);
}

#[test]
fn reassessment_moves_the_level_but_keeps_history() {
    let repo = InMemoryRepository::new();
    let store = Arc::new(ContentStore::load().unwrap());
    let service = LearningLoopService::new(
        fixed_clock(),
        store,
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    );
    let user = UserId::new("assessed-2");

    // Start at intermediate, complete a quiz, then bomb a reassessment.
    service.assess_user(&user, &[1, 2, 0, 0, 2]).unwrap();
    let mut session = service.start_quiz(Level::Intermediate, 3, None).unwrap();
    let answers = vec![Some(0); session.total_questions()];
    service.complete_quiz(&user, &mut session, answers, 30).unwrap();

    let result = service.assess_user(&user, &[]).unwrap();
    assert_eq!(result.primary_level, Level::Novice);

    let stored = repo.load_progress(&user).unwrap().unwrap();
    assert_eq!(stored.current_level(), Level::Novice);
    assert_eq!(stored.total_quizzes_completed(), 1, "history survives");
}
