use finlit_core::Clock;
use finlit_core::model::{QuizSession, SessionError, UserProgress};

/// Mastery below this value triggers a per-category focus recommendation.
const MASTERY_FOCUS_THRESHOLD: f64 = 60.0;
/// Overall accuracy below this triggers remediation guidance.
const LOW_ACCURACY_THRESHOLD: f64 = 70.0;
/// Overall accuracy above this triggers challenge guidance.
const HIGH_ACCURACY_THRESHOLD: f64 = 85.0;

/// Folds scored sessions into cumulative progress and derives guidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressService {
    clock: Clock,
}

impl ProgressService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Fold a scored session into a new progress snapshot.
    ///
    /// The caller's value is left untouched; persisting the returned snapshot
    /// is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotScored` if the session was never completed.
    pub fn apply_session(
        &self,
        progress: &UserProgress,
        session: &QuizSession,
    ) -> Result<UserProgress, SessionError> {
        progress.absorb_session(session, self.clock.now())
    }

    /// Advisory guidance derived from mastery and accuracy. No side effects.
    #[must_use]
    pub fn recommendations(&self, progress: &UserProgress) -> Vec<String> {
        let mut guidance = Vec::new();

        for (category, mastery) in progress.category_mastery() {
            if *mastery < MASTERY_FOCUS_THRESHOLD {
                guidance.push(format!(
                    "Focus on {} to build a stronger foundation",
                    category.label()
                ));
            }
        }

        if progress.overall_accuracy() < LOW_ACCURACY_THRESHOLD {
            guidance.push("Revisit the explanations after each quiz to close the gaps".to_string());
            guidance.push("Retake quizzes at your current level before moving up".to_string());
        } else if progress.overall_accuracy() > HIGH_ACCURACY_THRESHOLD {
            guidance.push("Try quizzes one level up for a bigger challenge".to_string());
            guidance.push("Branch into specialist topics like taxation or real estate".to_string());
        }

        guidance
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use finlit_core::model::{
        Category, Level, Question, QuestionId, QuizSession, SessionId, UserId,
    };
    use finlit_core::time::fixed_clock;
    use std::collections::{BTreeMap, BTreeSet};

    fn build_question(id: u64, category: Category) -> Question {
        Question::new(
            QuestionId::new(format!("q-{id}")),
            format!("Prompt {id}?"),
            ["A", "B", "C", "D"].map(String::from),
            0,
            Level::Novice,
            category,
            "",
            1,
            false,
        )
        .unwrap()
    }

    fn scored_session(total: usize, correct: usize) -> QuizSession {
        let questions = (0..total)
            .map(|i| build_question(i as u64, Category::Savings))
            .collect();
        let mut session =
            QuizSession::new(SessionId::generate(), Level::Novice, questions).unwrap();
        let answers = (0..total)
            .map(|i| if i < correct { Some(0) } else { Some(1) })
            .collect();
        session.record_answers(answers).unwrap();
        session.complete(finlit_core::time::fixed_now());
        session
    }

    fn progress_with(accuracy: f64, mastery: &[(Category, f64)]) -> UserProgress {
        UserProgress::from_persisted(
            UserId::new("u-1"),
            Level::Novice,
            2,
            20,
            accuracy,
            mastery.iter().copied().collect::<BTreeMap<_, _>>(),
            1,
            BTreeSet::new(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn apply_session_threads_the_service_clock() {
        let service = ProgressService::with_clock(fixed_clock());
        let progress = UserProgress::new(UserId::new("u-1"), Level::Novice);
        let session = scored_session(10, 8);

        let updated = service.apply_session(&progress, &session).unwrap();
        assert_eq!(updated.last_activity(), Some(finlit_core::time::fixed_now()));
        assert!((updated.overall_accuracy() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn unscored_session_is_rejected() {
        let service = ProgressService::new();
        let progress = UserProgress::new(UserId::new("u-1"), Level::Novice);
        let session = QuizSession::new(
            SessionId::generate(),
            Level::Novice,
            vec![build_question(1, Category::Savings)],
        )
        .unwrap();

        let err = service.apply_session(&progress, &session).unwrap_err();
        assert!(matches!(err, SessionError::NotScored));
    }

    #[test]
    fn weak_categories_each_get_a_focus_line() {
        let service = ProgressService::new();
        let progress = progress_with(
            75.0,
            &[
                (Category::Credit, 12.0),
                (Category::Savings, 95.0),
                (Category::Taxation, 59.9),
            ],
        );

        let guidance = service.recommendations(&progress);
        assert_eq!(guidance.len(), 2);
        assert!(guidance.iter().any(|g| g.contains("credit")));
        assert!(guidance.iter().any(|g| g.contains("taxation")));
        assert!(!guidance.iter().any(|g| g.contains("savings")));
    }

    #[test]
    fn low_accuracy_adds_remediation_pair() {
        let service = ProgressService::new();
        let progress = progress_with(55.0, &[]);

        let guidance = service.recommendations(&progress);
        assert_eq!(guidance.len(), 2);
        assert!(guidance[0].contains("explanations"));
        assert!(guidance[1].contains("Retake"));
    }

    #[test]
    fn high_accuracy_adds_challenge_pair() {
        let service = ProgressService::new();
        let progress = progress_with(92.0, &[]);

        let guidance = service.recommendations(&progress);
        assert_eq!(guidance.len(), 2);
        assert!(guidance[0].contains("one level up"));
    }

    #[test]
    fn middling_accuracy_adds_no_generic_guidance() {
        let service = ProgressService::new();
        let progress = progress_with(78.0, &[(Category::Economics, 80.0)]);

        assert!(service.recommendations(&progress).is_empty());
    }
}
