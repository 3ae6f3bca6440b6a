use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

use crate::model::ids::UserId;
use crate::model::session::{QuizSession, SessionError};
use crate::model::taxonomy::{Category, Level};
use crate::time::whole_days_between;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("overall accuracy must be within 0-100, got {0}")]
    InvalidAccuracy(f64),
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

/// Milestones a user can unlock. Once earned, an achievement never goes away.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Achievement {
    /// Every question in a session answered correctly.
    #[serde(rename = "Perfect Score")]
    PerfectScore,
    /// Five or more quizzes completed overall.
    #[serde(rename = "Quiz Whiz")]
    QuizWhiz,
}

impl Achievement {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Achievement::PerfectScore => "Perfect Score",
            Achievement::QuizWhiz => "Quiz Whiz",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Completed-quiz count at which `Quiz Whiz` unlocks.
const QUIZ_WHIZ_THRESHOLD: u32 = 5;

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Cumulative learning state for one user.
///
/// Created on the first session and folded forward by `absorb_session`;
/// storage lifecycle belongs to the caller's persistence layer. Mastery is
/// tracked only for categories the user has touched.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProgress {
    user_id: UserId,
    current_level: Level,
    total_quizzes_completed: u32,
    total_questions_answered: u32,
    overall_accuracy: f64,
    category_mastery: BTreeMap<Category, f64>,
    learning_streak: u32,
    achievements: BTreeSet<Achievement>,
    last_activity: Option<DateTime<Utc>>,
}

impl UserProgress {
    /// Fresh progress for a user's first session.
    #[must_use]
    pub fn new(user_id: UserId, current_level: Level) -> Self {
        Self {
            user_id,
            current_level,
            total_quizzes_completed: 0,
            total_questions_answered: 0,
            overall_accuracy: 0.0,
            category_mastery: BTreeMap::new(),
            learning_streak: 0,
            achievements: BTreeSet::new(),
            last_activity: None,
        }
    }

    /// Rehydrate a progress snapshot from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidAccuracy` if the stored accuracy is not
    /// a finite value within 0-100.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        user_id: UserId,
        current_level: Level,
        total_quizzes_completed: u32,
        total_questions_answered: u32,
        overall_accuracy: f64,
        category_mastery: BTreeMap<Category, f64>,
        learning_streak: u32,
        achievements: BTreeSet<Achievement>,
        last_activity: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if !overall_accuracy.is_finite() || !(0.0..=100.0).contains(&overall_accuracy) {
            return Err(ProgressError::InvalidAccuracy(overall_accuracy));
        }

        Ok(Self {
            user_id,
            current_level,
            total_quizzes_completed,
            total_questions_answered,
            overall_accuracy,
            category_mastery,
            learning_streak,
            achievements,
            last_activity,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn current_level(&self) -> Level {
        self.current_level
    }

    #[must_use]
    pub fn total_quizzes_completed(&self) -> u32 {
        self.total_quizzes_completed
    }

    #[must_use]
    pub fn total_questions_answered(&self) -> u32 {
        self.total_questions_answered
    }

    /// Running accuracy in percent across every answered question.
    #[must_use]
    pub fn overall_accuracy(&self) -> f64 {
        self.overall_accuracy
    }

    #[must_use]
    pub fn category_mastery(&self) -> &BTreeMap<Category, f64> {
        &self.category_mastery
    }

    #[must_use]
    pub fn learning_streak(&self) -> u32 {
        self.learning_streak
    }

    #[must_use]
    pub fn achievements(&self) -> &BTreeSet<Achievement> {
        &self.achievements
    }

    #[must_use]
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    #[must_use]
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_activity
    }

    /// Move the user to a new literacy level, e.g. after an assessment.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.current_level = level;
        self
    }

    /// Fold a scored session into a new progress snapshot.
    ///
    /// The receiver is left untouched; callers persist the returned value.
    ///
    /// The running accuracy is recombined from the stored percentage rather
    /// than an exact correct-answer tally, so it can drift slightly over many
    /// sessions. Mastery averages the prior value against the session's raw
    /// correct count for that category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotScored` if the session was never completed.
    pub fn absorb_session(
        &self,
        session: &QuizSession,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if !session.is_complete() {
            return Err(SessionError::NotScored);
        }

        let session_total = u32::try_from(session.total_questions()).unwrap_or(u32::MAX);

        let total_correct = f64::from(self.total_questions_answered) * self.overall_accuracy
            / 100.0
            + f64::from(session.score());
        let total_answered = self.total_questions_answered.saturating_add(session_total);
        let overall_accuracy = if total_answered > 0 {
            total_correct / f64::from(total_answered) * 100.0
        } else {
            0.0
        };

        let total_quizzes_completed = self.total_quizzes_completed.saturating_add(1);

        let mut category_mastery = self.category_mastery.clone();
        for (category, correct) in session.category_performance() {
            let prior = category_mastery.get(category).copied().unwrap_or(0.0);
            category_mastery.insert(*category, (prior + f64::from(*correct)) / 2.0);
        }

        let mut achievements = self.achievements.clone();
        if session.score() == session_total {
            achievements.insert(Achievement::PerfectScore);
        }
        if total_quizzes_completed >= QUIZ_WHIZ_THRESHOLD {
            achievements.insert(Achievement::QuizWhiz);
        }

        // Recency indicator, not a count of consecutive days.
        let learning_streak = match self.last_activity {
            None => 1,
            Some(last) if whole_days_between(now, last) <= 1 => 1,
            Some(_) => 0,
        };

        Ok(Self {
            user_id: self.user_id.clone(),
            current_level: self.current_level,
            total_quizzes_completed,
            total_questions_answered: total_answered,
            overall_accuracy,
            category_mastery,
            learning_streak,
            achievements,
            last_activity: Some(now),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::{QuestionId, SessionId};
    use crate::model::question::Question;
    use crate::time::fixed_now;
    use chrono::Duration;
    use uuid::Uuid;

    fn build_question(id: u64, category: Category) -> Question {
        Question::new(
            QuestionId::new(format!("q-{id}")),
            format!("Question {id}?"),
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

    /// Scored session with `correct` of `total` questions answered right,
    /// all in the given category.
    fn scored_session(total: usize, correct: usize, category: Category) -> QuizSession {
        let questions = (0..total)
            .map(|i| build_question(i as u64, category))
            .collect();
        let mut session =
            QuizSession::new(SessionId::new(Uuid::nil()), Level::Novice, questions).unwrap();
        let answers = (0..total)
            .map(|i| if i < correct { Some(0) } else { Some(1) })
            .collect();
        session.record_answers(answers).unwrap();
        session.complete(fixed_now());
        session
    }

    fn fresh_progress() -> UserProgress {
        UserProgress::new(UserId::new("u-1"), Level::Novice)
    }

    #[test]
    fn unscored_session_is_rejected() {
        let questions = vec![build_question(1, Category::Savings)];
        let session =
            QuizSession::new(SessionId::new(Uuid::nil()), Level::Novice, questions).unwrap();
        let err = fresh_progress()
            .absorb_session(&session, fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::NotScored));
    }

    #[test]
    fn first_session_sets_running_totals() {
        let session = scored_session(10, 8, Category::Savings);
        let updated = fresh_progress()
            .absorb_session(&session, fixed_now())
            .unwrap();

        assert_eq!(updated.total_quizzes_completed(), 1);
        assert_eq!(updated.total_questions_answered(), 10);
        assert!((updated.overall_accuracy() - 80.0).abs() < 1e-9);
        assert!(!updated.has_achievement(Achievement::PerfectScore));
        assert_eq!(updated.last_activity(), Some(fixed_now()));
    }

    #[test]
    fn accuracy_recombines_with_prior_totals() {
        // 50% over 10 prior answers, then 8/10: (5 + 8) / 20 = 65%.
        let prior = UserProgress::from_persisted(
            UserId::new("u-1"),
            Level::Novice,
            1,
            10,
            50.0,
            BTreeMap::new(),
            1,
            BTreeSet::new(),
            Some(fixed_now()),
        )
        .unwrap();

        let session = scored_session(10, 8, Category::Credit);
        let updated = prior.absorb_session(&session, fixed_now()).unwrap();

        assert_eq!(updated.total_questions_answered(), 20);
        assert!((updated.overall_accuracy() - 65.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_score_unlocks_on_full_marks() {
        let session = scored_session(10, 10, Category::Investing);
        let updated = fresh_progress()
            .absorb_session(&session, fixed_now())
            .unwrap();
        assert!(updated.has_achievement(Achievement::PerfectScore));
    }

    #[test]
    fn quiz_whiz_unlocks_on_fifth_quiz() {
        let mut progress = fresh_progress();
        for round in 0..5 {
            let session = scored_session(4, 2, Category::Budgeting);
            progress = progress.absorb_session(&session, fixed_now()).unwrap();
            if round < 4 {
                assert!(!progress.has_achievement(Achievement::QuizWhiz));
            }
        }
        assert_eq!(progress.total_quizzes_completed(), 5);
        assert!(progress.has_achievement(Achievement::QuizWhiz));
    }

    #[test]
    fn achievements_accumulate_and_never_disappear() {
        let perfect = scored_session(3, 3, Category::Savings);
        let poor = scored_session(4, 0, Category::Savings);

        let progress = fresh_progress()
            .absorb_session(&perfect, fixed_now())
            .unwrap();
        let progress = progress.absorb_session(&poor, fixed_now()).unwrap();

        assert!(progress.has_achievement(Achievement::PerfectScore));
    }

    #[test]
    fn mastery_averages_raw_correct_counts() {
        // The session count is a raw correct-answer count, not a percentage;
        // the average therefore lands far below the 0-100 scale.
        let progress = fresh_progress();
        let first = scored_session(5, 3, Category::Credit);
        let progress = progress.absorb_session(&first, fixed_now()).unwrap();
        assert!(
            (progress.category_mastery()[&Category::Credit] - 1.5).abs() < 1e-9,
            "(0 + 3) / 2"
        );

        let second = scored_session(5, 3, Category::Credit);
        let progress = progress.absorb_session(&second, fixed_now()).unwrap();
        assert!(
            (progress.category_mastery()[&Category::Credit] - 2.25).abs() < 1e-9,
            "(1.5 + 3) / 2"
        );
    }

    #[test]
    fn categories_without_correct_answers_stay_untracked() {
        let session = scored_session(4, 0, Category::Economics);
        let updated = fresh_progress()
            .absorb_session(&session, fixed_now())
            .unwrap();
        assert!(updated.category_mastery().is_empty());
    }

    #[test]
    fn streak_reflects_recency_only() {
        let now = fixed_now();
        let session = scored_session(4, 2, Category::Savings);

        // First activity ever.
        let progress = fresh_progress().absorb_session(&session, now).unwrap();
        assert_eq!(progress.learning_streak(), 1);

        // Next activity within a day keeps the streak.
        let next_day = now + Duration::hours(20);
        let progress = progress.absorb_session(&session, next_day).unwrap();
        assert_eq!(progress.learning_streak(), 1);

        // A long gap resets it to zero.
        let much_later = next_day + Duration::days(4);
        let progress = progress.absorb_session(&session, much_later).unwrap();
        assert_eq!(progress.learning_streak(), 0);
    }

    #[test]
    fn persisted_accuracy_is_bounded() {
        let err = UserProgress::from_persisted(
            UserId::new("u-1"),
            Level::Novice,
            0,
            0,
            120.0,
            BTreeMap::new(),
            0,
            BTreeSet::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidAccuracy(_)));
    }

    #[test]
    fn achievement_labels_match_stored_strings() {
        assert_eq!(Achievement::PerfectScore.to_string(), "Perfect Score");
        assert_eq!(Achievement::QuizWhiz.to_string(), "Quiz Whiz");
    }
}
