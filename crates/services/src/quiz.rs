use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::sync::Arc;

use finlit_core::Clock;
use finlit_core::model::{Category, Level, Question, QuizSession, SessionId};
use finlit_content::ContentStore;

use crate::error::QuizError;

/// Default number of questions in a generated quiz.
pub const DEFAULT_QUIZ_SIZE: usize = 10;

//
// ─── QUIZ PLAN ─────────────────────────────────────────────────────────────────
//

/// Selection result for a generated quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    pub questions: Vec<Question>,
    pub requested: usize,
    pub pool_size: usize,
}

impl QuizPlan {
    /// Total number of questions selected.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// True when the filtered pool could not satisfy the requested count.
    ///
    /// Degrading to the whole pool is not an error, but callers offering a
    /// fixed-size quiz will want to surface it.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.questions.len() < self.requested
    }

    /// Returns true when no questions matched the selection at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── QUIZ BUILDER ──────────────────────────────────────────────────────────────
//

/// Builds a quiz by filtering and uniformly shuffling a question pool.
pub struct QuizBuilder {
    level: Level,
    count: usize,
    focus: Option<BTreeSet<Category>>,
}

impl QuizBuilder {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            count: DEFAULT_QUIZ_SIZE,
            focus: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Restrict selection to the given categories.
    ///
    /// An empty set means no restriction.
    #[must_use]
    pub fn with_focus(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        let set: BTreeSet<Category> = categories.into_iter().collect();
        self.focus = if set.is_empty() { None } else { Some(set) };
        self
    }

    /// Build a plan from a question pool using the given randomness source.
    ///
    /// Questions outside the builder's level or focus set are dropped, the
    /// remainder is shuffled, and the first `count` survive. A pool smaller
    /// than `count` is returned whole, in shuffled order.
    pub fn build<R: Rng + ?Sized>(
        self,
        pool: impl IntoIterator<Item = Question>,
        rng: &mut R,
    ) -> QuizPlan {
        let mut candidates: Vec<Question> = pool
            .into_iter()
            .filter(|q| q.level() == self.level)
            .filter(|q| {
                self.focus
                    .as_ref()
                    .is_none_or(|set| set.contains(&q.category()))
            })
            .collect();

        let pool_size = candidates.len();
        candidates.as_mut_slice().shuffle(rng);
        candidates.truncate(self.count);

        QuizPlan {
            questions: candidates,
            requested: self.count,
            pool_size,
        }
    }
}

//
// ─── QUIZ SERVICE ──────────────────────────────────────────────────────────────
//

/// Generates quizzes from the content store and scores completed sessions.
pub struct QuizService {
    store: Arc<ContentStore>,
    clock: Clock,
}

impl QuizService {
    #[must_use]
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            store,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Generate a quiz for the level, optionally focused on categories.
    #[must_use]
    pub fn generate_quiz(
        &self,
        level: Level,
        count: usize,
        focus: Option<&[Category]>,
    ) -> QuizPlan {
        self.generate_quiz_with_rng(level, count, focus, &mut rng())
    }

    /// Seedable variant for deterministic selection in tests.
    pub fn generate_quiz_with_rng<R: Rng + ?Sized>(
        &self,
        level: Level,
        count: usize,
        focus: Option<&[Category]>,
        rng: &mut R,
    ) -> QuizPlan {
        let mut builder = QuizBuilder::new(level).with_count(count);
        if let Some(categories) = focus {
            builder = builder.with_focus(categories.iter().copied());
        }
        builder.build(self.store.questions_for_level(level), rng)
    }

    /// Open a session over a generated plan under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` when the plan selected no questions.
    pub fn start_session(&self, user_level: Level, plan: QuizPlan) -> Result<QuizSession, QuizError> {
        Ok(QuizSession::new(
            SessionId::generate(),
            user_level,
            plan.questions,
        )?)
    }

    /// Score a session's recorded answers and stamp the completion time.
    pub fn score_session(&self, session: &mut QuizSession) {
        session.complete(self.clock.now());
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
