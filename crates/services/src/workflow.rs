use std::sync::Arc;

use finlit_core::Clock;
use finlit_core::model::{
    AssessmentResult, Category, Level, QuizSession, UserId, UserProgress,
};
use finlit_content::ContentStore;
use finlit_storage::repository::{ProgressRepository, SessionRepository};

use crate::assessment::AssessmentService;
use crate::error::LearningError;
use crate::progress::ProgressService;
use crate::quiz::QuizService;

/// Result of completing a quiz: the session facts plus the updated progress.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total_questions: usize,
    pub progress: UserProgress,
}

/// Orchestrates assessment, quiz generation, scoring and persisted progress.
///
/// The repositories are the caller-supplied persistence seam; swap in a real
/// backend by implementing the storage traits.
#[derive(Clone)]
pub struct LearningLoopService {
    clock: Clock,
    store: Arc<ContentStore>,
    progress_repo: Arc<dyn ProgressRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl LearningLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        store: Arc<ContentStore>,
        progress_repo: Arc<dyn ProgressRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            store,
            progress_repo,
            sessions,
        }
    }

    fn quiz_service(&self) -> QuizService {
        QuizService::new(Arc::clone(&self.store)).with_clock(self.clock)
    }

    fn progress_service(&self) -> ProgressService {
        ProgressService::with_clock(self.clock)
    }

    /// Run the pretest for a user and persist the resulting level.
    ///
    /// Users without stored progress get a fresh record at the assessed
    /// level; existing users keep their history and move to the new level.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Storage` if the progress store fails.
    pub fn assess_user(
        &self,
        user_id: &UserId,
        answers: &[u8],
    ) -> Result<AssessmentResult, LearningError> {
        let assessment = AssessmentService::new(self.store.as_ref()).with_clock(self.clock);
        let result = assessment.assess(user_id.clone(), answers);

        let progress = match self.progress_repo.load_progress(user_id)? {
            Some(existing) => existing.with_level(result.primary_level),
            None => UserProgress::new(user_id.clone(), result.primary_level),
        };
        self.progress_repo.save_progress(&progress)?;

        Ok(result)
    }

    /// Generate and persist a fresh quiz session for the level.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Quiz` when the filtered pool is empty, or
    /// `LearningError::Storage` if the session cannot be saved.
    pub fn start_quiz(
        &self,
        level: Level,
        count: usize,
        focus: Option<&[Category]>,
    ) -> Result<QuizSession, LearningError> {
        let quiz = self.quiz_service();
        let plan = quiz.generate_quiz(level, count, focus);
        let session = quiz.start_session(level, plan)?;
        self.sessions.save_session(&session)?;
        Ok(session)
    }

    /// Record answers, score the session and fold it into stored progress.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Session` on an answer-sheet mismatch and
    /// `LearningError::Storage` if persistence fails.
    pub fn complete_quiz(
        &self,
        user_id: &UserId,
        session: &mut QuizSession,
        answers: Vec<Option<u8>>,
        time_taken_seconds: u32,
    ) -> Result<QuizOutcome, LearningError> {
        session.record_answers(answers)?;
        session.record_time_taken(time_taken_seconds);
        self.quiz_service().score_session(session);

        let prior = match self.progress_repo.load_progress(user_id)? {
            Some(existing) => existing,
            None => UserProgress::new(user_id.clone(), session.user_level()),
        };
        let updated = self.progress_service().apply_session(&prior, session)?;

        self.sessions.save_session(session)?;
        self.progress_repo.save_progress(&updated)?;

        Ok(QuizOutcome {
            score: session.score(),
            total_questions: session.total_questions(),
            progress: updated,
        })
    }

    /// Advisory guidance for a user's stored progress.
    ///
    /// Unknown users get an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Storage` if the progress store fails.
    pub fn recommendations(&self, user_id: &UserId) -> Result<Vec<String>, LearningError> {
        match self.progress_repo.load_progress(user_id)? {
            Some(progress) => Ok(self.progress_service().recommendations(&progress)),
            None => Ok(Vec::new()),
        }
    }
}
