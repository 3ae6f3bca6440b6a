use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::ids::SessionId;
use crate::model::question::Question;
use crate::model::taxonomy::{Category, Level};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("session has not been scored yet")]
    NotScored,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// A personalized quiz: a fixed question list answered once, then scored.
///
/// Sessions start unscored. `complete` derives the score and the sparse
/// per-category correct counts purely from the question list and the answer
/// sheet, so re-scoring an unchanged session recomputes the same values and
/// only moves `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    session_id: SessionId,
    user_level: Level,
    questions: Vec<Question>,
    user_answers: Vec<Option<u8>>,
    score: u32,
    time_taken_seconds: u32,
    category_performance: BTreeMap<Category, u32>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Creates an unscored session over a fixed question list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        session_id: SessionId,
        user_level: Level,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let user_answers = vec![None; questions.len()];
        Ok(Self {
            session_id,
            user_level,
            questions,
            user_answers,
            score: 0,
            time_taken_seconds: 0,
            category_performance: BTreeMap::new(),
            completed_at: None,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn user_level(&self) -> Level {
        self.user_level
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn user_answers(&self) -> &[Option<u8>] {
        &self.user_answers
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn time_taken_seconds(&self) -> u32 {
        self.time_taken_seconds
    }

    /// Correct answers per category; only categories with at least one
    /// correct answer appear as keys.
    #[must_use]
    pub fn category_performance(&self) -> &BTreeMap<Category, u32> {
        &self.category_performance
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Record the user's full answer sheet.
    ///
    /// Entries are positional: `answers[i]` answers `questions[i]`, `None`
    /// marks an unanswered question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AnswerCountMismatch` when the sheet length does
    /// not match the question count.
    pub fn record_answers(&mut self, answers: Vec<Option<u8>>) -> Result<(), SessionError> {
        if answers.len() != self.questions.len() {
            return Err(SessionError::AnswerCountMismatch {
                expected: self.questions.len(),
                got: answers.len(),
            });
        }
        self.user_answers = answers;
        Ok(())
    }

    /// Record how long the user took, as reported by the caller.
    pub fn record_time_taken(&mut self, seconds: u32) {
        self.time_taken_seconds = seconds;
    }

    /// Score the recorded answers and stamp the completion time.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        let mut score: u32 = 0;
        let mut performance: BTreeMap<Category, u32> = BTreeMap::new();

        for (question, answer) in self.questions.iter().zip(&self.user_answers) {
            if question.is_correct(*answer) {
                score += 1;
                *performance.entry(question.category()).or_insert(0) += 1;
            }
        }

        self.score = score;
        self.category_performance = performance;
        self.completed_at = Some(now);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
