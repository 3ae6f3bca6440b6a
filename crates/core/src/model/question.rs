use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::taxonomy::{Category, Level};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("correct option index {0} is out of range")]
    InvalidCorrectIndex(u8),

    #[error("difficulty weight must be between 1 and 5, got {0}")]
    InvalidDifficultyWeight(u8),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

const OPTION_COUNT: usize = 4;

/// A multiple-choice question with exactly four options.
///
/// Questions are immutable once constructed; `correct_index` always points
/// into `options` and `difficulty_weight` stays within 1..=5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: u8,
    level: Level,
    category: Category,
    explanation: String,
    difficulty_weight: u8,
    region_specific: bool,
}

impl Question {
    pub const OPTION_COUNT: usize = OPTION_COUNT;

    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank,
    /// `QuestionError::InvalidCorrectIndex` if `correct_index` does not point
    /// into `options`, or `QuestionError::InvalidDifficultyWeight` if the
    /// weight falls outside 1..=5.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: u8,
        level: Level,
        category: Category,
        explanation: impl Into<String>,
        difficulty_weight: u8,
        region_specific: bool,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if usize::from(correct_index) >= options.len() {
            return Err(QuestionError::InvalidCorrectIndex(correct_index));
        }
        if !(1..=5).contains(&difficulty_weight) {
            return Err(QuestionError::InvalidDifficultyWeight(difficulty_weight));
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            level,
            category,
            explanation: explanation.into(),
            difficulty_weight,
            region_specific,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> u8 {
        self.correct_index
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty_weight(&self) -> u8 {
        self.difficulty_weight
    }

    #[must_use]
    pub fn region_specific(&self) -> bool {
        self.region_specific
    }

    /// Whether the given choice selects the correct option.
    ///
    /// An unanswered entry or an out-of-range choice never matches.
    #[must_use]
    pub fn is_correct(&self, answer: Option<u8>) -> bool {
        answer == Some(self.correct_index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
