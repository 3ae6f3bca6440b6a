use std::collections::{HashMap, HashSet};
use thiserror::Error;

use finlit_core::model::{
    Category, GlossaryTerm, Level, Question, QuestionError, TermError, TermId,
};

use crate::records::{GlossaryRecord, QuestionRecord};

const QUESTION_BANK: &str = include_str!("../data/questions.json");
const GLOSSARY: &str = include_str!("../data/glossary.json");
const PRETEST: &str = include_str!("../data/pretest.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("failed to parse embedded content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Term(#[from] TermError),

    #[error("duplicate content id: {0}")]
    DuplicateId(String),
}

//
// ─── CONTENT STORE ─────────────────────────────────────────────────────────────
//

/// Immutable bank of questions, glossary terms and the fixed pretest.
///
/// Content is parsed and validated once at construction; every query is a
/// pure read. Unknown ids in relationship lookups yield empty results rather
/// than errors.
#[derive(Debug, Clone)]
pub struct ContentStore {
    questions: Vec<Question>,
    terms: Vec<GlossaryTerm>,
    term_index: HashMap<TermId, usize>,
    pretest: Vec<Question>,
}

impl ContentStore {
    /// Load the store from the embedded content resources.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if a resource fails to parse, a record violates
    /// a domain invariant, or an id appears twice within a bank.
    pub fn load() -> Result<Self, ContentError> {
        let questions: Vec<QuestionRecord> = serde_json::from_str(QUESTION_BANK)?;
        let terms: Vec<GlossaryRecord> = serde_json::from_str(GLOSSARY)?;
        let pretest: Vec<QuestionRecord> = serde_json::from_str(PRETEST)?;

        let questions = questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let terms = terms
            .into_iter()
            .map(GlossaryRecord::into_term)
            .collect::<Result<Vec<_>, _>>()?;
        let pretest = pretest
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_parts(questions, terms, pretest)
    }

    /// Build a store from already-validated content, for tests and embedders
    /// shipping their own banks.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::DuplicateId` if an id appears twice within the
    /// question bank, the glossary, or the pretest.
    pub fn from_parts(
        questions: Vec<Question>,
        terms: Vec<GlossaryTerm>,
        pretest: Vec<Question>,
    ) -> Result<Self, ContentError> {
        let mut seen_questions = HashSet::new();
        for question in &questions {
            if !seen_questions.insert(question.id().clone()) {
                return Err(ContentError::DuplicateId(question.id().to_string()));
            }
        }
        let mut seen_pretest = HashSet::new();
        for question in &pretest {
            if !seen_pretest.insert(question.id().clone()) {
                return Err(ContentError::DuplicateId(question.id().to_string()));
            }
        }

        let mut term_index = HashMap::with_capacity(terms.len());
        for (position, term) in terms.iter().enumerate() {
            if term_index.insert(term.id().clone(), position).is_some() {
                return Err(ContentError::DuplicateId(term.id().to_string()));
            }
        }

        Ok(Self {
            questions,
            terms,
            term_index,
            pretest,
        })
    }

    /// Every bank question, in bank order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// All bank questions tagged with exactly `level`.
    ///
    /// There is no inheritance between tiers; novice results never include
    /// intermediate questions.
    #[must_use]
    pub fn questions_for_level(&self, level: Level) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.level() == level)
            .cloned()
            .collect()
    }

    /// Every glossary term, in bank order.
    #[must_use]
    pub fn terms_all(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Glossary terms tagged with exactly `category`.
    #[must_use]
    pub fn terms_by_category(&self, category: Category) -> Vec<GlossaryTerm> {
        self.terms
            .iter()
            .filter(|t| t.category() == category)
            .cloned()
            .collect()
    }

    /// Terms referenced by the given term's related list, in list order.
    ///
    /// An unknown `term_id` and dangling references both resolve to nothing.
    #[must_use]
    pub fn related_terms(&self, term_id: &TermId) -> Vec<GlossaryTerm> {
        let Some(&position) = self.term_index.get(term_id) else {
            return Vec::new();
        };

        self.terms[position]
            .related_term_ids()
            .iter()
            .filter_map(|related| {
                self.term_index
                    .get(related)
                    .map(|&i| self.terms[i].clone())
            })
            .collect()
    }

    /// The fixed ordered pretest, distinct from the practice bank.
    #[must_use]
    pub fn pretest(&self) -> &[Question] {
        &self.pretest
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
