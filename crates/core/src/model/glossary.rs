use thiserror::Error;

use crate::model::ids::TermId;
use crate::model::taxonomy::{Category, Level};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TermError {
    #[error("glossary term cannot be empty")]
    EmptyTerm,

    #[error("glossary definition cannot be empty")]
    EmptyDefinition,
}

/// A glossary entry with optional cross-references into the term bank.
///
/// `related_term_ids` is a soft relationship: a listed id is allowed to
/// reference a term that no longer exists, and lookups simply skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryTerm {
    id: TermId,
    term: String,
    definition: String,
    level: Level,
    category: Category,
    related_term_ids: Vec<TermId>,
    region_context: Option<String>,
    examples: Vec<String>,
}

impl GlossaryTerm {
    /// Creates a validated glossary term.
    ///
    /// # Errors
    ///
    /// Returns `TermError::EmptyTerm` or `TermError::EmptyDefinition` when
    /// the corresponding text is blank.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TermId,
        term: impl Into<String>,
        definition: impl Into<String>,
        level: Level,
        category: Category,
        related_term_ids: Vec<TermId>,
        region_context: Option<String>,
        examples: Vec<String>,
    ) -> Result<Self, TermError> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(TermError::EmptyTerm);
        }
        let definition = definition.into();
        if definition.trim().is_empty() {
            return Err(TermError::EmptyDefinition);
        }

        Ok(Self {
            id,
            term,
            definition,
            level,
            category,
            related_term_ids,
            region_context,
            examples,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TermId {
        &self.id
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
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
    pub fn related_term_ids(&self) -> &[TermId] {
        &self.related_term_ids
    }

    #[must_use]
    pub fn region_context(&self) -> Option<&str> {
        self.region_context.as_deref()
    }

    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}
