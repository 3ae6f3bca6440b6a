use serde::Deserialize;

use finlit_core::model::{
    Category, GlossaryTerm, Level, Question, QuestionError, QuestionId, TermError, TermId,
};

/// Serialized shape of a bank or pretest question.
///
/// Mirrors the domain `Question` so the embedded resources can deserialize
/// without leaking wire concerns into the domain layer; validation happens
/// in the conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub prompt: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub level: Level,
    pub category: Category,
    pub explanation: String,
    pub difficulty_weight: u8,
    #[serde(default)]
    pub region_specific: bool,
}

impl QuestionRecord {
    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record violates a question invariant.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            self.prompt,
            self.options,
            self.correct_index,
            self.level,
            self.category,
            self.explanation,
            self.difficulty_weight,
            self.region_specific,
        )
    }
}

/// Serialized shape of a glossary term.
#[derive(Debug, Clone, Deserialize)]
pub struct GlossaryRecord {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub level: Level,
    pub category: Category,
    #[serde(default)]
    pub related_term_ids: Vec<String>,
    #[serde(default)]
    pub region_context: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl GlossaryRecord {
    /// Convert the record into a validated domain `GlossaryTerm`.
    ///
    /// # Errors
    ///
    /// Returns `TermError` if the term or definition text is blank.
    pub fn into_term(self) -> Result<GlossaryTerm, TermError> {
        GlossaryTerm::new(
            TermId::new(self.id),
            self.term,
            self.definition,
            self.level,
            self.category,
            self.related_term_ids.into_iter().map(TermId::new).collect(),
            self.region_context,
            self.examples,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_record_round_trips_into_domain() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{
                "id": "q-1",
                "prompt": "What is inflation?",
                "options": ["A rise in prices", "A fall in prices", "A tax", "A wage increase"],
                "correct_index": 0,
                "level": "novice",
                "category": "economics",
                "explanation": "Inflation is a general rise in prices over time.",
                "difficulty_weight": 1
            }"#,
        )
        .unwrap();

        let question = record.into_question().unwrap();
        assert_eq!(question.id().as_str(), "q-1");
        assert_eq!(question.level(), Level::Novice);
        assert_eq!(question.category(), Category::Economics);
        assert!(!question.region_specific());
    }

    #[test]
    fn invalid_record_fails_conversion() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{
                "id": "q-bad",
                "prompt": "Broken?",
                "options": ["A", "B", "C", "D"],
                "correct_index": 9,
                "level": "novice",
                "category": "savings",
                "explanation": "",
                "difficulty_weight": 1
            }"#,
        )
        .unwrap();

        assert!(record.into_question().is_err());
    }

    #[test]
    fn glossary_record_defaults_optional_fields() {
        let record: GlossaryRecord = serde_json::from_str(
            r#"{
                "id": "g-apr",
                "term": "APR",
                "definition": "Annual percentage rate.",
                "level": "novice",
                "category": "credit"
            }"#,
        )
        .unwrap();

        let term = record.into_term().unwrap();
        assert!(term.related_term_ids().is_empty());
        assert!(term.region_context().is_none());
        assert!(term.examples().is_empty());
    }
}
