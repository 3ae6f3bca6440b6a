mod assessment;
mod glossary;
mod ids;
mod progress;
mod question;
mod session;
mod taxonomy;

pub use assessment::{AssessmentResult, CategoryScores};
pub use glossary::{GlossaryTerm, TermError};
pub use ids::{QuestionId, SessionId, TermId, UserId};
pub use progress::{Achievement, ProgressError, UserProgress};
pub use question::{Question, QuestionError};
pub use session::{QuizSession, SessionError};
pub use taxonomy::{Category, Level};
