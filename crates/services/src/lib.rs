#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod workflow;

pub use finlit_core::Clock;

pub use assessment::AssessmentService;
pub use error::{LearningError, QuizError};
pub use progress::ProgressService;
pub use quiz::{DEFAULT_QUIZ_SIZE, QuizBuilder, QuizPlan, QuizService};
pub use workflow::{LearningLoopService, QuizOutcome};
