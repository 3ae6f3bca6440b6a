use finlit_core::Clock;
use finlit_core::model::{
    AssessmentResult, Category, CategoryScores, Level, Question, UserId,
};
use finlit_content::ContentStore;

/// Category score at or above this marks a strength; everything below,
/// including untouched categories, is an improvement area.
const STRENGTH_THRESHOLD: u32 = 5;

/// Maps pretest answers to a literacy level, per-category scores and guidance.
///
/// The pretest is a fixed ordered question list, separate from the practice
/// bank. Assessment is total over any answer sheet: a short sheet leaves the
/// remaining questions unanswered, and an out-of-range choice never matches.
pub struct AssessmentService {
    pretest: Vec<Question>,
    clock: Clock,
}

impl AssessmentService {
    /// Build from the content store's fixed pretest.
    #[must_use]
    pub fn new(store: &ContentStore) -> Self {
        Self::with_pretest(store.pretest().to_vec())
    }

    /// Build from an explicit pretest, mainly for tests and custom banks.
    #[must_use]
    pub fn with_pretest(pretest: Vec<Question>) -> Self {
        Self {
            pretest,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn pretest(&self) -> &[Question] {
        &self.pretest
    }

    /// Assess a user's answer sheet against the fixed pretest.
    ///
    /// Each correct answer adds the question's level weight to that level's
    /// accumulator and its difficulty weight to the category table. The
    /// primary level is chosen by comparing accumulators in ascending level
    /// order with a strict greater-than, so ties keep the lower level.
    #[must_use]
    pub fn assess(&self, user_id: UserId, answers: &[u8]) -> AssessmentResult {
        let mut level_points = [0u32; Level::ALL.len()];
        let mut category_scores = CategoryScores::new();

        for (position, question) in self.pretest.iter().enumerate() {
            let answer = answers.get(position).copied();
            if question.is_correct(answer) {
                level_points[question.level() as usize] += question.level().weight();
                category_scores.add(question.category(), u32::from(question.difficulty_weight()));
            }
        }

        let mut primary_level = Level::Novice;
        let mut best = level_points[primary_level as usize];
        for level in [Level::Intermediate, Level::Advanced] {
            if level_points[level as usize] > best {
                primary_level = level;
                best = level_points[level as usize];
            }
        }

        let mut strengths = Vec::new();
        let mut improvement_areas = Vec::new();
        for (category, score) in category_scores.iter() {
            if score >= STRENGTH_THRESHOLD {
                strengths.push(category);
            } else {
                improvement_areas.push(category);
            }
        }

        let recommended_topics = recommended_topics(primary_level, &improvement_areas);

        AssessmentResult {
            user_id,
            primary_level,
            category_scores,
            strengths,
            improvement_areas,
            recommended_topics,
            assessed_at: self.clock.now(),
        }
    }
}

fn recommended_topics(level: Level, improvement_areas: &[Category]) -> Vec<String> {
    let mut topics = Vec::new();

    if !improvement_areas.is_empty() {
        let names: Vec<&str> = improvement_areas.iter().map(|c| c.label()).collect();
        topics.push(format!("Strengthen these areas first: {}", names.join(", ")));
    }

    let guidance = match level {
        Level::Novice => "Start with the fundamentals of budgeting, saving and credit",
        Level::Intermediate => "Build on the basics with investing and retirement planning",
        Level::Advanced => "Explore advanced topics in taxation, real estate and portfolio strategy",
    };
    topics.push(guidance.to_string());

    topics
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
