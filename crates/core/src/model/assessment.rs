use chrono::{DateTime, Utc};

use crate::model::ids::UserId;
use crate::model::taxonomy::{Category, Level};

//
// ─── CATEGORY SCORES ───────────────────────────────────────────────────────────
//

/// Dense per-category score table with all twelve categories present.
///
/// Produced by the assessment engine, which accumulates difficulty weights
/// for every category including the untouched ones. Distinct from the sparse
/// per-session performance map, which only carries categories that were
/// actually answered correctly; the two shapes are never interchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryScores([u32; Category::COUNT]);

impl CategoryScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.0[category as usize]
    }

    /// Add points to a category's accumulator.
    pub fn add(&mut self, category: Category, points: u32) {
        let slot = &mut self.0[category as usize];
        *slot = slot.saturating_add(points);
    }

    /// Iterate all twelve categories in enum order with their scores.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

//
// ─── ASSESSMENT RESULT ─────────────────────────────────────────────────────────
//

/// Outcome of the fixed pretest for one user.
///
/// `strengths` and `improvement_areas` partition the full category enum:
/// every category lands in exactly one of the two, zero-score categories
/// counting as improvement areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentResult {
    pub user_id: UserId,
    pub primary_level: Level,
    pub category_scores: CategoryScores,
    pub strengths: Vec<Category>,
    pub improvement_areas: Vec<Category>,
    pub recommended_topics: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}
