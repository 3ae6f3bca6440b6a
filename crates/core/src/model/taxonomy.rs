use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Literacy tier used to personalize content difficulty.
///
/// Levels are totally ordered: `Novice < Intermediate < Advanced`. There is
/// no inheritance between tiers; a novice quiz never pulls intermediate
/// questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Novice,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 3] = [Level::Novice, Level::Intermediate, Level::Advanced];

    /// Contribution weight of a correct pretest answer at this level.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Level::Novice => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Novice => "novice",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        };
        write!(f, "{name}")
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Topic tag shared by questions and glossary terms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Savings,
    Retirement,
    Investing,
    Credit,
    Planning,
    Economics,
    Taxation,
    RealEstate,
    Education,
    Insurance,
    Budgeting,
    DebtManagement,
}

impl Category {
    /// All twelve categories in declaration order.
    pub const ALL: [Category; 12] = [
        Category::Savings,
        Category::Retirement,
        Category::Investing,
        Category::Credit,
        Category::Planning,
        Category::Economics,
        Category::Taxation,
        Category::RealEstate,
        Category::Education,
        Category::Insurance,
        Category::Budgeting,
        Category::DebtManagement,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Human-readable label used in recommendation text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Savings => "savings",
            Category::Retirement => "retirement",
            Category::Investing => "investing",
            Category::Credit => "credit",
            Category::Planning => "planning",
            Category::Economics => "economics",
            Category::Taxation => "taxation",
            Category::RealEstate => "real estate",
            Category::Education => "education",
            Category::Insurance => "insurance",
            Category::Budgeting => "budgeting",
            Category::DebtManagement => "debt management",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
