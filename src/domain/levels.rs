//! Validated scalar newtypes for HSK queries

use nutype::nutype;

/// HSK level the app currently serves (levels 1 through 4)
#[nutype(
    derive(
        Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
        TryFrom, AsRef
    ),
    validate(predicate = |level: &u8| (1..=4).contains(level)),
)]
pub struct HskLevel(u8);

impl HskLevel {
    /// Lowest level, used as the landing-page default
    pub fn lowest() -> Self {
        Self::try_new(1).expect("1 is a valid HSK level")
    }

    /// All levels in ascending order
    pub fn all() -> Vec<Self> {
        (1..=4)
            .map(|n| Self::try_new(n).expect("1..=4 are valid HSK levels"))
            .collect()
    }
}

/// One-based page number within a level's word corpus
#[nutype(
    derive(
        Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Deserialize, Serialize, TryFrom, AsRef
    ),
    validate(predicate = |page: &u32| *page >= 1),
)]
pub struct PageNumber(u32);

impl PageNumber {
    pub fn first() -> Self {
        Self::try_new(1).expect("1 is a valid page number")
    }
}

/// Maximum items per word-listing page
#[nutype(
    derive(
        Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Deserialize, Serialize, TryFrom, AsRef
    ),
    validate(predicate = |limit: &u32| *limit >= 1),
)]
pub struct PageLimit(u32);

impl PageLimit {
    /// One page covers a whole level at the default size
    pub fn standard() -> Self {
        Self::try_new(200).expect("200 is a valid page limit")
    }
}

/// Generation complexity for dialogues and graded texts
#[nutype(
    derive(
        Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Deserialize, Serialize, TryFrom, AsRef
    ),
    validate(predicate = |complexity: &u8| (1..=3).contains(complexity)),
)]
pub struct Complexity(u8);

impl Complexity {
    pub fn simplest() -> Self {
        Self::try_new(1).expect("1 is a valid complexity")
    }
}
