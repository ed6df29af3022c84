//! Schools: the user's program and the league pool.

use serde::{Deserialize, Serialize};

/// Unique identifier of a school.
pub type SchoolId = String;

/// State athletic association enrollment classification.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enrollment {
    #[serde(rename = "1A")]
    OneA,
    #[serde(rename = "2A")]
    TwoA,
    #[serde(rename = "3A")]
    ThreeA,
    #[serde(rename = "4A")]
    FourA,
    #[serde(rename = "5A")]
    FiveA,
    #[serde(rename = "6A")]
    SixA,
}

impl Enrollment {
    /// Every classification, smallest first.
    pub const ALL: [Enrollment; 6] = [
        Enrollment::OneA,
        Enrollment::TwoA,
        Enrollment::ThreeA,
        Enrollment::FourA,
        Enrollment::FiveA,
        Enrollment::SixA,
    ];
}

/// Color theme as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolColors {
    /// Primary color.
    pub primary: String,
    /// Secondary color.
    pub secondary: String,
}

/// A high school football program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier.
    pub id: SchoolId,
    /// Display name.
    pub name: String,
    /// Enrollment classification.
    pub enrollment: Enrollment,
    /// Athletic budget in dollars. Only staff hires draw it down.
    pub budget: i64,
    /// Facilities quality, 0..=100.
    pub facilities: u8,
    /// How hard the school leans on grades, 0..=100.
    pub academic_strictness: u8,
    /// Booster and community backing, 0..=100.
    pub community_support: u8,
    /// Program prestige, 20..=80 at generation.
    pub prestige: u8,
    /// Color theme.
    pub colors: SchoolColors,
}
