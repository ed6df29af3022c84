//! Coaching staff and the style dials the season machine reads.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STYLE;

/// Unique identifier of a staff member.
pub type StaffId = String;

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    /// The coach the user plays as; never generated.
    #[serde(rename = "Head Coach")]
    HeadCoach,
    /// Runs the offense; its style is play-calling aggressiveness.
    #[serde(rename = "Offensive Coordinator")]
    OffensiveCoordinator,
    /// Runs the defense; its style is aggressiveness.
    #[serde(rename = "Defensive Coordinator")]
    DefensiveCoordinator,
    /// Training intensity: faster progression, more injuries.
    #[serde(rename = "Strength Coach")]
    StrengthCoach,
    /// Strictness: GPA up, morale down.
    #[serde(rename = "Academic Advisor")]
    AcademicAdvisor,
}

impl StaffRole {
    /// Roles filled by hiring, in hiring-board order.
    pub const HIREABLE: [StaffRole; 4] = [
        StaffRole::OffensiveCoordinator,
        StaffRole::DefensiveCoordinator,
        StaffRole::StrengthCoach,
        StaffRole::AcademicAdvisor,
    ];

    /// Name of the role's style dial.
    #[must_use]
    pub const fn style_label(self) -> &'static str {
        match self {
            StaffRole::HeadCoach | StaffRole::OffensiveCoordinator | StaffRole::DefensiveCoordinator => {
                "Aggressiveness"
            }
            StaffRole::StrengthCoach => "Intensity",
            StaffRole::AcademicAdvisor => "Strictness",
        }
    }
}

/// Staff specialty.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffTrait {
    Tactician,
    Recruiter,
    Motivator,
    Developer,
}

impl StaffTrait {
    /// Every specialty.
    pub const ALL: [StaffTrait; 4] = [
        StaffTrait::Tactician,
        StaffTrait::Recruiter,
        StaffTrait::Motivator,
        StaffTrait::Developer,
    ];
}

/// Lifetime win/loss record.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CareerRecord {
    pub wins: u32,
    pub losses: u32,
}

/// A staff member or hiring candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique identifier.
    pub id: StaffId,
    /// Display name.
    pub name: String,
    /// Role filled.
    pub role: StaffRole,
    /// Skill, 40..=85 at generation.
    pub skill: u8,
    /// Specialty.
    pub specialty: StaffTrait,
    /// Scheme or program philosophy.
    pub philosophy: String,
    /// University attended.
    pub alma_mater: String,
    /// Years coaching.
    pub years_experience: u8,
    /// Reputation, mean of skill and experience.
    pub prestige: u8,
    /// Lifetime record.
    pub career_record: CareerRecord,
    /// Risk/intensity/strictness dial, 0..=100.
    pub style_value: u8,
}

/// Style dial of the staff member in `role`, or the neutral default when the
/// role is vacant.
#[must_use]
pub fn style_of(staff: &[Staff], role: StaffRole) -> u8 {
    staff
        .iter()
        .find(|s| s.role == role)
        .map_or(DEFAULT_STYLE, |s| s.style_value)
}
