//! Randomized factories for players, schools and staff.
//!
//! Each generator draws only from the injected random source, so a seeded
//! generator yields the same records every run.

use rand::Rng;

use crate::data::vocabulary::{
    ALMA_MATERS, DEFENSIVE_PHILOSOPHIES, FIRST_NAMES, LAST_NAMES, OFFENSIVE_PHILOSOPHIES,
    SCHOOL_COLORS, SCHOOL_NAMES, SECONDARY_COLOR, SUPPORT_PHILOSOPHIES,
};
use crate::dice;
use crate::player::{
    InjuryStatus, Player, PlayerTrait, Position, PositionRequest, PrimarySport, Ratings,
    RecruitSource, SeasonStats,
};
use crate::school::{Enrollment, School, SchoolColors};
use crate::staff::{CareerRecord, Staff, StaffRole, StaffTrait};
use crate::constants::DEFAULT_STYLE;

const HIGH_SCHOOL_GRADES: [u8; 4] = [9, 10, 11, 12];
const MAX_POTENTIAL: i32 = 95;

/// Generate a player.
///
/// Unspecified grade is drawn from 9-12 and unspecified position from all
/// sixteen. Line requests resolve to a concrete spot. Eighth graders always
/// come from the middle school pipeline, whatever `source` asks for; other
/// players default to walk-ons.
pub fn generate_player<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Option<u8>,
    position: Option<PositionRequest>,
    source: Option<RecruitSource>,
) -> Player {
    let grade = match grade {
        Some(g) => g.clamp(8, 12),
        None => *dice::pick(rng, &HIGH_SCHOOL_GRADES),
    };
    let position = match position {
        Some(request) => request.resolve(rng),
        None => *dice::pick(rng, &Position::ALL),
    };
    let source = if grade == 8 {
        RecruitSource::MiddleSchool
    } else {
        source.unwrap_or_default()
    };

    let grade_modifier = if grade == 8 {
        -15
    } else {
        (i32::from(grade) - 9) * 8
    };
    let base = 40 + grade_modifier + dice::roll(rng, 0, 15);
    let potential = dice::roll(rng, base, MAX_POTENTIAL);

    let archetype = *dice::pick(rng, position.archetypes());
    let ratings = Ratings {
        speed: dice::roll(rng, base - 10, base + 10),
        strength: dice::roll(rng, base - 10, base + 10),
        awareness: dice::roll(rng, base - 10, base + 10),
        tackling: dice::roll(rng, base - 10, base + 10),
        hands: dice::roll(rng, base - 10, base + 10),
    }
    .with_bonus(archetype.bonus());
    let overall = ratings.overall();

    let traits = roll_traits(rng);
    let morale = f64::from(dice::roll(rng, 70, 100));
    let academics = ((dice::unit(rng) * 2.5 + 1.5) * 100.0).round() / 100.0;
    let primary_sport = if dice::chance(rng, 0.1) {
        PrimarySport::Basketball
    } else {
        PrimarySport::Football
    };

    Player {
        id: dice::random_id(rng),
        name: format!("{} {}", dice::pick(rng, &FIRST_NAMES), dice::pick(rng, &LAST_NAMES)),
        grade,
        position,
        archetype,
        overall,
        potential: (potential.max(i32::from(overall))) as u8,
        morale,
        academics,
        injury_status: InjuryStatus::Healthy,
        injury_weeks: 0,
        primary_sport,
        football_experience: dice::roll(rng, 20, 90) as u8,
        ratings,
        traits,
        stats: SeasonStats::default(),
        source,
        interest_level: dice::roll(rng, 10, 80) as u8,
        scouting_level: 0,
        last_ovr_change: 0,
    }
}

/// 90% get one trait; of those, 30% roll a second that is kept only if
/// distinct.
fn roll_traits<R: Rng + ?Sized>(rng: &mut R) -> Vec<PlayerTrait> {
    let mut traits = Vec::with_capacity(2);
    if dice::chance(rng, 0.9) {
        let first = *dice::pick(rng, &PlayerTrait::ALL);
        traits.push(first);
        if dice::chance(rng, 0.3) {
            let second = *dice::pick(rng, &PlayerTrait::ALL);
            if second != first {
                traits.push(second);
            }
        }
    }
    traits
}

/// Generate a school, named from the league vocabulary unless `name` is given.
pub fn generate_school<R: Rng + ?Sized>(rng: &mut R, name: Option<&str>) -> School {
    let enrollment = *dice::pick(rng, &Enrollment::ALL);
    let prestige = dice::roll(rng, 20, 80);
    let name = name.map_or_else(|| (*dice::pick(rng, &SCHOOL_NAMES)).to_string(), str::to_string);

    School {
        id: dice::random_id(rng),
        name,
        enrollment,
        budget: i64::from(prestige) * 1000 + i64::from(dice::roll(rng, 5000, 20000)),
        facilities: dice::roll(rng, 20, 80) as u8,
        academic_strictness: dice::roll(rng, 30, 90) as u8,
        community_support: dice::roll(rng, 40, 100) as u8,
        prestige: prestige as u8,
        colors: SchoolColors {
            primary: (*dice::pick(rng, &SCHOOL_COLORS)).to_string(),
            secondary: SECONDARY_COLOR.to_string(),
        },
    }
}

/// Generate the opponent pool for a career.
pub fn generate_league<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<School> {
    (0..size).map(|_| generate_school(rng, None)).collect()
}

/// Generate a staff member for `role` with a neutral style dial.
pub fn generate_staff<R: Rng + ?Sized>(rng: &mut R, role: StaffRole) -> Staff {
    let philosophies: &[&str] = match role {
        StaffRole::OffensiveCoordinator => &OFFENSIVE_PHILOSOPHIES,
        StaffRole::DefensiveCoordinator => &DEFENSIVE_PHILOSOPHIES,
        _ => &SUPPORT_PHILOSOPHIES,
    };
    let skill = dice::roll(rng, 40, 85);
    let years = dice::roll(rng, 1, 30);

    Staff {
        id: dice::random_id(rng),
        name: format!("Coach {}", dice::pick(rng, &LAST_NAMES)),
        role,
        skill: skill as u8,
        specialty: *dice::pick(rng, &StaffTrait::ALL),
        philosophy: (*dice::pick(rng, philosophies)).to_string(),
        alma_mater: (*dice::pick(rng, &ALMA_MATERS)).to_string(),
        years_experience: years as u8,
        prestige: (f64::from(skill + years) / 2.0).round() as u8,
        career_record: CareerRecord {
            wins: dice::roll(rng, years * 3, years * 10) as u32,
            losses: dice::roll(rng, years * 3, years * 10) as u32,
        },
        style_value: DEFAULT_STYLE,
    }
}

/// Hiring board: a few fresh candidates for every hireable role.
pub fn generate_staff_candidates<R: Rng + ?Sized>(rng: &mut R, per_role: usize) -> Vec<Staff> {
    StaffRole::HIREABLE
        .iter()
        .flat_map(|&role| std::iter::repeat(role).take(per_role))
        .map(|role| generate_staff(rng, role))
        .collect()
}

/// Weekly prospect: pipeline drawn at random, grade set by the pipeline.
pub fn generate_prospect<R: Rng + ?Sized>(rng: &mut R) -> Player {
    let source = *dice::pick(rng, &RecruitSource::PIPELINES);
    let grade = source.prospect_grade(rng);
    generate_player(rng, Some(grade), None, Some(source))
}
