//! Player records: roster members and recruiting prospects.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_OVERALL, MIN_OVERALL};
use crate::dice;
use crate::state::SeasonPhase;

/// Unique identifier of a player.
pub type PlayerId = String;

/// On-field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Quarterback.
    #[serde(rename = "QB")]
    Quarterback,
    /// Running back.
    #[serde(rename = "RB")]
    RunningBack,
    /// Wide receiver.
    #[serde(rename = "WR")]
    WideReceiver,
    /// Tight end.
    #[serde(rename = "TE")]
    TightEnd,
    /// Left tackle.
    #[serde(rename = "LT")]
    LeftTackle,
    /// Left guard.
    #[serde(rename = "LG")]
    LeftGuard,
    /// Center.
    #[serde(rename = "C")]
    Center,
    /// Right guard.
    #[serde(rename = "RG")]
    RightGuard,
    /// Right tackle.
    #[serde(rename = "RT")]
    RightTackle,
    /// Defensive end.
    #[serde(rename = "DE")]
    DefensiveEnd,
    /// Defensive tackle.
    #[serde(rename = "DT")]
    DefensiveTackle,
    /// Linebacker.
    #[serde(rename = "LB")]
    Linebacker,
    /// Cornerback.
    #[serde(rename = "CB")]
    Cornerback,
    /// Safety.
    #[serde(rename = "S")]
    Safety,
    /// Kicker.
    #[serde(rename = "K")]
    Kicker,
    /// Punter.
    #[serde(rename = "P")]
    Punter,
}

impl Position {
    /// Every position, in depth-chart order.
    pub const ALL: [Position; 16] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::LeftTackle,
        Position::LeftGuard,
        Position::Center,
        Position::RightGuard,
        Position::RightTackle,
        Position::DefensiveEnd,
        Position::DefensiveTackle,
        Position::Linebacker,
        Position::Cornerback,
        Position::Safety,
        Position::Kicker,
        Position::Punter,
    ];

    /// The five offensive line spots.
    pub const OFFENSIVE_LINE: [Position; 5] = [
        Position::LeftTackle,
        Position::LeftGuard,
        Position::Center,
        Position::RightGuard,
        Position::RightTackle,
    ];

    /// The two defensive line spots.
    pub const DEFENSIVE_LINE: [Position; 2] = [Position::DefensiveEnd, Position::DefensiveTackle];

    /// Short label used on depth charts ("QB", "LT", ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::LeftTackle => "LT",
            Position::LeftGuard => "LG",
            Position::Center => "C",
            Position::RightGuard => "RG",
            Position::RightTackle => "RT",
            Position::DefensiveEnd => "DE",
            Position::DefensiveTackle => "DT",
            Position::Linebacker => "LB",
            Position::Cornerback => "CB",
            Position::Safety => "S",
            Position::Kicker => "K",
            Position::Punter => "P",
        }
    }

    /// Counts toward the offensive rating.
    #[must_use]
    pub const fn is_offense(self) -> bool {
        matches!(
            self,
            Position::Quarterback
                | Position::RunningBack
                | Position::WideReceiver
                | Position::TightEnd
                | Position::LeftTackle
                | Position::LeftGuard
                | Position::Center
                | Position::RightGuard
                | Position::RightTackle
        )
    }

    /// Counts toward the defensive rating.
    #[must_use]
    pub const fn is_defense(self) -> bool {
        matches!(
            self,
            Position::DefensiveEnd
                | Position::DefensiveTackle
                | Position::Linebacker
                | Position::Cornerback
                | Position::Safety
        )
    }

    /// Styles a player at this position can be generated with.
    #[must_use]
    pub const fn archetypes(self) -> &'static [Archetype] {
        use Archetype as A;
        match self {
            Position::Quarterback => &[A::StrongArm, A::Scrambler, A::Improvisor, A::FieldGeneral],
            Position::RunningBack => &[A::PowerBack, A::ElusiveBack, A::ReceivingBack],
            Position::WideReceiver => &[
                A::DeepThreat,
                A::Possession,
                A::RedZoneThreat,
                A::SlotReceiver,
            ],
            Position::TightEnd => &[A::VerticalThreat, A::Possession, A::Blocking],
            Position::LeftTackle
            | Position::LeftGuard
            | Position::Center
            | Position::RightGuard
            | Position::RightTackle => &[A::Agile, A::Power, A::PassProtector],
            Position::DefensiveEnd | Position::DefensiveTackle => {
                &[A::RunStopper, A::SpeedRusher, A::PowerRusher]
            }
            Position::Linebacker => &[
                A::FieldGeneral,
                A::PassCoverage,
                A::RunStopper,
                A::SpeedRusher,
                A::PowerRusher,
            ],
            Position::Cornerback => &[A::ManToMan, A::ZoneCoverage, A::SlotCorner],
            Position::Safety => &[A::ZoneCoverage, A::RunSupport, A::Hybrid],
            Position::Kicker | Position::Punter => &[A::Accurate, A::Power],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position asked of the generator; line requests resolve to a concrete spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionRequest {
    /// A specific position.
    Exact(Position),
    /// Any of LT/LG/C/RG/RT.
    OffensiveLine,
    /// Either DE or DT.
    DefensiveLine,
}

impl PositionRequest {
    /// Resolve to a concrete position.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        match self {
            PositionRequest::Exact(position) => position,
            PositionRequest::OffensiveLine => *dice::pick(rng, &Position::OFFENSIVE_LINE),
            PositionRequest::DefensiveLine => *dice::pick(rng, &Position::DEFENSIVE_LINE),
        }
    }
}

impl From<Position> for PositionRequest {
    fn from(position: Position) -> Self {
        PositionRequest::Exact(position)
    }
}

/// Position-specific playing style.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "Strong Arm")]
    StrongArm,
    Scrambler,
    Improvisor,
    #[serde(rename = "Field General")]
    FieldGeneral,
    #[serde(rename = "Power Back")]
    PowerBack,
    #[serde(rename = "Elusive Back")]
    ElusiveBack,
    #[serde(rename = "Receiving Back")]
    ReceivingBack,
    #[serde(rename = "Deep Threat")]
    DeepThreat,
    Possession,
    #[serde(rename = "Red Zone Threat")]
    RedZoneThreat,
    #[serde(rename = "Slot Receiver")]
    SlotReceiver,
    #[serde(rename = "Vertical Threat")]
    VerticalThreat,
    Blocking,
    Agile,
    Power,
    #[serde(rename = "Pass Protector")]
    PassProtector,
    #[serde(rename = "Run Stopper")]
    RunStopper,
    #[serde(rename = "Speed Rusher")]
    SpeedRusher,
    #[serde(rename = "Power Rusher")]
    PowerRusher,
    #[serde(rename = "Pass Coverage")]
    PassCoverage,
    #[serde(rename = "Man-to-Man")]
    ManToMan,
    #[serde(rename = "Zone Coverage")]
    ZoneCoverage,
    #[serde(rename = "Slot Corner")]
    SlotCorner,
    #[serde(rename = "Run Support")]
    RunSupport,
    Hybrid,
    Accurate,
}

impl Archetype {
    /// Fixed rating adjustment applied after the base roll.
    #[must_use]
    pub const fn bonus(self) -> RatingBonus {
        let zero = RatingBonus::ZERO;
        match self {
            Archetype::StrongArm => RatingBonus { strength: 15, speed: -5, ..zero },
            Archetype::Scrambler => RatingBonus { speed: 15, strength: -5, ..zero },
            Archetype::DeepThreat => RatingBonus { speed: 12, hands: 5, ..zero },
            Archetype::PowerBack => RatingBonus { strength: 10, speed: -5, ..zero },
            Archetype::ElusiveBack => RatingBonus { speed: 10, awareness: 5, ..zero },
            Archetype::PassProtector => RatingBonus { awareness: 10, hands: 5, ..zero },
            Archetype::RunStopper => RatingBonus { tackling: 12, strength: 5, ..zero },
            Archetype::SpeedRusher => RatingBonus { speed: 12, awareness: 5, ..zero },
            Archetype::ZoneCoverage => RatingBonus { awareness: 10, speed: 5, ..zero },
            Archetype::ManToMan => RatingBonus { speed: 10, hands: 5, ..zero },
            Archetype::Power => RatingBonus { strength: 15, ..zero },
            Archetype::Accurate => RatingBonus { awareness: 15, ..zero },
            _ => zero,
        }
    }
}

/// Signed adjustment to each sub-rating.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingBonus {
    pub speed: i32,
    pub strength: i32,
    pub awareness: i32,
    pub tackling: i32,
    pub hands: i32,
}

impl RatingBonus {
    /// No adjustment.
    pub const ZERO: RatingBonus = RatingBonus {
        speed: 0,
        strength: 0,
        awareness: 0,
        tackling: 0,
        hands: 0,
    };
}

/// Five sub-ratings the overall is derived from.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ratings {
    pub speed: i32,
    pub strength: i32,
    pub awareness: i32,
    pub tackling: i32,
    pub hands: i32,
}

impl Ratings {
    /// Apply an archetype adjustment.
    #[must_use]
    pub const fn with_bonus(self, bonus: RatingBonus) -> Self {
        Self {
            speed: self.speed + bonus.speed,
            strength: self.strength + bonus.strength,
            awareness: self.awareness + bonus.awareness,
            tackling: self.tackling + bonus.tackling,
            hands: self.hands + bonus.hands,
        }
    }

    /// Overall derived from the sub-ratings: rounded mean, clamped to 25..=99.
    #[must_use]
    pub fn overall(&self) -> u8 {
        let sum = self.speed + self.strength + self.awareness + self.tackling + self.hands;
        let mean = (f64::from(sum) / 5.0).round() as i32;
        mean.clamp(i32::from(MIN_OVERALL), i32::from(MAX_OVERALL)) as u8
    }
}

/// Descriptive tag; only Injury-Prone has a mechanical effect.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTrait {
    #[serde(rename = "Team Leader")]
    TeamLeader,
    #[serde(rename = "Locker Room Cancer")]
    LockerRoomCancer,
    #[serde(rename = "Academic Risk")]
    AcademicRisk,
    #[serde(rename = "Injury-Prone")]
    InjuryProne,
    #[serde(rename = "Raw Talent")]
    RawTalent,
    #[serde(rename = "Dual Athlete")]
    DualAthlete,
    Clutch,
    #[serde(rename = "Hard Worker")]
    HardWorker,
    #[serde(rename = "Quiet Leader")]
    QuietLeader,
    #[serde(rename = "Spotlight Junkie")]
    SpotlightJunkie,
    #[serde(rename = "Big Game Performer")]
    BigGamePerformer,
    Coachable,
}

impl PlayerTrait {
    /// The full trait vocabulary.
    pub const ALL: [PlayerTrait; 12] = [
        PlayerTrait::TeamLeader,
        PlayerTrait::LockerRoomCancer,
        PlayerTrait::AcademicRisk,
        PlayerTrait::InjuryProne,
        PlayerTrait::RawTalent,
        PlayerTrait::DualAthlete,
        PlayerTrait::Clutch,
        PlayerTrait::HardWorker,
        PlayerTrait::QuietLeader,
        PlayerTrait::SpotlightJunkie,
        PlayerTrait::BigGamePerformer,
        PlayerTrait::Coachable,
    ];
}

/// Availability for games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InjuryStatus {
    /// Fully available.
    #[default]
    Healthy,
    /// Playing through a knock.
    Questionable,
    /// Unlikely to play.
    Doubtful,
    /// Sidelined; counts down `injury_weeks`.
    Out,
}

/// Pipeline a player arrived through.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecruitSource {
    #[serde(rename = "Middle School")]
    MiddleSchool,
    #[serde(rename = "Youth League")]
    YouthLeague,
    #[serde(rename = "Transfer Portal")]
    TransferPortal,
    #[serde(rename = "Other Sport")]
    OtherSport,
    #[default]
    #[serde(rename = "Walk-On")]
    WalkOn,
}

impl RecruitSource {
    /// Pipelines the weekly recruiting refresh draws from.
    pub const PIPELINES: [RecruitSource; 4] = [
        RecruitSource::MiddleSchool,
        RecruitSource::YouthLeague,
        RecruitSource::TransferPortal,
        RecruitSource::OtherSport,
    ];

    /// Grade a prospect from this pipeline enters at.
    pub fn prospect_grade<R: Rng + ?Sized>(self, rng: &mut R) -> u8 {
        match self {
            RecruitSource::MiddleSchool => 8,
            RecruitSource::YouthLeague => 9,
            RecruitSource::TransferPortal => *dice::pick(rng, &[10, 11, 12]),
            RecruitSource::OtherSport | RecruitSource::WalkOn => *dice::pick(rng, &[9, 10, 11, 12]),
        }
    }
}

/// Sport the athlete identifies with first.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimarySport {
    #[default]
    Football,
    Basketball,
    Track,
    Baseball,
    Soccer,
    Wrestling,
    Lacrosse,
}

/// Counting stats for one phase of the season.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub passing_yards: u32,
    pub passing_tds: u32,
    pub interceptions_thrown: u32,
    pub rushing_yards: u32,
    pub rushing_tds: u32,
    pub receptions: u32,
    pub receiving_yards: u32,
    pub receiving_tds: u32,
    pub tackles: u32,
    pub sacks: u32,
    pub interceptions_caught: u32,
    pub games_played: u32,
}

impl PlayerStats {
    /// Passing, rushing and receiving yards combined.
    #[must_use]
    pub const fn scrimmage_yards(&self) -> u32 {
        self.passing_yards + self.rushing_yards + self.receiving_yards
    }
}

/// One [`PlayerStats`] block per season phase.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(rename = "OFFSEASON")]
    pub offseason: PlayerStats,
    #[serde(rename = "PRESEASON")]
    pub preseason: PlayerStats,
    #[serde(rename = "REGULAR_SEASON")]
    pub regular_season: PlayerStats,
    #[serde(rename = "PLAYOFFS")]
    pub playoffs: PlayerStats,
}

impl SeasonStats {
    /// Stats for a phase.
    #[must_use]
    pub const fn get(&self, phase: SeasonPhase) -> &PlayerStats {
        match phase {
            SeasonPhase::Offseason => &self.offseason,
            SeasonPhase::Preseason => &self.preseason,
            SeasonPhase::RegularSeason => &self.regular_season,
            SeasonPhase::Playoffs => &self.playoffs,
        }
    }

    /// Mutable stats for a phase.
    pub fn get_mut(&mut self, phase: SeasonPhase) -> &mut PlayerStats {
        match phase {
            SeasonPhase::Offseason => &mut self.offseason,
            SeasonPhase::Preseason => &mut self.preseason,
            SeasonPhase::RegularSeason => &mut self.regular_season,
            SeasonPhase::Playoffs => &mut self.playoffs,
        }
    }

    /// True when every counter in every phase is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == SeasonStats::default()
    }
}

/// A roster member or recruiting prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Full name.
    pub name: String,
    /// School grade, 8 through 12.
    pub grade: u8,
    /// Concrete position.
    pub position: Position,
    /// Playing style.
    pub archetype: Archetype,
    /// Current ability, 25..=99.
    pub overall: u8,
    /// Ability ceiling.
    pub potential: u8,
    /// Morale, 0..=100.
    pub morale: f64,
    /// GPA.
    pub academics: f64,
    /// Availability.
    pub injury_status: InjuryStatus,
    /// Weeks until an `Out` player returns.
    pub injury_weeks: u8,
    /// Sport the athlete identifies with first.
    pub primary_sport: PrimarySport,
    /// Prior football exposure, 0..=100.
    pub football_experience: u8,
    /// Sub-ratings.
    pub ratings: Ratings,
    /// Zero to two descriptive tags.
    pub traits: Vec<PlayerTrait>,
    /// Per-phase counting stats, cleared at year rollover.
    pub stats: SeasonStats,
    /// Recruiting pipeline.
    pub source: RecruitSource,
    /// Prospect interest in the program, 0..=100.
    pub interest_level: u8,
    /// How much the staff knows about the player, 0..=3.
    pub scouting_level: u8,
    /// Overall gained in the latest week.
    #[serde(default)]
    pub last_ovr_change: u8,
}

impl Player {
    /// Counts toward fielded ratings: not a middle schooler and not sidelined.
    #[must_use]
    pub fn is_fielded(&self) -> bool {
        self.grade > 8 && self.injury_status != InjuryStatus::Out
    }

    /// Currently sidelined.
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.injury_status == InjuryStatus::Out
    }

    /// Carries the given trait.
    #[must_use]
    pub fn has_trait(&self, t: PlayerTrait) -> bool {
        self.traits.contains(&t)
    }
}
