//! Tunable rule constants shared across the engine.

/// Maximum roster size the caller enforces before signing a recruit.
pub const ROSTER_CAP: usize = 53;

/// Seconds on the clock at the start of each quarter.
pub const QUARTER_SECONDS: u32 = 480;

/// Number of quarters in a game.
pub const QUARTERS: u8 = 4;

/// Maximum entries kept in a live game's play-by-play log.
pub const PLAY_HISTORY_CAP: usize = 50;

/// Yard line a drive starts from after a kickoff.
pub const KICKOFF_YARD_LINE: i32 = 25;

/// Yards needed for a fresh set of downs.
pub const FIRST_DOWN_DISTANCE: i32 = 10;

/// Points awarded for a touchdown (extra point included).
pub const TOUCHDOWN_POINTS: u32 = 7;

/// Punts are only offered while the offense is short of this yard line.
pub const PUNT_MAX_YARD_LINE: i32 = 70;

/// Neutral setting for every staff style dial.
pub const DEFAULT_STYLE: u8 = 50;

/// Regular-season wins needed to reach the playoffs.
pub const PLAYOFF_WIN_THRESHOLD: u32 = 5;

/// Total wins (regular season plus playoffs) that make a champion.
pub const CHAMPION_WIN_THRESHOLD: u32 = 8;

/// Number of playoff rounds.
pub const PLAYOFF_ROUNDS: u32 = 4;

/// Scrimmages played at the end of the preseason.
pub const SCRIMMAGE_COUNT: u32 = 2;

/// Preseason week offset between calendar week and scrimmage number.
pub const SCRIMMAGE_WEEK_OFFSET: u8 = 4;

/// Prospects generated by the weekly refresh during the offseason.
pub const OFFSEASON_POOL_SIZE: usize = 8;

/// Prospects generated by the weekly refresh in every other phase.
pub const IN_SEASON_POOL_SIZE: usize = 5;

/// Scouting points granted each offseason week.
pub const OFFSEASON_SCOUTING_POINTS: u32 = 15;

/// Scouting points granted each in-season week.
pub const IN_SEASON_SCOUTING_POINTS: u32 = 10;

/// Recruiting pitches available each week.
pub const RECRUITING_ACTIONS_PER_WEEK: u32 = 5;

/// Highest scouting level; the prospect is fully known.
pub const MAX_SCOUTING_LEVEL: u8 = 3;

/// Overall uncertainty shown to the coach at each scouting level.
pub const SCOUTING_MARGINS: [u8; 4] = [12, 7, 3, 0];

/// Budget cost per skill point when hiring staff.
pub const HIRE_COST_PER_SKILL: i64 = 150;

/// Candidates offered per hireable staff role each week.
pub const CANDIDATES_PER_ROLE: usize = 3;

/// Percentage points the Recruiter archetype adds to recruiting odds.
pub const RECRUITER_BONUS: u32 = 20;

/// Interest a prospect loses after turning down a pitch.
pub const DECLINED_INTEREST_PENALTY: u8 = 15;

/// Starting morale the Motivator archetype adds to the seeded roster.
pub const MOTIVATOR_MORALE_BONUS: f64 = 15.0;

/// Lowest and highest overall a player can hold.
pub const MIN_OVERALL: u8 = 25;
/// See [`MIN_OVERALL`].
pub const MAX_OVERALL: u8 = 99;

/// GPA ceiling reached through academic growth.
pub const MAX_ACADEMICS: f64 = 4.0;
