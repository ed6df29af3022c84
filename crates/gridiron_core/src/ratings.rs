//! Composite ratings and stat leaderboards derived from a roster snapshot.
//!
//! Only fielded players count: eighth graders and anyone ruled `Out` are
//! left off. An empty selection rates 0.

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};
use crate::state::SeasonPhase;

/// Team, offense and defense ratings together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRatings {
    /// Whole fielded roster.
    pub team: u32,
    /// Offensive positions.
    pub offense: u32,
    /// Defensive positions.
    pub defense: u32,
}

impl TeamRatings {
    /// Compute all three ratings.
    #[must_use]
    pub fn of(roster: &[Player]) -> Self {
        Self {
            team: team_rating(roster),
            offense: offense_rating(roster),
            defense: defense_rating(roster),
        }
    }
}

fn mean_overall<'a>(players: impl Iterator<Item = &'a Player>) -> u32 {
    let (count, total) = players
        .filter(|p| p.is_fielded())
        .fold((0u32, 0u32), |(count, total), p| {
            (count + 1, total + u32::from(p.overall))
        });
    if count == 0 {
        return 0;
    }
    (f64::from(total) / f64::from(count)).round() as u32
}

/// Rounded mean overall of the fielded roster.
#[must_use]
pub fn team_rating(roster: &[Player]) -> u32 {
    mean_overall(roster.iter())
}

/// Rounded mean overall of fielded offensive players.
#[must_use]
pub fn offense_rating(roster: &[Player]) -> u32 {
    mean_overall(roster.iter().filter(|p| p.position.is_offense()))
}

/// Rounded mean overall of fielded defensive players.
#[must_use]
pub fn defense_rating(roster: &[Player]) -> u32 {
    mean_overall(roster.iter().filter(|p| p.position.is_defense()))
}

/// Skill players ranked by scrimmage yards for a phase, best first.
#[must_use]
pub fn offensive_leaders(roster: &[Player], phase: SeasonPhase) -> Vec<&Player> {
    let mut leaders: Vec<&Player> = roster
        .iter()
        .filter(|p| {
            matches!(
                p.position,
                Position::Quarterback | Position::RunningBack | Position::WideReceiver | Position::TightEnd
            )
        })
        .collect();
    leaders.sort_by_key(|p| std::cmp::Reverse(p.stats.get(phase).scrimmage_yards()));
    leaders
}

/// Defenders ranked by tackles for a phase, best first.
#[must_use]
pub fn defensive_leaders(roster: &[Player], phase: SeasonPhase) -> Vec<&Player> {
    let mut leaders: Vec<&Player> = roster.iter().filter(|p| p.position.is_defense()).collect();
    leaders.sort_by_key(|p| std::cmp::Reverse(p.stats.get(phase).tackles));
    leaders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_player;
    use crate::player::InjuryStatus;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(position: Position, grade: u8, overall: u8) -> Player {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(overall));
        let mut p = generate_player(&mut rng, Some(grade), Some(position.into()), None);
        p.overall = overall;
        p
    }

    #[test]
    fn test_empty_roster_rates_zero() {
        assert_eq!(TeamRatings::of(&[]), TeamRatings::default());
    }

    #[test]
    fn test_excludes_injured_and_middle_schoolers() {
        let mut hurt = player(Position::Quarterback, 11, 90);
        hurt.injury_status = InjuryStatus::Out;
        hurt.injury_weeks = 2;
        let roster = vec![
            hurt,
            player(Position::Quarterback, 8, 30),
            player(Position::RunningBack, 10, 60),
            player(Position::Linebacker, 12, 71),
        ];
        let ratings = TeamRatings::of(&roster);
        assert_eq!(ratings.team, 66); // (60 + 71) / 2 = 65.5
        assert_eq!(ratings.offense, 60);
        assert_eq!(ratings.defense, 71);
    }

    #[test]
    fn test_questionable_players_still_count() {
        let mut knock = player(Position::Safety, 10, 50);
        knock.injury_status = InjuryStatus::Questionable;
        assert_eq!(defense_rating(&[knock]), 50);
    }

    #[test]
    fn test_specialists_only_count_for_team() {
        let roster = vec![player(Position::Kicker, 11, 70)];
        let ratings = TeamRatings::of(&roster);
        assert_eq!(ratings.team, 70);
        assert_eq!(ratings.offense, 0);
        assert_eq!(ratings.defense, 0);
    }

    #[test]
    fn test_leaders_sorted() {
        let mut a = player(Position::RunningBack, 10, 60);
        a.stats.regular_season.rushing_yards = 50;
        let mut b = player(Position::WideReceiver, 10, 61);
        b.stats.regular_season.receiving_yards = 120;
        let mut d = player(Position::Linebacker, 10, 62);
        d.stats.regular_season.tackles = 9;
        let roster = vec![a, b, d];
        let off = offensive_leaders(&roster, SeasonPhase::RegularSeason);
        assert_eq!(off.len(), 2);
        assert_eq!(off[0].position, Position::WideReceiver);
        let def = defensive_leaders(&roster, SeasonPhase::RegularSeason);
        assert_eq!(def.len(), 1);
        assert_eq!(def[0].stats.regular_season.tackles, 9);
    }
}
