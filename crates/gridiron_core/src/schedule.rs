//! Season schedule construction.

use rand::Rng;

use crate::constants::{PLAYOFF_ROUNDS, SCRIMMAGE_COUNT};
use crate::dice;
use crate::school::School;
use crate::state::{GameMatchup, MatchKind, SeasonPhase};

fn matchup(
    id: String,
    week: u32,
    user: &School,
    opponent: &School,
    user_home: bool,
    summary: MatchKind,
    opponent_rating: u32,
) -> GameMatchup {
    let (home, away) = if user_home { (user, opponent) } else { (opponent, user) };
    GameMatchup {
        id,
        week: week as u8,
        home_team_id: home.id.clone(),
        away_team_id: away.id.clone(),
        home_score: None,
        away_score: None,
        played: false,
        summary,
        opponent_rating,
        opponent_name: opponent.name.clone(),
    }
}

fn rating_near<R: Rng + ?Sized>(rng: &mut R, prestige: u8, offset: f64, spread: f64) -> u32 {
    (f64::from(prestige) + offset + dice::unit(rng) * spread).round() as u32
}

/// Build a year's scrimmages and regular season.
///
/// Scrimmages pick a random league school and alternate home/away. The
/// regular season rotates through the league deterministically
/// (`league[week % len]`), home on even weeks. An empty league yields an
/// empty schedule.
pub fn generate_schedule_for_year<R: Rng + ?Sized>(
    rng: &mut R,
    user_school: &School,
    league: &[School],
) -> Vec<GameMatchup> {
    if league.is_empty() {
        return Vec::new();
    }
    let mut schedule = Vec::with_capacity(SCRIMMAGE_COUNT as usize + 9);

    for week in 1..=SCRIMMAGE_COUNT {
        let opponent = dice::pick(rng, league);
        let rating = rating_near(rng, opponent.prestige, 10.0, 10.0);
        schedule.push(matchup(
            format!("scrimmage-{week}"),
            week,
            user_school,
            opponent,
            week % 2 == 0,
            MatchKind::Scrimmage,
            rating,
        ));
    }

    for week in 1..=u32::from(SeasonPhase::RegularSeason.weeks()) {
        let opponent = &league[week as usize % league.len()];
        let rating = rating_near(rng, opponent.prestige, 15.0, 5.0);
        schedule.push(matchup(
            format!("reg-{week}"),
            week,
            user_school,
            opponent,
            week % 2 == 0,
            MatchKind::Regular,
            rating,
        ));
    }

    schedule
}

/// Build the four-round playoff bracket; the user hosts every round.
pub fn generate_playoffs<R: Rng + ?Sized>(
    rng: &mut R,
    user_school: &School,
    league: &[School],
) -> Vec<GameMatchup> {
    if league.is_empty() {
        return Vec::new();
    }
    (1..=PLAYOFF_ROUNDS)
        .map(|round| {
            let opponent = dice::pick(rng, league);
            let rating = rating_near(rng, opponent.prestige, 20.0, 10.0);
            matchup(
                format!("playoff-{round}"),
                round,
                user_school,
                opponent,
                true,
                MatchKind::Playoff,
                rating,
            )
        })
        .collect()
}
