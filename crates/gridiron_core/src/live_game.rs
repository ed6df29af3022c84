//! Play-by-play engine for a single interactive match.
//!
//! The game advances one discrete play per call, either an autoplay snap
//! ([`execute_single_play`]) or a coach-called play ([`execute_coach_play`]).
//! Both paths share one resolver for touchdowns, first downs and turnovers
//! on downs, so field position means the same thing whichever path moved
//! the ball.
//!
//! Field position is absolute: the home side drives toward 100, the away
//! side toward 0.
//!
//! # Example
//!
//! ```
//! use gridiron_core::live_game::{execute_single_play, ActiveGame, Side};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
//! while !game.is_game_over {
//!     game = execute_single_play(game, &mut rng);
//! }
//! assert_eq!(game.quarter, 4);
//! ```

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIRST_DOWN_DISTANCE, KICKOFF_YARD_LINE, PLAY_HISTORY_CAP, PUNT_MAX_YARD_LINE, QUARTERS,
    QUARTER_SECONDS, TOUCHDOWN_POINTS,
};
use crate::dice;
use crate::state::{CoachArchetype, GameState};

/// Base odds that a deep shot connects.
pub const LONG_PASS_BASE_ODDS: f64 = 0.7;

/// Upper bound on long-pass odds after modifiers.
pub const LONG_PASS_MAX_ODDS: f64 = 0.95;

/// Team in a live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Drives toward the 100 yard line.
    Home,
    /// Drives toward the 0 yard line.
    Away,
}

impl Side {
    /// The other team.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Field direction: +1 for home, -1 for away.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Side::Home => 1,
            Side::Away => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Home => "Home",
            Side::Away => "Away",
        })
    }
}

/// Box score for one team.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamGameStats {
    pub total_yards: u32,
    pub pass_yards: u32,
    pub rush_yards: u32,
    pub first_downs: u32,
    pub turnovers: u32,
}

/// Box scores for both teams.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub home: TeamGameStats,
    pub away: TeamGameStats,
}

impl GameStats {
    /// Box score for a side.
    #[must_use]
    pub const fn side(&self, side: Side) -> &TeamGameStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut TeamGameStats {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// Play a coach can call at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayCall {
    /// Handoff for 2-9 yards.
    Run,
    /// Quick throw for 2-9 yards.
    PassShort,
    /// Deep shot: 30 yards or a 5-yard sack.
    PassLong,
    /// Kick it away on 4th down.
    Punt,
    /// Resume autoplay without calling a play.
    Continue,
}

impl PlayCall {
    /// Counts toward passing yardage.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, PlayCall::PassShort | PlayCall::PassLong)
    }

    /// Label used in the play log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PlayCall::Run => "RUN",
            PlayCall::PassShort => "PASS SHORT",
            PlayCall::PassLong => "PASS LONG",
            PlayCall::Punt => "PUNT",
            PlayCall::Continue => "CONTINUE",
        }
    }

    /// A sensible default call for the current decision point.
    #[must_use]
    pub fn suggested(game: &ActiveGame) -> Self {
        if game.down < 4 {
            return PlayCall::Continue;
        }
        if game.can_punt() {
            PlayCall::Punt
        } else if game.distance <= 3 {
            PlayCall::Run
        } else {
            PlayCall::PassShort
        }
    }
}

/// Adjusts play-call odds; implemented by coach personas.
pub trait PlayCallModifier {
    /// Probability that a long pass connects, given the base odds.
    fn long_pass_odds(&self, base: f64, _team_rating: u32) -> f64 {
        base
    }
}

impl PlayCallModifier for CoachArchetype {
    fn long_pass_odds(&self, base: f64, team_rating: u32) -> f64 {
        match self {
            CoachArchetype::Tactician => {
                (base + f64::from(team_rating.min(99)) / 1000.0).min(LONG_PASS_MAX_ODDS)
            }
            CoachArchetype::Recruiter | CoachArchetype::Motivator => base,
        }
    }
}

/// Working record of an interactive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveGame {
    /// Matchup being played.
    pub matchup_id: String,
    /// Opponent display name.
    pub opponent_name: String,
    /// Home points.
    pub home_score: u32,
    /// Away points.
    pub away_score: u32,
    /// Quarter, 1..=4.
    pub quarter: u8,
    /// Seconds left in the quarter.
    pub time_remaining: u32,
    /// Team with the ball.
    pub possession: Side,
    /// Ball spot, 0 and 100 are the end zones.
    pub yard_line: i32,
    /// Down, 1..=4.
    pub down: u8,
    /// Yards to gain.
    pub distance: i32,
    /// Paused for a coach decision.
    pub waiting_for_coach: bool,
    /// Headline of the current moment.
    pub moment_description: String,
    /// Text of the latest play.
    pub last_play_result: String,
    /// Play log, most recent first.
    pub play_history: VecDeque<String>,
    /// Final whistle blown.
    pub is_game_over: bool,
    /// Box scores.
    pub game_stats: GameStats,
}

impl ActiveGame {
    /// Fresh game at kickoff with `possession` receiving.
    #[must_use]
    pub fn new(matchup_id: impl Into<String>, opponent_name: impl Into<String>, possession: Side) -> Self {
        let mut play_history = VecDeque::with_capacity(PLAY_HISTORY_CAP);
        play_history.push_front("Game Start".to_string());
        Self {
            matchup_id: matchup_id.into(),
            opponent_name: opponent_name.into(),
            home_score: 0,
            away_score: 0,
            quarter: 1,
            time_remaining: QUARTER_SECONDS,
            possession,
            yard_line: KICKOFF_YARD_LINE,
            down: 1,
            distance: FIRST_DOWN_DISTANCE,
            waiting_for_coach: false,
            moment_description: "Game Start".to_string(),
            last_play_result: "Kickoff incoming!".to_string(),
            play_history,
            is_game_over: false,
            game_stats: GameStats::default(),
        }
    }

    /// Points for a side.
    #[must_use]
    pub const fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Home => &mut self.home_score,
            Side::Away => &mut self.away_score,
        }
    }

    /// Punting is allowed: 4th down short of the 70.
    #[must_use]
    pub fn can_punt(&self) -> bool {
        !self.is_game_over && self.down == 4 && self.yard_line < PUNT_MAX_YARD_LINE
    }

    /// Calls the coach may make right now.
    #[must_use]
    pub fn available_play_calls(&self) -> Vec<PlayCall> {
        if self.is_game_over {
            return Vec::new();
        }
        let mut calls = vec![PlayCall::Run, PlayCall::PassShort, PlayCall::PassLong];
        if self.can_punt() {
            calls.push(PlayCall::Punt);
        }
        if self.waiting_for_coach {
            calls.push(PlayCall::Continue);
        }
        calls
    }

    fn log(&mut self, text: String) {
        self.play_history.push_front(text.clone());
        self.play_history.truncate(PLAY_HISTORY_CAP);
        self.last_play_result = text;
    }

    fn reset_series(&mut self) {
        self.down = 1;
        self.distance = FIRST_DOWN_DISTANCE;
    }

    fn gain(&mut self, side: Side, yards: i32, is_pass: bool) {
        if yards > 0 {
            let gained = yards as u32;
            let stats = self.game_stats.side_mut(side);
            stats.total_yards += gained;
            if is_pass {
                stats.pass_yards += gained;
            } else {
                stats.rush_yards += gained;
            }
        }
        self.yard_line += yards * side.direction();
    }

    /// Apply the outcome of a play that moved the ball from scrimmage.
    fn resolve(&mut self, side: Side, yards: i32) -> &'static str {
        if self.yard_line >= 100 || self.yard_line <= 0 {
            *self.score_mut(side) += TOUCHDOWN_POINTS;
            self.possession = side.flip();
            self.yard_line = KICKOFF_YARD_LINE;
            self.reset_series();
            self.moment_description = format!("{side} Touchdown");
            return " TOUCHDOWN!";
        }
        if yards >= self.distance {
            self.reset_series();
            self.game_stats.side_mut(side).first_downs += 1;
            return " First down.";
        }
        self.down += 1;
        self.distance -= yards;
        if self.down > 4 {
            self.game_stats.side_mut(side).turnovers += 1;
            self.possession = side.flip();
            self.yard_line = 100 - self.yard_line;
            self.reset_series();
            return " Turnover on downs.";
        }
        ""
    }

    fn flag_fourth_down(&mut self) {
        if !self.is_game_over && self.down == 4 {
            self.waiting_for_coach = true;
            self.moment_description = "4th Down Decision".to_string();
        }
    }
}

/// Open an interactive game for a scheduled matchup.
///
/// Returns `None` when the matchup does not exist or was already played.
pub fn start_interactive_game<R: Rng + ?Sized>(
    state: &GameState,
    matchup_id: &str,
    rng: &mut R,
) -> Option<ActiveGame> {
    let matchup = state.matchup(matchup_id).filter(|m| !m.played)?;
    let possession = if dice::chance(rng, 0.5) { Side::Home } else { Side::Away };
    Some(ActiveGame::new(
        matchup.id.clone(),
        matchup.opponent_name.clone(),
        possession,
    ))
}

/// One autoplay tick.
///
/// Burns 25-34 seconds. When the quarter clock runs out the game pauses
/// for a quarter break, or ends after the fourth. Otherwise a random play
/// (-2 to 9 yards, 55% passes) is run for the team in possession. A game
/// that is already over is returned untouched.
pub fn execute_single_play<R: Rng + ?Sized>(mut game: ActiveGame, rng: &mut R) -> ActiveGame {
    if game.is_game_over {
        return game;
    }
    game.waiting_for_coach = false;

    let burn = dice::roll(rng, 25, 34) as u32;
    if game.time_remaining <= burn {
        if game.quarter < QUARTERS {
            game.quarter += 1;
            game.time_remaining = QUARTER_SECONDS;
            game.waiting_for_coach = true;
            game.moment_description = "Quarter Break".to_string();
            let text = format!("End of Quarter {}", game.quarter - 1);
            game.log(text);
        } else {
            game.time_remaining = 0;
            game.is_game_over = true;
            game.moment_description = "Final".to_string();
            game.log("Final Whistle.".to_string());
        }
        return game;
    }
    game.time_remaining -= burn;

    let side = game.possession;
    let yards = dice::roll(rng, -2, 9);
    let is_pass = dice::chance(rng, 0.55);
    game.gain(side, yards, is_pass);
    let outcome = game.resolve(side, yards);
    let kind = if is_pass { "pass" } else { "run" };
    game.log(format!("{side} {kind} for {yards} yds.{outcome}"));
    game.flag_fourth_down();
    game
}

/// Run a coach-called play.
///
/// Clears the pending decision. `Continue` does nothing else. Run and short
/// pass gain 2-9 yards; the long pass gains 30 at the odds `modifier` grants
/// (70% base) or loses 5. Punts flip possession 30-45 yards downfield. Coach
/// calls do not run the clock.
pub fn execute_coach_play<R, M>(
    mut game: ActiveGame,
    call: PlayCall,
    team_rating: u32,
    modifier: &M,
    rng: &mut R,
) -> ActiveGame
where
    R: Rng + ?Sized,
    M: PlayCallModifier + ?Sized,
{
    if game.is_game_over {
        return game;
    }
    game.waiting_for_coach = false;

    let side = game.possession;
    match call {
        PlayCall::Continue => return game,
        PlayCall::Punt => {
            let distance = dice::roll(rng, 30, 45);
            let spot = game.yard_line + distance * side.direction();
            game.possession = side.flip();
            game.yard_line = if spot >= 100 {
                80
            } else if spot <= 0 {
                20
            } else {
                spot
            };
            game.reset_series();
            game.moment_description = format!("{side} Punt");
            game.log(format!("Coach call: PUNT for {distance} yds."));
        }
        PlayCall::Run | PlayCall::PassShort | PlayCall::PassLong => {
            let yards = if call == PlayCall::PassLong {
                let odds = modifier.long_pass_odds(LONG_PASS_BASE_ODDS, team_rating);
                if dice::chance(rng, odds) {
                    30
                } else {
                    -5
                }
            } else {
                dice::roll(rng, 2, 9)
            };
            game.gain(side, yards, call.is_pass());
            let outcome = game.resolve(side, yards);
            game.log(format!("Coach call: {} for {yards} yds.{outcome}", call.label()));
        }
    }
    game.flag_fourth_down();
    game
}

/// Drive a game to the final whistle, asking `decide` at every decision
/// point.
pub fn play_out<R, M, F>(
    mut game: ActiveGame,
    team_rating: u32,
    modifier: &M,
    rng: &mut R,
    mut decide: F,
) -> ActiveGame
where
    R: Rng + ?Sized,
    M: PlayCallModifier + ?Sized,
    F: FnMut(&ActiveGame) -> PlayCall,
{
    while !game.is_game_over {
        game = if game.waiting_for_coach {
            let call = decide(&game);
            execute_coach_play(game, call, team_rating, modifier, rng)
        } else {
            execute_single_play(game, rng)
        };
    }
    game
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Always-pass modifier for forcing long-pass outcomes.
    struct Certain(f64);

    impl PlayCallModifier for Certain {
        fn long_pass_odds(&self, _base: f64, _team_rating: u32) -> f64 {
            self.0
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    #[test]
    fn test_new_game_defaults() {
        let game = ActiveGame::new("reg-1", "Riverdale", Side::Away);
        assert_eq!(game.quarter, 1);
        assert_eq!(game.time_remaining, 480);
        assert_eq!(game.yard_line, 25);
        assert_eq!((game.down, game.distance), (1, 10));
        assert!(!game.waiting_for_coach);
        assert_eq!(game.play_history.front().map(String::as_str), Some("Game Start"));
    }

    #[test]
    fn test_final_whistle_in_fourth() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.quarter = 4;
        game.time_remaining = 20;
        game.home_score = 14;
        game.away_score = 7;
        let over = execute_single_play(game, &mut rng());
        assert!(over.is_game_over);
        assert_eq!((over.home_score, over.away_score), (14, 7));

        let again = execute_single_play(over.clone(), &mut rng());
        assert_eq!(again, over);
    }

    #[test]
    fn test_quarter_break_pauses() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.time_remaining = 10;
        let next = execute_single_play(game, &mut rng());
        assert_eq!(next.quarter, 2);
        assert_eq!(next.time_remaining, 480);
        assert!(next.waiting_for_coach);
        assert_eq!(next.moment_description, "Quarter Break");
        assert_eq!(next.last_play_result, "End of Quarter 1");
        assert!(next.available_play_calls().contains(&PlayCall::Continue));
    }

    #[test]
    fn test_touchdown_awards_possessing_side() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.yard_line = 99;
        let mut r = rng();
        // Any gain of 1+ from the 99 scores; retry seeds until a positive snap.
        let mut scored = None;
        for _ in 0..50 {
            let next = execute_single_play(game.clone(), &mut r);
            if next.home_score == 7 {
                scored = Some(next);
                break;
            }
        }
        let scored = scored.unwrap();
        assert_eq!(scored.away_score, 0);
        assert_eq!(scored.possession, Side::Away);
        assert_eq!(scored.yard_line, 25);
        assert_eq!((scored.down, scored.distance), (1, 10));
    }

    #[test]
    fn test_coach_long_pass_scores() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Away);
        game.yard_line = 20;
        game.waiting_for_coach = true;
        let next = execute_coach_play(game, PlayCall::PassLong, 70, &Certain(1.0), &mut rng());
        assert_eq!(next.away_score, 7);
        assert_eq!(next.possession, Side::Home);
        assert_eq!(next.yard_line, 25);
        assert!(!next.waiting_for_coach);
        assert_eq!(next.game_stats.away.pass_yards, 30);
    }

    #[test]
    fn test_coach_long_pass_sack_costs_a_down() {
        let game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        let next = execute_coach_play(game, PlayCall::PassLong, 70, &Certain(0.0), &mut rng());
        assert_eq!(next.yard_line, 20);
        assert_eq!((next.down, next.distance), (2, 15));
        assert_eq!(next.game_stats.home.total_yards, 0);
    }

    #[test]
    fn test_coach_turnover_on_downs() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.down = 4;
        game.distance = 20;
        game.yard_line = 72;
        let next = execute_coach_play(game, PlayCall::Run, 60, &CoachArchetype::Motivator, &mut rng());
        assert_eq!(next.possession, Side::Away);
        assert_eq!((next.down, next.distance), (1, 10));
        assert_eq!(next.game_stats.home.turnovers, 1);
        assert!(next.yard_line <= 100 - 74 && next.yard_line >= 100 - 81);
    }

    #[test]
    fn test_continue_only_clears_wait() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.waiting_for_coach = true;
        let next = execute_coach_play(game.clone(), PlayCall::Continue, 60, &CoachArchetype::Tactician, &mut rng());
        game.waiting_for_coach = false;
        assert_eq!(next, game);
    }

    #[test]
    fn test_punt_flips_field() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.down = 4;
        game.yard_line = 30;
        assert!(game.available_play_calls().contains(&PlayCall::Punt));
        let next = execute_coach_play(game, PlayCall::Punt, 60, &CoachArchetype::Tactician, &mut rng());
        assert_eq!(next.possession, Side::Away);
        assert!((60..=75).contains(&next.yard_line));
        assert_eq!(next.down, 1);
    }

    #[test]
    fn test_no_punt_past_seventy() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.down = 4;
        game.yard_line = 75;
        assert!(!game.available_play_calls().contains(&PlayCall::Punt));
        game.down = 3;
        game.yard_line = 30;
        assert!(!game.can_punt());
    }

    #[test]
    fn test_tactician_hook() {
        let base = LONG_PASS_BASE_ODDS;
        assert_eq!(CoachArchetype::Recruiter.long_pass_odds(base, 80), base);
        let boosted = CoachArchetype::Tactician.long_pass_odds(base, 80);
        assert!((boosted - 0.78).abs() < 1e-9);
    }

    #[test]
    fn test_history_capped() {
        let mut r = rng();
        let game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        let done = play_out(game, 60, &CoachArchetype::Tactician, &mut r, PlayCall::suggested);
        assert!(done.is_game_over);
        assert!(done.play_history.len() <= 50);
        assert_eq!(done.play_history.front().map(String::as_str), Some("Final Whistle."));
    }

    #[test]
    fn test_fourth_down_pauses_autoplay() {
        let mut game = ActiveGame::new("reg-1", "Riverdale", Side::Home);
        game.down = 3;
        game.distance = 30;
        let next = execute_single_play(game, &mut rng());
        assert_eq!(next.down, 4);
        assert!(next.waiting_for_coach);
        assert_eq!(next.moment_description, "4th Down Decision");
    }
}
