//! JSON protocol for headless career communication.
//!
//! The headless runner communicates via JSON lines (one JSON object per line):
//!
//! **Input (stdin):** Commands from the controller
//! **Output (stdout):** Career state and responses
//!
//! # Protocol Flow
//!
//! 1. Runner starts, outputs `{"type":"ready","version":"1.0",...}`
//! 2. Controller sends commands as JSON lines
//! 3. Runner answers each command with an ack, a view or an error
//! 4. `quit` ends the session with `{"type":"bye"}`
//!
//! Career commands use the engine's own command shape; the runner adds a
//! handful of views and session controls on top.
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","step":0,"hash":...}
//! -> {"cmd":"advance_week"}
//! <- {"type":"ack","cmd":"advance_week","step":1}
//! -> {"cmd":"start_game","matchup_id":"scrimmage-1"}
//! <- {"type":"ack","cmd":"start_game","step":2}
//! -> {"cmd":"sim_to_decision"}
//! <- {"type":"ack","cmd":"sim_to_decision","step":3}
//! -> {"cmd":"game"}
//! <- {"type":"game","game":{...},"available_calls":["RUN","PASS_SHORT","PASS_LONG","CONTINUE"]}
//! -> {"cmd":"call_play","call":"PASS_LONG"}
//! <- {"type":"ack","cmd":"call_play","step":4}
//! ```

use gridiron_core::commands::{visible_overall_range, RecruitOutcome};
use gridiron_core::live_game::{ActiveGame, PlayCall};
use gridiron_core::player::{InjuryStatus, Player, Position};
use gridiron_core::session::CareerCommand;
use gridiron_core::state::{GameMatchup, GameState, SeasonPhase};
use serde::{Deserialize, Serialize};

// ============================================================================
// Input Commands (Controller -> Runner)
// ============================================================================

/// Runner-level commands that do not change the career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Summary of the career.
    Query,
    /// Full roster view.
    Roster,
    /// This year's schedule.
    Schedule,
    /// Recruiting pool with scouted ranges.
    Prospects,
    /// The live game, if any.
    Game,
    /// Current state hash.
    Hash,
    /// Write the commands applied so far as a replay file.
    SaveReplay {
        /// Output path.
        path: String,
    },
    /// End the session.
    Quit,
}

/// Anything the controller can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A runner command.
    Control(ControlCommand),
    /// A command applied to the career.
    Career(CareerCommand),
}

impl Command {
    /// Parse from a JSON line.
    ///
    /// # Errors
    ///
    /// Returns the career-command parse error when the line matches neither
    /// shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if let Ok(control) = serde_json::from_str::<ControlCommand>(json) {
            return Ok(Self::Control(control));
        }
        serde_json::from_str::<CareerCommand>(json).map(Self::Career)
    }

    /// Get command name for acknowledgment.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Control(control) => match control {
                ControlCommand::Query => "query",
                ControlCommand::Roster => "roster",
                ControlCommand::Schedule => "schedule",
                ControlCommand::Prospects => "prospects",
                ControlCommand::Game => "game",
                ControlCommand::Hash => "hash",
                ControlCommand::SaveReplay { .. } => "save_replay",
                ControlCommand::Quit => "quit",
            },
            Self::Career(command) => command.name(),
        }
    }
}

// ============================================================================
// Output Responses (Runner -> Controller)
// ============================================================================

/// Responses sent from the headless runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Runner is ready to accept commands.
    Ready {
        /// Protocol version.
        version: String,
        /// Commands applied so far.
        step: u64,
        /// Career hash.
        hash: u64,
    },

    /// Acknowledgment of a career command.
    Ack {
        /// Command name.
        cmd: String,
        /// Step count after the command.
        step: u64,
    },

    /// Outcome of a recruiting pitch.
    Recruit {
        /// What happened.
        outcome: RecruitOutcome,
        /// Step count after the command.
        step: u64,
    },

    /// Error processing a command.
    Error {
        /// What went wrong.
        message: String,
        /// Command that failed, if it parsed.
        cmd: Option<String>,
    },

    /// Career summary.
    State(CareerSummary),

    /// Roster view.
    Roster {
        /// One row per player, depth-chart order.
        players: Vec<PlayerRow>,
    },

    /// Schedule view.
    Schedule {
        /// Every matchup this year.
        matchups: Vec<GameMatchup>,
    },

    /// Recruiting pool view.
    Prospects {
        /// One row per prospect.
        prospects: Vec<PlayerRow>,
    },

    /// Live game view.
    Game {
        /// The game, absent when none is being played.
        game: Option<ActiveGame>,
        /// Calls the coach may make right now.
        available_calls: Vec<PlayCall>,
    },

    /// State hash for determinism verification.
    StateHash {
        /// Commands applied so far.
        step: u64,
        /// Career hash.
        hash: u64,
    },

    /// Replay written to disk.
    ReplaySaved {
        /// Output path.
        path: String,
        /// Commands recorded.
        commands: usize,
    },

    /// Goodbye message before shutdown.
    Bye,
}

// ============================================================================
// State Types
// ============================================================================

/// Headline numbers for a career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSummary {
    /// Calendar year.
    pub year: u32,
    /// Week within the phase.
    pub week: u8,
    /// Season phase.
    pub phase: SeasonPhase,
    /// User school name.
    pub school: String,
    /// Wins this season.
    pub wins: u32,
    /// Losses this season.
    pub losses: u32,
    /// Titles won.
    pub titles: u32,
    /// Team rating.
    pub team_rating: u32,
    /// School budget.
    pub budget: i64,
    /// Players on the roster.
    pub roster_size: usize,
    /// Scouting points left this week.
    pub scouting_points: u32,
    /// Recruiting pitches left this week.
    pub recruiting_actions: u32,
    /// Id of this week's unplayed matchup.
    pub current_matchup: Option<String>,
    /// A live game is in progress.
    pub game_in_progress: bool,
    /// Commands applied so far.
    pub step: u64,
    /// Career hash.
    pub hash: u64,
}

impl CareerSummary {
    /// Summarize a state.
    #[must_use]
    pub fn of(state: &GameState, step: u64, hash: u64) -> Self {
        Self {
            year: state.year,
            week: state.week,
            phase: state.phase,
            school: state.user_school.name.clone(),
            wins: state.career.wins,
            losses: state.career.losses,
            titles: state.career.titles,
            team_rating: gridiron_core::ratings::team_rating(&state.roster),
            budget: state.user_school.budget,
            roster_size: state.roster.len(),
            scouting_points: state.scouting_points,
            recruiting_actions: state.recruiting_actions,
            current_matchup: state.current_matchup().map(|m| m.id.clone()),
            game_in_progress: state.active_game.is_some(),
            step,
            hash,
        }
    }
}

/// A player as the controller sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    /// Player id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// School grade.
    pub grade: u8,
    /// Position.
    pub position: Position,
    /// Overall range visible at the player's scouting level.
    pub overall: (u8, u8),
    /// Scouting level, 0-3.
    pub scouting_level: u8,
    /// Interest in the program.
    pub interest_level: u8,
    /// Injury status.
    pub injury_status: InjuryStatus,
}

impl From<&Player> for PlayerRow {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            grade: player.grade,
            position: player.position,
            overall: visible_overall_range(player),
            scouting_level: player.scouting_level,
            interest_level: player.interest_level,
            injury_status: player.injury_status,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

impl Response {
    /// Create a ready response.
    #[must_use]
    pub fn ready(step: u64, hash: u64) -> Self {
        Self::Ready {
            version: "1.0".to_string(),
            step,
            hash,
        }
    }

    /// Create an acknowledgment.
    #[must_use]
    pub fn ack(cmd: &str, step: u64) -> Self {
        Self::Ack {
            cmd: cmd.to_string(),
            step,
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>, cmd: Option<&str>) -> Self {
        Self::Error {
            message: message.into(),
            cmd: cmd.map(String::from),
        }
    }

    /// Serialize to JSON line (with newline).
    #[must_use]
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"Serialization failed: {e}"}}"#)
        });
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_command() {
        let cmd = Command::from_json(r#"{"cmd":"query"}"#).unwrap();
        assert_eq!(cmd, Command::Control(ControlCommand::Query));
        assert_eq!(cmd.name(), "query");
    }

    #[test]
    fn test_parse_career_command() {
        let json = r#"{"cmd":"start_game","matchup_id":"reg-3"}"#;
        let cmd = Command::from_json(json).unwrap();
        assert_eq!(
            cmd,
            Command::Career(CareerCommand::StartGame {
                matchup_id: "reg-3".into()
            })
        );
        assert_eq!(cmd.name(), "start_game");
    }

    #[test]
    fn test_parse_play_call() {
        let cmd = Command::from_json(r#"{"cmd":"call_play","call":"PUNT"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Career(CareerCommand::CallPlay {
                call: PlayCall::Punt
            })
        );
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(Command::from_json(r#"{"cmd":"tick","count":60}"#).is_err());
        assert!(Command::from_json("not json").is_err());
    }

    #[test]
    fn test_serialize_ack() {
        let json = Response::ack("advance_week", 3).to_json_line();
        assert_eq!(json, "{\"type\":\"ack\",\"cmd\":\"advance_week\",\"step\":3}\n");
    }

    #[test]
    fn test_serialize_game_view() {
        let game = ActiveGame::new("reg-1", "Riverdale", gridiron_core::live_game::Side::Home);
        let resp = Response::Game {
            available_calls: game.available_play_calls(),
            game: Some(game),
        };
        let json = resp.to_json_line();
        assert!(json.contains(r#""type":"game""#));
        assert!(json.contains(r#""PASS_LONG""#));
        assert!(!json.contains(r#""PUNT""#));
    }
}
