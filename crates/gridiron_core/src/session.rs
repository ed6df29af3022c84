//! Career session: a [`GameState`] paired with the generator that drives it.
//!
//! The pure reducers take their randomness as an argument. A [`Career`]
//! owns a seeded [`ChaCha8Rng`] instead, applies [`CareerCommand`]s one at
//! a time and checks the caller-side policies before each reducer runs.
//! Two careers built from the same setup and fed the same commands end in
//! the same [`Career::state_hash`].
//!
//! # Example
//!
//! ```
//! use gridiron_core::data::CareerSetup;
//! use gridiron_core::session::{Career, CareerCommand};
//!
//! let mut career = Career::new(&CareerSetup::default().with_seed(9));
//! career.apply(CareerCommand::AdvanceWeek).unwrap();
//! assert_eq!(career.state().week, 2);
//! assert_eq!(career.step(), 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commands::{self, DepthOrder, RecruitOutcome};
use crate::data::CareerSetup;
use crate::error::{GameError, Result};
use crate::live_game::{
    execute_coach_play, execute_single_play, start_interactive_game, ActiveGame, PlayCall,
};
use crate::policy;
use crate::ratings::team_rating;
use crate::season::{advance_week, merge_finished_game};
use crate::state::GameState;

/// Everything a coach can do to a career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum CareerCommand {
    /// Move the calendar forward one week.
    AdvanceWeek,
    /// Take the field for a scheduled matchup.
    StartGame {
        /// Matchup to play.
        matchup_id: String,
    },
    /// Run one autoplay snap.
    PlaySnap,
    /// Autoplay until the next decision point or the final whistle.
    SimToDecision,
    /// Make a coach call at a decision point.
    CallPlay {
        /// The play.
        call: PlayCall,
    },
    /// Fold a finished live game into the season.
    FinishGame,
    /// Sign a prospect outright.
    Recruit {
        /// Prospect to sign.
        prospect_id: String,
    },
    /// Pitch a prospect, spending a recruiting action.
    AttemptRecruit {
        /// Prospect to pitch.
        prospect_id: String,
    },
    /// Release a player.
    Cut {
        /// Player to release.
        player_id: String,
    },
    /// Scout a prospect.
    Scout {
        /// Prospect to scout.
        prospect_id: String,
    },
    /// Hire from the staff board.
    HireStaff {
        /// Candidate to hire.
        candidate_id: String,
    },
    /// Turn a staff member's style dial.
    SetStaffStyle {
        /// Staff member.
        staff_id: String,
        /// New dial value, 0-100.
        value: u8,
    },
    /// Put the roster in a given order.
    ReorderRoster {
        /// Player ids, first to last.
        order: Vec<String>,
    },
    /// Sort the depth chart automatically.
    AutoDepthChart {
        /// Ranking key.
        order: DepthOrder,
    },
}

impl CareerCommand {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            CareerCommand::AdvanceWeek => "advance_week",
            CareerCommand::StartGame { .. } => "start_game",
            CareerCommand::PlaySnap => "play_snap",
            CareerCommand::SimToDecision => "sim_to_decision",
            CareerCommand::CallPlay { .. } => "call_play",
            CareerCommand::FinishGame => "finish_game",
            CareerCommand::Recruit { .. } => "recruit",
            CareerCommand::AttemptRecruit { .. } => "attempt_recruit",
            CareerCommand::Cut { .. } => "cut",
            CareerCommand::Scout { .. } => "scout",
            CareerCommand::HireStaff { .. } => "hire_staff",
            CareerCommand::SetStaffStyle { .. } => "set_staff_style",
            CareerCommand::ReorderRoster { .. } => "reorder_roster",
            CareerCommand::AutoDepthChart { .. } => "auto_depth_chart",
        }
    }
}

/// What applying a command produced, beyond the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command ran.
    Applied,
    /// A recruiting pitch landed or missed.
    Recruit(RecruitOutcome),
}

/// A career in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    state: GameState,
    rng: ChaCha8Rng,
    step: u64,
}

impl Career {
    /// Start a career from a setup, seeding the generator from `setup.seed`.
    #[must_use]
    pub fn new(setup: &CareerSetup) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(setup.seed);
        let state = commands::create_career(setup, &mut rng);
        Self {
            state,
            rng,
            step: 0,
        }
    }

    /// Resume from an existing state with a fresh generator.
    #[must_use]
    pub fn from_state(state: GameState, seed: u64) -> Self {
        Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
            step: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Commands applied so far.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// The live game, if one is being played.
    #[must_use]
    pub const fn active_game(&self) -> Option<&ActiveGame> {
        self.state.active_game.as_ref()
    }

    /// Apply one command.
    ///
    /// The step counter only advances when the command succeeds; a rejected
    /// command leaves the career untouched.
    ///
    /// # Errors
    ///
    /// Policy violations, game-flow errors (no live game, game already in
    /// progress, game not finished, unknown matchup, illegal play call).
    pub fn apply(&mut self, command: CareerCommand) -> Result<CommandOutcome> {
        debug!(step = self.step, command = command.name(), "Applying command");
        let outcome = match command {
            CareerCommand::AdvanceWeek => {
                if self.state.active_game.is_some() {
                    return Err(GameError::GameInProgress);
                }
                self.reduce(advance_week);
                CommandOutcome::Applied
            }
            CareerCommand::StartGame { matchup_id } => {
                if self.state.active_game.is_some() {
                    return Err(GameError::GameInProgress);
                }
                let game = start_interactive_game(&self.state, &matchup_id, &mut self.rng)
                    .ok_or(GameError::UnknownMatchup(matchup_id))?;
                self.state.active_game = Some(game);
                CommandOutcome::Applied
            }
            CareerCommand::PlaySnap => {
                let game = self.take_game()?;
                self.state.active_game = Some(execute_single_play(game, &mut self.rng));
                CommandOutcome::Applied
            }
            CareerCommand::SimToDecision => {
                let mut game = self.take_game()?;
                loop {
                    game = execute_single_play(game, &mut self.rng);
                    if game.is_game_over || game.waiting_for_coach {
                        break;
                    }
                }
                self.state.active_game = Some(game);
                CommandOutcome::Applied
            }
            CareerCommand::CallPlay { call } => {
                let available = self
                    .active_game()
                    .ok_or(GameError::NoActiveGame)?
                    .available_play_calls();
                if !available.contains(&call) {
                    return Err(GameError::PlayNotAvailable(call.label().to_string()));
                }
                let game = self.take_game()?;
                let rating = team_rating(&self.state.roster);
                let archetype = self.state.coach.archetype;
                self.state.active_game =
                    Some(execute_coach_play(game, call, rating, &archetype, &mut self.rng));
                CommandOutcome::Applied
            }
            CareerCommand::FinishGame => {
                let game = self.active_game().ok_or(GameError::NoActiveGame)?;
                if !game.is_game_over {
                    return Err(GameError::GameNotFinished);
                }
                let game = game.clone();
                self.reduce(|state, rng| merge_finished_game(state, &game, rng));
                CommandOutcome::Applied
            }
            CareerCommand::Recruit { prospect_id } => {
                policy::check_recruit(&self.state, false)?;
                self.reduce(|state, _| commands::recruit(state, &prospect_id));
                CommandOutcome::Applied
            }
            CareerCommand::AttemptRecruit { prospect_id } => {
                policy::check_recruit(&self.state, true)?;
                let (state, result) =
                    commands::attempt_recruit(self.state.clone(), &prospect_id, &mut self.rng);
                self.state = state;
                CommandOutcome::Recruit(result)
            }
            CareerCommand::Cut { player_id } => {
                self.reduce(|state, _| commands::cut(state, &player_id));
                CommandOutcome::Applied
            }
            CareerCommand::Scout { prospect_id } => {
                policy::check_scout(&self.state, &prospect_id)?;
                self.reduce(|state, _| commands::scout(state, &prospect_id));
                CommandOutcome::Applied
            }
            CareerCommand::HireStaff { candidate_id } => {
                policy::check_hire(&self.state, &candidate_id)?;
                self.reduce(|state, _| commands::hire_staff(state, &candidate_id));
                CommandOutcome::Applied
            }
            CareerCommand::SetStaffStyle { staff_id, value } => {
                policy::check_style(value)?;
                self.reduce(|state, _| commands::set_staff_style(state, &staff_id, value));
                CommandOutcome::Applied
            }
            CareerCommand::ReorderRoster { order } => {
                self.reduce(|state, _| commands::reorder_roster(state, &order));
                CommandOutcome::Applied
            }
            CareerCommand::AutoDepthChart { order } => {
                self.reduce(|state, _| commands::auto_depth_chart(state, order));
                CommandOutcome::Applied
            }
        };
        self.step += 1;
        Ok(outcome)
    }

    fn reduce<F>(&mut self, f: F)
    where
        F: FnOnce(GameState, &mut ChaCha8Rng) -> GameState,
    {
        self.state = f(self.state.clone(), &mut self.rng);
    }

    fn take_game(&mut self) -> Result<ActiveGame> {
        self.state.active_game.take().ok_or(GameError::NoActiveGame)
    }

    /// Hash of the full career: state, generator position and step.
    ///
    /// Two careers with equal hashes will respond identically to the same
    /// future commands.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.step.hash(&mut hasher);
        self.rng.get_seed().hash(&mut hasher);
        self.rng.get_word_pos().hash(&mut hasher);
        // Floats in the state rule out a derived Hash; hash the encoding.
        match bincode::serialize(&self.state) {
            Ok(bytes) => bytes.hash(&mut hasher),
            Err(e) => {
                warn!(step = self.step, error = %e, "State encoding failed; hash covers step and generator only");
                0u8.hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Snapshot the career for replay or save files.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize career: {e}")))
    }

    /// Restore a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize career: {e}")))
    }
}
