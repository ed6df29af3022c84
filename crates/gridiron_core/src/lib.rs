//! # Gridiron Core
//!
//! Deterministic season-management engine for a high-school football
//! program: roster, staff, recruiting, the weekly calendar and live
//! play-by-play games.
//!
//! This crate contains **only** game logic:
//! - No rendering
//! - No storage (replay files aside)
//! - No system randomness: every random operation takes an injected
//!   [`rand::Rng`]
//!
//! Every transition is a function from the current [`state::GameState`] to
//! the next one. Seeding the generator fixes the whole career, which is
//! what batch runs, determinism checks and replays rely on.
//!
//! ## Crate Structure
//!
//! - [`player`], [`school`], [`staff`], [`state`] - Data model
//! - [`generators`] - Random players, schools, staff and prospects
//! - [`ratings`] - Team, offense and defense ratings
//! - [`schedule`] - Season and playoff schedules
//! - [`season`] - Weekly advancement and season rollover
//! - [`live_game`] - Interactive play-by-play engine
//! - [`commands`] - Career creation and coach actions
//! - [`session`] - Seeded career wrapper with policy checks
//! - [`replay`] - Recording and verifying careers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod commands;
pub mod constants;
pub mod data;
pub mod dice;
pub mod error;
pub mod generators;
pub mod live_game;
pub mod player;
pub mod policy;
pub mod ratings;
pub mod replay;
pub mod schedule;
pub mod school;
pub mod season;
pub mod session;
pub mod staff;
pub mod state;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commands::{create_career, DepthOrder, RecruitOutcome};
    pub use crate::data::CareerSetup;
    pub use crate::error::{GameError, PolicyViolation, Result};
    pub use crate::live_game::{ActiveGame, PlayCall, PlayCallModifier, Side};
    pub use crate::player::{InjuryStatus, Player, Position};
    pub use crate::ratings::TeamRatings;
    pub use crate::replay::{Recorder, Replay, ReplayPlayer};
    pub use crate::school::School;
    pub use crate::season::advance_week;
    pub use crate::session::{Career, CareerCommand, CommandOutcome};
    pub use crate::staff::{Staff, StaffRole};
    pub use crate::state::{CoachArchetype, CoachProfile, GameState, SeasonPhase};
}
