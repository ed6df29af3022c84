//! Replay system for recording and playing back careers.
//!
//! A replay stores the opening career snapshot and every command applied
//! after it. Because a [`Career`] owns its generator, feeding the same
//! commands to the same snapshot recreates the career exactly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GameError, Result};
use crate::session::{Career, CareerCommand};

/// A single command record for replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayCommand {
    /// Career step at which the command was applied.
    pub step: u64,
    /// The command.
    #[serde(with = "command_json")]
    pub command: CareerCommand,
}

/// Commands are stored as their JSON text; bincode cannot decode the
/// internally tagged [`CareerCommand`] directly.
mod command_json {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::session::CareerCommand;

    pub fn serialize<S: Serializer>(command: &CareerCommand, serializer: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(command).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CareerCommand, D::Error> {
        let text = String::deserialize(deserializer)?;
        serde_json::from_str(&text).map_err(D::Error::custom)
    }
}

/// Replay file format version for compatibility.
pub const REPLAY_VERSION: u32 = 2;

/// Complete replay data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    /// Replay format version.
    pub version: u32,
    /// Setup seed the career was created from.
    pub seed: u64,
    /// Serialized opening career.
    pub initial_state: Vec<u8>,
    /// Accepted commands in step order.
    pub commands: Vec<ReplayCommand>,
    /// Step count when recording stopped.
    pub final_step: u64,
    /// Career hash when recording stopped.
    pub final_hash: u64,
}

impl Replay {
    /// Start recording from a career's current snapshot.
    ///
    /// # Errors
    /// Returns an error if the career cannot be serialized.
    pub fn new(seed: u64, initial: &Career) -> Result<Self> {
        Ok(Self {
            version: REPLAY_VERSION,
            seed,
            initial_state: initial.serialize()?,
            commands: Vec::new(),
            final_step: initial.step(),
            final_hash: initial.state_hash(),
        })
    }

    /// Record an accepted command.
    pub fn record_command(&mut self, step: u64, command: CareerCommand) {
        self.commands.push(ReplayCommand { step, command });
    }

    /// Finalize the replay with the end state.
    pub fn finalize(&mut self, career: &Career) {
        self.final_step = career.step();
        self.final_hash = career.state_hash();
    }

    /// Save the replay to a file.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize replay: {e}")))?;
        std::fs::write(path.as_ref(), bytes)
            .map_err(|e| GameError::Io(format!("Failed to write replay file: {e}")))
    }

    /// Load a replay from a file.
    ///
    /// # Errors
    /// Returns an error if reading, decoding or the version check fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| GameError::Io(format!("Failed to read replay file: {e}")))?;
        let replay: Self = bincode::deserialize(&bytes)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize replay: {e}")))?;

        if replay.version != REPLAY_VERSION {
            return Err(GameError::ReplayVersion {
                expected: REPLAY_VERSION,
                found: replay.version,
            });
        }

        Ok(replay)
    }

    /// Restore the opening career.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be decoded.
    pub fn restore_initial_state(&self) -> Result<Career> {
        Career::deserialize(&self.initial_state)
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

/// Records a career as it is played.
#[derive(Debug)]
pub struct Recorder {
    career: Career,
    replay: Replay,
}

impl Recorder {
    /// Start recording `career` from its current snapshot.
    ///
    /// # Errors
    /// Returns an error if the career cannot be serialized.
    pub fn new(seed: u64, career: Career) -> Result<Self> {
        let replay = Replay::new(seed, &career)?;
        Ok(Self { career, replay })
    }

    /// Apply a command; accepted commands are recorded, rejected ones are not.
    ///
    /// # Errors
    /// Whatever [`Career::apply`] rejects.
    pub fn apply(&mut self, command: CareerCommand) -> Result<crate::session::CommandOutcome> {
        let step = self.career.step();
        let outcome = self.career.apply(command.clone())?;
        self.replay.record_command(step, command);
        Ok(outcome)
    }

    /// The career being recorded.
    #[must_use]
    pub const fn career(&self) -> &Career {
        &self.career
    }

    /// The replay so far, finalized at the current step. Recording continues.
    #[must_use]
    pub fn snapshot(&self) -> Replay {
        let mut replay = self.replay.clone();
        replay.finalize(&self.career);
        replay
    }

    /// Stop recording and return the career and its finalized replay.
    #[must_use]
    pub fn finish(mut self) -> (Career, Replay) {
        self.replay.finalize(&self.career);
        (self.career, self.replay)
    }
}

/// Replay playback controller.
#[derive(Debug)]
pub struct ReplayPlayer {
    replay: Replay,
    career: Career,
    command_index: usize,
}

impl ReplayPlayer {
    /// Create a new replay player from a replay.
    ///
    /// # Errors
    /// Returns an error if the initial state cannot be restored.
    pub fn new(replay: Replay) -> Result<Self> {
        let career = replay.restore_initial_state()?;
        Ok(Self {
            replay,
            career,
            command_index: 0,
        })
    }

    /// Apply the next recorded command.
    ///
    /// Returns true if there are more commands to play.
    ///
    /// # Errors
    /// Returns an error if the recorded command is rejected on playback,
    /// which means the replay does not match its snapshot.
    pub fn advance(&mut self) -> Result<bool> {
        if let Some(record) = self.replay.commands.get(self.command_index) {
            self.career.apply(record.command.clone())?;
            self.command_index += 1;
        }
        Ok(!self.is_finished())
    }

    /// Seek to a command index, replaying from the start.
    ///
    /// # Errors
    /// Returns an error if restoration or a replayed command fails.
    pub fn seek(&mut self, index: usize) -> Result<()> {
        self.career = self.replay.restore_initial_state()?;
        self.command_index = 0;
        let target = index.min(self.replay.commands.len());
        while self.command_index < target {
            self.advance()?;
        }
        Ok(())
    }

    /// Commands applied so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.command_index
    }

    /// The career at the current position.
    #[must_use]
    pub const fn career(&self) -> &Career {
        &self.career
    }

    /// The replay being played.
    #[must_use]
    pub const fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Check if every command has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.command_index >= self.replay.commands.len()
    }

    /// Play the whole replay and compare against the recorded final hash.
    ///
    /// # Errors
    /// Returns an error if restoration or a replayed command fails.
    pub fn verify(&mut self) -> Result<bool> {
        self.seek(self.replay.commands.len())?;
        Ok(self.career.state_hash() == self.replay.final_hash
            && self.career.step() == self.replay.final_step)
    }

    /// Progress as a percentage (0-100).
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.replay.commands.is_empty() {
            100.0
        } else {
            self.command_index as f64 / self.replay.commands.len() as f64 * 100.0
        }
    }
}
