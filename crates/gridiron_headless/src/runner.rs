//! Headless career runner implementation.
//!
//! Reads JSON commands line by line, applies them to a recorded career and
//! writes one or more JSON responses per command. Input and output are
//! generic so the loop runs the same against stdin/stdout and in tests.

use std::io::{self, BufRead, Write};

use gridiron_core::data::CareerSetup;
use gridiron_core::error::Result as GameResult;
use gridiron_core::replay::Recorder;
use gridiron_core::session::{Career, CareerCommand, CommandOutcome};
use tracing::{debug, info, warn};

use crate::protocol::{CareerSummary, Command, ControlCommand, PlayerRow, Response};

/// Headless runner configuration.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Follow every career command with a state summary.
    pub auto_state_output: bool,
}

/// Headless runner for externally controlled careers.
#[derive(Debug)]
pub struct HeadlessRunner {
    config: HeadlessConfig,
    recorder: Recorder,
    quit: bool,
}

impl HeadlessRunner {
    /// Start a new career from `setup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening career cannot be snapshotted.
    pub fn new(setup: &CareerSetup, config: HeadlessConfig) -> GameResult<Self> {
        let recorder = Recorder::new(setup.seed, Career::new(setup))?;
        Ok(Self {
            config,
            recorder,
            quit: false,
        })
    }

    /// The career being played.
    #[must_use]
    pub const fn career(&self) -> &Career {
        self.recorder.career()
    }

    /// True once a `quit` command was handled.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// The greeting sent before any command is read.
    #[must_use]
    pub fn ready(&self) -> Response {
        Response::ready(self.career().step(), self.career().state_hash())
    }

    /// Parse and handle one input line.
    pub fn handle_line(&mut self, line: &str) -> Vec<Response> {
        match Command::from_json(line) {
            Ok(command) => self.handle(command),
            Err(e) => vec![Response::error(format!("Parse error: {e}"), None)],
        }
    }

    /// Handle one command.
    pub fn handle(&mut self, command: Command) -> Vec<Response> {
        match command {
            Command::Control(control) => vec![self.handle_control(control)],
            Command::Career(command) => self.handle_career(command),
        }
    }

    fn handle_career(&mut self, command: CareerCommand) -> Vec<Response> {
        let name = command.name();
        let mut responses = match self.recorder.apply(command) {
            Ok(CommandOutcome::Applied) => vec![Response::ack(name, self.career().step())],
            Ok(CommandOutcome::Recruit(outcome)) => vec![Response::Recruit {
                outcome,
                step: self.career().step(),
            }],
            Err(e) => {
                debug!(command = name, error = %e, "Command rejected");
                return vec![Response::error(e.to_string(), Some(name))];
            }
        };
        if self.config.auto_state_output {
            responses.push(self.summary());
        }
        responses
    }

    fn handle_control(&mut self, control: ControlCommand) -> Response {
        let state = self.career().state();
        match control {
            ControlCommand::Query => self.summary(),
            ControlCommand::Roster => Response::Roster {
                players: state.roster.iter().map(PlayerRow::from).collect(),
            },
            ControlCommand::Schedule => Response::Schedule {
                matchups: state.schedule.clone(),
            },
            ControlCommand::Prospects => Response::Prospects {
                prospects: state.recruitment_pool.iter().map(PlayerRow::from).collect(),
            },
            ControlCommand::Game => {
                let game = self.career().active_game().cloned();
                Response::Game {
                    available_calls: game
                        .as_ref()
                        .map(|g| g.available_play_calls())
                        .unwrap_or_default(),
                    game,
                }
            }
            ControlCommand::Hash => Response::StateHash {
                step: self.career().step(),
                hash: self.career().state_hash(),
            },
            ControlCommand::SaveReplay { path } => {
                let replay = self.recorder.snapshot();
                match replay.save(&path) {
                    Ok(()) => {
                        info!(%path, commands = replay.command_count(), "Replay saved");
                        Response::ReplaySaved {
                            path,
                            commands: replay.command_count(),
                        }
                    }
                    Err(e) => Response::error(e.to_string(), Some("save_replay")),
                }
            }
            ControlCommand::Quit => {
                self.quit = true;
                Response::Bye
            }
        }
    }

    fn summary(&self) -> Response {
        let career = self.career();
        Response::State(CareerSummary::of(
            career.state(),
            career.step(),
            career.state_hash(),
        ))
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        output.write_all(self.ready().to_json_line().as_bytes())?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            for response in self.handle_line(line) {
                output.write_all(response.to_json_line().as_bytes())?;
            }
            output.flush()?;
            if self.quit {
                return Ok(());
            }
        }

        warn!("Input closed without quit");
        Ok(())
    }

    /// Run against the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout fails.
    pub fn run_stdio(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }
}
