//! Headless career runner for scripted play and CI verification.
//!
//! This crate drives the career engine without a user interface. It can be
//! controlled via JSON commands on stdin, with responses on stdout, or it
//! can play whole careers on its own. This enables:
//!
//! - **Scripted play**: an external agent coaches a career over the protocol
//! - **Balance runs**: many strategy-driven careers in parallel
//! - **CI verification**: determinism checks and replay verification
//!
//! # Protocol
//!
//! Communication uses JSON lines (one JSON object per line):
//!
//! - **stdin**: Commands from the controller (advance_week, start_game, ...)
//! - **stdout**: Responses and views (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! See the [`protocol`] module for the command and response formats.
//!
//! # Example
//!
//! ```bash
//! # Run interactively
//! echo '{"cmd":"advance_week"}' | cargo run -p gridiron_headless -- run
//!
//! # Play 200 three-year careers with the gunslinger strategy
//! cargo run -p gridiron_headless -- batch --count 200 --years 3 --strategy gunslinger
//!
//! # Verify a replay
//! cargo run -p gridiron_headless -- replay --file career.replay
//! ```

pub mod batch;
pub mod metrics;
pub mod protocol;
pub mod runner;
pub mod setup;
pub mod strategies;

pub use batch::{play_career, run_batch, BatchConfig, BatchResults, CareerRun};
pub use metrics::{BatchSummary, CareerMetrics};
pub use protocol::{Command, Response};
pub use runner::{HeadlessConfig, HeadlessRunner};
pub use setup::{load_setup, SetupError};
pub use strategies::{Strategy, StrategyError};
