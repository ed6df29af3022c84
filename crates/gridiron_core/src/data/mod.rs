//! Static data: name vocabularies and the RON career setup.
//!
//! **Note:** This module contains no IO - it only defines data types and
//! parses text handed to it. Reading files is left to the caller.

mod career_setup;
pub mod vocabulary;

pub use career_setup::{CareerSetup, RosterSlot};
