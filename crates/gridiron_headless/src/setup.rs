//! Career setup files for headless runs.
//!
//! Setups are RON files holding a [`CareerSetup`]. Every field except the
//! coach has a default, so a minimal file is just the coach profile.

use std::path::Path;

use gridiron_core::data::CareerSetup;
use thiserror::Error;

/// Error type for setup loading.
#[derive(Error, Debug)]
pub enum SetupError {
    /// File not found.
    #[error("Setup file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read setup file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse setup: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The setup parsed but cannot start a career.
    #[error("Invalid setup: {0}")]
    Invalid(String),
}

/// Load and validate a setup from a RON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, malformed or
/// describes an unplayable career.
pub fn load_setup<P: AsRef<Path>>(path: P) -> Result<CareerSetup, SetupError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SetupError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    parse_setup(&contents)
}

/// Parse and validate a setup from RON text.
///
/// # Errors
///
/// Returns an error if the text is malformed or describes an unplayable
/// career.
pub fn parse_setup(ron_text: &str) -> Result<CareerSetup, SetupError> {
    let setup: CareerSetup = ron::from_str(ron_text)?;
    setup
        .validate()
        .map_err(|e| SetupError::Invalid(e.to_string()))?;
    Ok(setup)
}

/// Setup from an optional file, falling back to the default with `seed`.
///
/// # Errors
///
/// Whatever [`load_setup`] returns for the file.
pub fn setup_or_default(path: Option<&Path>, seed: Option<u64>) -> Result<CareerSetup, SetupError> {
    let setup = match path {
        Some(path) => load_setup(path)?,
        None => CareerSetup::default(),
    };
    Ok(match seed {
        Some(seed) => setup.with_seed(seed),
        None => setup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_core::state::CoachArchetype;
    use std::io::Write;

    const MINIMAL: &str = r#"(
        coach: (name: "Eric Taylor", appearance: "suit", archetype: Motivator),
    )"#;

    #[test]
    fn test_minimal_setup_uses_defaults() {
        let setup = parse_setup(MINIMAL).unwrap();
        assert_eq!(setup.coach.archetype, CoachArchetype::Motivator);
        assert_eq!(setup.team_name, "East High Eagles");
        assert_eq!(setup.start_year, 2024);
        assert_eq!(setup.league_size, 9);
        assert_eq!(setup.roster_size(), 51);
    }

    #[test]
    fn test_full_setup() {
        let text = r#"(
            coach: (name: "Eric Taylor", appearance: "suit", archetype: Tactician),
            team_name: "Dillon Panthers",
            seed: 42,
            start_year: 2030,
            league_size: 4,
            scouting_points: 3,
            roster: [(position: QB, count: 2), (position: K, count: 1)],
        )"#;
        let setup = parse_setup(text).unwrap();
        assert_eq!(setup.seed, 42);
        assert_eq!(setup.roster_size(), 3);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        let text = r#"(
            coach: (name: "Eric Taylor", appearance: "suit", archetype: Tactician),
            league_size: 0,
        )"#;
        assert!(matches!(parse_setup(text), Err(SetupError::Invalid(_))));
    }

    #[test]
    fn test_malformed_setup_rejected() {
        assert!(matches!(parse_setup("(coach: 5)"), Err(SetupError::ParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let setup = load_setup(file.path()).unwrap();
        assert_eq!(setup.coach.name, "Eric Taylor");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_setup("/nonexistent/setup.ron"),
            Err(SetupError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_default_with_seed() {
        let setup = setup_or_default(None, Some(7)).unwrap();
        assert_eq!(setup.seed, 7);
    }
}
