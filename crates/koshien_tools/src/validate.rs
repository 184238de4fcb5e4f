//! Data validation utilities.
//!
//! Checks a directory of team files before they are handed to the match
//! engine: every `*.ron` file must parse as a
//! [`TeamSnapshot`](koshien_core::roster::TeamSnapshot) and pass
//! validation.

use std::path::{Path, PathBuf};

use koshien_core::error::MatchError;
use koshien_core::roster::TeamSnapshot;
use thiserror::Error;

/// Error type for validation runs.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// Directory or file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A team file failed to parse or validate.
    #[error("{0}")]
    Data(#[from] MatchError),
    /// The directory held no team files.
    #[error("No .ron files found in '{0}'")]
    Empty(PathBuf),
}

/// Parse and validate a single team file.
pub fn validate_team_file(path: &Path) -> Result<TeamSnapshot, ValidateError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let team: TeamSnapshot =
        ron::from_str(&contents).map_err(|e| MatchError::DataParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    team.validate()?;
    Ok(team)
}

/// Validate all RON team files in a directory.
///
/// Files are checked in name order; the first failure stops the run.
/// Returns the number of files validated.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, holds no team files,
/// or any team file fails validation.
pub fn validate_data_directory(path: &Path) -> Result<usize, ValidateError> {
    let io = |source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .map_err(io)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ValidateError::Empty(path.to_path_buf()));
    }

    for file in &files {
        let team = validate_team_file(file)?;
        tracing::info!(
            file = %file.display(),
            team = %team.name,
            players = team.players.len(),
            "Team valid"
        );
    }

    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use koshien_test_utils::fixtures::standard_team;

    fn write_team(dir: &Path, file: &str, team: &TeamSnapshot) {
        let ron = ron::ser::to_string_pretty(team, ron::ser::PrettyConfig::default()).unwrap();
        std::fs::write(dir.join(file), ron).unwrap();
    }

    #[test]
    fn test_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_team(dir.path(), "seiryo.ron", &standard_team("Seiryo", "s"));
        write_team(dir.path(), "meikun.ron", &standard_team("Meikun", "m"));
        std::fs::write(dir.path().join("notes.txt"), "not a team").unwrap();

        assert_eq!(validate_data_directory(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_invalid_team_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut team = standard_team("Broken", "b");
        team.starting_pitcher = team.players[4].id.clone();
        write_team(dir.path(), "broken.ron", &team);

        assert!(matches!(
            validate_data_directory(dir.path()),
            Err(ValidateError::Data(MatchError::RosterInvalid { .. }))
        ));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.ron"), "TeamSnapshot(name: 3)").unwrap();

        match validate_data_directory(dir.path()) {
            Err(ValidateError::Data(MatchError::DataParseError { path, .. })) => {
                assert!(path.ends_with("bad.ron"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_data_directory(dir.path()),
            Err(ValidateError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        assert!(matches!(
            validate_data_directory(Path::new("/no/such/dir")),
            Err(ValidateError::Io { .. })
        ));
    }
}
