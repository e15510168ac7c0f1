use std::fs;
use std::path::{Path, PathBuf};

pub mod overrides;

use crate::model::thresholds::{ProfileError, ScoringProfile};
use crate::rules::units::check_units;
use overrides::UserOverrides;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("failed to parse overrides {path}: {source}")]
    Overrides {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Profile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid profile {path}: {source}")]
    InvalidProfile {
        path: PathBuf,
        #[source]
        source: ProfileError,
    },
}

fn read_to_string(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one or more text files and joins them as pages, separated by a
/// form feed.
pub fn load_report_text(paths: &[PathBuf]) -> Result<String, InputError> {
    if paths.is_empty() {
        return Err(InputError::MissingInput("no --input text given".to_string()));
    }
    let mut pages = Vec::with_capacity(paths.len());
    for path in paths {
        let page = read_to_string(path)?;
        tracing::info!(path = %path.display(), bytes = page.len(), "loaded report page");
        pages.push(page);
    }
    Ok(pages.join("\n\u{0c}\n"))
}

pub fn load_overrides(path: &Path) -> Result<UserOverrides, InputError> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| InputError::Overrides {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_profile(contents: &str) -> Result<ScoringProfile, toml::de::Error> {
    toml::from_str::<ScoringProfile>(contents)
}

/// Default profile when no path is given; otherwise the file's keys laid
/// over the defaults, then validated.
pub fn load_profile(path: Option<&Path>) -> Result<ScoringProfile, InputError> {
    let Some(path) = path else {
        return Ok(ScoringProfile::default_v1());
    };
    let contents = read_to_string(path)?;
    let profile = parse_profile(&contents).map_err(|source| InputError::Profile {
        path: path.to_path_buf(),
        source,
    })?;
    profile
        .validate()
        .and_then(|()| check_units(&profile.units))
        .map_err(|source| InputError::InvalidProfile {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "loaded scoring profile");
    Ok(profile)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
