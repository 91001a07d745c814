//! Show the GitHub releases of the git project in the current directory,
//! and how often each of their assets was downloaded.
use core::fmt;
use std::io;

use cli::CliParseError;

pub mod cli;
pub mod commands;
pub mod git;
pub mod github;
pub mod remote;
pub mod report;
pub mod types;
pub mod utils;

/// Represents errors that stop relstat
#[derive(Debug)]
pub enum RelstatError {
    CliParseError(CliParseError),
    /// Could not determine the directory we are running in
    CurrentDir(io::Error),
    /// Could not run `git remote`, e.g. because we are not in a git repository
    Execution(anyhow::Error),
    /// None of the remotes points to GitHub
    NoRemoteFound,
    /// Could not get the releases from GitHub
    Network(anyhow::Error),
    /// GitHub answered with something that is not a list of releases
    Decode(serde_json::Error),
    /// Could not write the report
    Output(io::Error),
}

impl fmt::Display for RelstatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelstatError::CliParseError(err) => write!(f, "{err}"),
            RelstatError::CurrentDir(err) => {
                write!(f, "could not determine the current directory: {err}")
            },
            RelstatError::Execution(err) => {
                write!(f, "could not list the remotes of the git repository: {err:#}")
            },
            RelstatError::NoRemoteFound => write!(
                f,
                "could not find a GitHub remote, expected a remote URL such as \
                 git@github.com:owner/repo.git or https://github.com/owner/repo.git"
            ),
            RelstatError::Network(err) => write!(f, "{err:#}"),
            RelstatError::Decode(err) => write!(f, "could not parse releases from GitHub: {err}"),
            RelstatError::Output(err) => write!(f, "could not write output: {err}"),
        }
    }
}

impl std::error::Error for RelstatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelstatError::CliParseError(err) => Some(err),
            RelstatError::Execution(err) | RelstatError::Network(err) => Some(&**err),
            RelstatError::NoRemoteFound => None,
            RelstatError::Decode(err) => Some(err),
            RelstatError::CurrentDir(err) | RelstatError::Output(err) => Some(err),
        }
    }
}

pub const APP_NAME: &str = "relstat";

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn current_dir_failure_does_not_mention_git() {
        let err = RelstatError::CurrentDir(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        ));

        assert_eq!(
            err.to_string(),
            "could not determine the current directory: No such file or directory"
        );
        assert!(err.source().is_some(), "the io error is the source");
    }
}
