//! Find out which GitHub repository the git project belongs to
//!
//! We ask `git remote --verbose`. If it works, we get something like:
//!
//! ```text
//! origin	git@github.com:cassava/repoctl.git (fetch)
//! origin	git@github.com:cassava/repoctl.git (push)
//! ```
//!
//! Every line that mentions GitHub and has a URL in one of the formats of
//! [`URL_GRAMMAR`] becomes a candidate. Out of all candidates, exactly one
//! coordinate is picked.

use core::fmt;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::RelstatError;
use crate::git::RemoteLister;
use crate::types::RepoCoordinate;

/// Lines which do not contain this, in any case, are not GitHub remotes, and
/// are skipped silently
pub const HOST_MARKER: &str = "github";

/// When there are several GitHub remotes, the one with this name wins
pub const DEFAULT_REMOTE: &str = "origin";

/// Formats of remote URLs that we understand, tried in order.
///
/// Every pattern must capture `owner` and `name`, and only accept
/// `github.com` as the host.
pub const URL_GRAMMAR: &[(&str, &str)] = &[
    // git@github.com:cassava/repoctl.git
    (
        "scp-like ssh",
        r"^[\w.-]+@(?i:github\.com):(?P<owner>[^\s/]+)/(?P<name>[^\s/]+)\.git$",
    ),
    // ssh://git@github.com/cassava/repoctl.git
    (
        "ssh",
        r"^ssh://(?:[\w.-]+@)?(?i:github\.com)(?::\d+)?/(?P<owner>[^\s/]+)/(?P<name>[^\s/]+)\.git$",
    ),
    // https://github.com/cassava/repoctl.git
    (
        "http",
        r"^https?://(?:[^\s/@]+@)?(?i:github\.com)/(?P<owner>[^\s/]+)/(?P<name>[^\s/]+)\.git$",
    ),
    // git://github.com/cassava/repoctl.git
    (
        "git",
        r"^git://(?i:github\.com)/(?P<owner>[^\s/]+)/(?P<name>[^\s/]+)\.git$",
    ),
];

/// `<remote name><TAB><url> (<direction>)`, the direction being optional
static REMOTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<remote>[^\t]+)\t(?P<url>\S+)(?:\s+\([^)]*\))?\s*$")
        .expect("remote line pattern is valid")
});

/// Compiled [`URL_GRAMMAR`]
static URL_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    URL_GRAMMAR
        .iter()
        .map(|(format, pattern)| {
            let regex = Regex::new(pattern).expect("URL grammar patterns are valid");
            (*format, regex)
        })
        .collect()
});

/// A GitHub remote of the local repository
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct RemoteCandidate {
    /// e.g. `origin`
    pub remote_name: String,
    /// Repository that the remote points to
    pub coordinate: RepoCoordinate,
}

/// Something the user should know about, which did not stop us from
/// finding the repository
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Advisory {
    /// A line mentions GitHub, but the URL is in a format we don't understand
    UnrecognizedRemote {
        /// The offending line
        line: String,
    },
    /// Several GitHub remotes and none of them is [`DEFAULT_REMOTE`]
    AmbiguousRemote {
        /// Remote whose repository was used
        chosen: String,
        /// Names of all GitHub remotes, sorted
        candidates: Vec<String>,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedRemote { line } => {
                write!(f, "could not parse GitHub remote `{line}`, skipping")
            },
            Self::AmbiguousRemote { chosen, candidates } => write!(
                f,
                "found multiple GitHub remotes ({}) but none is named `{DEFAULT_REMOTE}`, using \
                 `{chosen}`",
                candidates.join(", ")
            ),
        }
    }
}

/// Result of resolving the repository, together with everything worth
/// warning about on the way
#[derive(Debug)]
pub struct Resolution {
    /// The repository, or why it could not be determined
    pub outcome: Result<RepoCoordinate, RelstatError>,
    /// Non-fatal problems, in the order they were found
    pub advisories: Vec<Advisory>,
}

impl Resolution {
    /// Log every advisory as a warning, then hand out the outcome
    pub fn finish(self) -> Result<RepoCoordinate, RelstatError> {
        for advisory in &self.advisories {
            log::warn!("{advisory}");
        }
        self.outcome
    }
}

/// What a single line of `git remote --verbose` turned out to be
#[derive(Debug, Eq, PartialEq)]
enum ParsedLine {
    /// Does not mention GitHub
    Unrelated,
    /// Mentions GitHub, but is not in any format of [`URL_GRAMMAR`]
    Unrecognized,
    Remote(RemoteCandidate),
}

/// Extract owner and name from the URL of a remote
pub fn parse_url(url: &str) -> Option<RepoCoordinate> {
    URL_PATTERNS.iter().find_map(|(format, pattern)| {
        let captures = pattern.captures(url)?;
        log::trace!("{url} is a {format} URL");
        RepoCoordinate::try_new(&captures["owner"], &captures["name"])
    })
}

fn parse_line(line: &str) -> ParsedLine {
    if !line.to_ascii_lowercase().contains(HOST_MARKER) {
        return ParsedLine::Unrelated;
    }

    let Some(captures) = REMOTE_LINE.captures(line) else {
        return ParsedLine::Unrecognized;
    };

    parse_url(&captures["url"]).map_or(ParsedLine::Unrecognized, |coordinate| {
        ParsedLine::Remote(RemoteCandidate {
            remote_name: captures["remote"].to_owned(),
            coordinate,
        })
    })
}

/// Pick exactly one repository out of the remotes
///
/// `candidates` is keyed by remote name, so among several remotes none of
/// which is [`DEFAULT_REMOTE`] the alphabetically first one wins.
fn choose(
    mut candidates: BTreeMap<String, RepoCoordinate>,
    advisories: &mut Vec<Advisory>,
) -> Result<RepoCoordinate, RelstatError> {
    if let Some(coordinate) = candidates.remove(DEFAULT_REMOTE) {
        log::trace!("using remote {DEFAULT_REMOTE}: {coordinate}");
        return Ok(coordinate);
    }

    let names: Vec<String> = candidates.keys().cloned().collect();

    let Some((chosen, coordinate)) = candidates.pop_first() else {
        return Err(RelstatError::NoRemoteFound);
    };

    if !candidates.is_empty() {
        advisories.push(Advisory::AmbiguousRemote {
            chosen: chosen.clone(),
            candidates: names,
        });
    }

    log::trace!("using remote {chosen}: {coordinate}");

    Ok(coordinate)
}

/// Resolve the repository from the output of `git remote --verbose`
pub fn resolve_remotes(output: &str) -> Resolution {
    let mut advisories = Vec::new();
    let mut candidates = BTreeMap::new();

    for line in output.lines() {
        match parse_line(line) {
            ParsedLine::Unrelated => {},
            ParsedLine::Unrecognized => advisories.push(Advisory::UnrecognizedRemote {
                line: line.to_owned(),
            }),
            // a remote is listed once for fetch and once for push, the last one wins
            ParsedLine::Remote(candidate) => {
                candidates.insert(candidate.remote_name, candidate.coordinate);
            },
        }
    }

    let outcome = choose(candidates, &mut advisories);

    Resolution {
        outcome,
        advisories,
    }
}

/// Determines the GitHub repository of a git project
#[derive(Debug, Default)]
pub struct RemoteResolver<L> {
    lister: L,
}

impl<L: RemoteLister> RemoteResolver<L> {
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    /// Resolve the repository of the git project in `dir`
    pub fn resolve(&self, dir: &Path) -> Resolution {
        match self.lister.list_remotes(dir) {
            Ok(output) => resolve_remotes(&output),
            Err(err) => Resolution {
                outcome: Err(RelstatError::Execution(err)),
                advisories: Vec::new(),
            },
        }
    }
}
