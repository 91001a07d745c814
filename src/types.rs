//! Coordinates of a repository on GitHub

use core::fmt;

use nutype::nutype;

/// Account or organization owning a repository, e.g. `helix-editor`
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, AsRef, Display)
)]
pub struct RepoOwner(String);

/// Name of a repository without the `.git` suffix, e.g. `helix`
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, AsRef, Display)
)]
pub struct RepoName(String);

/// Identifies a project on GitHub: `owner/name`
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct RepoCoordinate {
    /// e.g. `cassava`
    pub owner: RepoOwner,
    /// e.g. `repoctl`
    pub name: RepoName,
}

impl RepoCoordinate {
    /// Returns `None` if either part is blank
    pub fn try_new(owner: &str, name: &str) -> Option<Self> {
        Some(Self {
            owner: RepoOwner::try_new(owner).ok()?,
            name: RepoName::try_new(name).ok()?,
        })
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
