//! GitHub API

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::RelstatError;
use crate::report::Report;
use crate::types::RepoCoordinate;
use crate::utils::{github_token, make_request};

/// A release, as returned by GitHub's releases endpoint. Does not contain all fields.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Release {
    /// e.g. `v1.0`
    #[serde(rename = "tag_name")]
    pub tag: String,
    /// Title of the release, may be empty
    #[serde(rename = "name", default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// Files attached to the release
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A file attached to a [`Release`]
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Asset {
    /// e.g. `repoctl-0.21-x86_64.tar.gz`
    pub name: String,
    /// How often the asset was downloaded
    pub download_count: u64,
}

/// GitHub sends `"name": null` for releases without a title
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Release {
    /// The endpoint which returns a list of [`Release`]s
    pub fn endpoint(coordinate: &RepoCoordinate) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/releases",
            coordinate.owner, coordinate.name
        )
    }
}

/// Something that can GET a URL of GitHub's API
pub trait GitHubClient {
    /// Body of the response, which must have a success status
    fn get(&self, url: &str) -> anyhow::Result<String>;
}

/// Talks to the real GitHub API over HTTPS
#[derive(Debug)]
pub struct GitHubApi {
    client: Client,
    token: Option<String>,
}

impl GitHubApi {
    /// Client that authenticates with `GITHUB_TOKEN` when it is set
    pub fn new() -> Result<Self, RelstatError> {
        let client = Client::builder()
            .build()
            .map_err(|err| RelstatError::Network(err.into()))?;

        Ok(Self {
            client,
            token: github_token(),
        })
    }
}

impl GitHubClient for GitHubApi {
    fn get(&self, url: &str) -> anyhow::Result<String> {
        log::trace!("making a request to {url}");
        make_request(&self.client, url, self.token.as_deref())
    }
}

/// Fetch all releases of the repository at `coordinate`, in the order GitHub lists them
pub fn fetch_releases(
    client: &impl GitHubClient,
    coordinate: RepoCoordinate,
) -> Result<Report, RelstatError> {
    let url = Release::endpoint(&coordinate);

    let response = client.get(&url).map_err(|err| {
        RelstatError::Network(err.context(format!("failed to fetch releases of {coordinate}")))
    })?;

    let releases = serde_json::from_str::<Vec<Release>>(&response).map_err(RelstatError::Decode)?;

    log::trace!("{coordinate} has {} releases", releases.len());

    Ok(Report {
        coordinate,
        releases,
    })
}
