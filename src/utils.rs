//! Utilities for relstat

use std::env;

use anyhow::{Context as _, anyhow};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::APP_NAME;

/// Environment variable holding a GitHub token, used when set
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Send a GET request to the specified URL
///
/// Return the result as text
pub fn make_request(client: &Client, url: &str, token: Option<&str>) -> anyhow::Result<String> {
    let mut request = client
        .get(url)
        .header(USER_AGENT, APP_NAME)
        .header(ACCEPT, "application/vnd.github+json");

    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    match request.send() {
        Ok(res) if res.status().is_success() => res
            .text()
            .with_context(|| format!("Failed to read response from {url}")),
        Ok(res) => {
            let status = res.status();
            let text = res.text()?;

            Err(anyhow!(
                "Request failed with status: {status}\nRequested URL: {url}\nResponse: {text}",
            ))
        },
        Err(err) => Err(anyhow!("Error sending request: {err}")),
    }
}

/// GitHub token from the environment, if any
pub fn github_token() -> Option<String> {
    env::var(GITHUB_TOKEN_VAR)
        .ok()
        .filter(|token| !token.trim().is_empty())
}
