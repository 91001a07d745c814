//! Default command: print the releases of the current repository

use std::io::Write;
use std::path::Path;

use crate::RelstatError;
use crate::git::RemoteLister;
use crate::github::{GitHubClient, fetch_releases};
use crate::remote::RemoteResolver;
use crate::report::{ColorMode, render};

/// Find the GitHub repository of the git project in `dir`, fetch its
/// releases and write them to `out`
pub fn releases(
    dir: &Path,
    lister: impl RemoteLister,
    client: &impl GitHubClient,
    color: ColorMode,
    out: &mut impl Write,
) -> Result<(), RelstatError> {
    let coordinate = RemoteResolver::new(lister).resolve(dir).finish()?;

    log::trace!("fetching releases of {coordinate}");

    let report = fetch_releases(client, coordinate)?;

    render(&report, color, out)
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Remotes(&'static str);

    impl RemoteLister for Remotes {
        fn list_remotes(&self, _dir: &Path) -> anyhow::Result<String> {
            Ok(self.0.to_owned())
        }
    }

    struct Api(&'static str);

    impl GitHubClient for Api {
        fn get(&self, url: &str) -> anyhow::Result<String> {
            if url == "https://api.github.com/repos/cassava/repoctl/releases" {
                Ok(self.0.to_owned())
            } else {
                Err(anyhow!("404 Not Found: {url}"))
            }
        }
    }

    const REMOTES: &str = "origin\tgit@github.com:cassava/repoctl.git (fetch)\n\
                           origin\tgit@github.com:cassava/repoctl.git (push)";

    fn run(remotes: &'static str, response: &'static str) -> Result<String, RelstatError> {
        let mut out = Vec::new();
        releases(
            Path::new("."),
            Remotes(remotes),
            &Api(response),
            ColorMode::Never,
            &mut out,
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn end_to_end() {
        let output = run(
            REMOTES,
            r#"[{"tag_name":"v1.0","name":"First","assets":[{"name":"bin.tar.gz","download_count":42}]}]"#,
        )
        .unwrap();

        assert_eq!(
            output,
            "GitHub cassava/repoctl\nv1.0: (First)\n\tbin.tar.gz: 42\n"
        );
    }

    #[test]
    fn no_releases() {
        assert_eq!(run(REMOTES, "[]").unwrap(), "GitHub cassava/repoctl\n");
    }

    #[test]
    fn stops_at_first_failure() {
        let result = run("origin\tgit@gitlab.com:cassava/repoctl.git (fetch)", "[]");
        assert!(matches!(result, Err(RelstatError::NoRemoteFound)), "{result:?}");

        let result = run("origin\tgit@github.com:someone/else.git (fetch)", "[]");
        assert!(matches!(result, Err(RelstatError::Network(_))), "{result:?}");

        let result = run(REMOTES, r#"{"message":"API rate limit exceeded"}"#);
        assert!(matches!(result, Err(RelstatError::Decode(_))), "{result:?}");
    }
}
