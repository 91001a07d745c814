//! Utilities for interacting with Git via spawning processes

use std::io;
use std::path::Path;
use std::process::{self, Output};

use anyhow::Result;

/// Spawn a git process and collect its output
pub fn spawn_git(args: &[&str], git_dir: &Path) -> Result<Output, io::Error> {
    process::Command::new("git")
        .args(args)
        .current_dir(git_dir)
        .output()
}

/// Get output of the git process
pub fn get_git_output(output: &Output, args: &[&str]) -> Result<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_owned())
    } else {
        Err(anyhow::anyhow!(
            "Git command failed.\nCommand: git {}\nStdout: {}\nStderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Run `git` with the given arguments in `git_dir`, and get its output
pub fn git<const N: usize>(args: [&str; N], git_dir: &Path) -> Result<String> {
    log::trace!("$ git {}", args.join(" "));
    let output = spawn_git(&args, git_dir)
        .map_err(|err| anyhow::anyhow!("Failed to spawn `git {}`: {err}", args.join(" ")))?;
    get_git_output(&output, &args)
}

/// Something that can list the remotes of a repository,
/// one `<name>\t<url> (<direction>)` entry per line
pub trait RemoteLister {
    /// Output of `git remote --verbose`, executed in `dir`
    fn list_remotes(&self, dir: &Path) -> Result<String>;
}

/// Lists remotes with the `git` executable
#[derive(Debug, Default, Clone, Copy)]
pub struct Git;

impl RemoteLister for Git {
    fn list_remotes(&self, dir: &Path) -> Result<String> {
        git(["remote", "--verbose"], dir)
    }
}
