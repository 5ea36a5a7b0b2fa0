//! Git source fetching: clone and hard-reset to a pinned commit.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, ResetType};

/// Clone `url` into `dest` and check out the pinned commit.
pub fn fetch_git(url: &str, commit: &str, dest: &Path) -> Result<()> {
    tracing::info!(
        "Fetching git source from {} at {}",
        url,
        commit.get(..8).unwrap_or(commit)
    );

    let repo = Repository::clone(url, dest).with_context(|| format!("failed to clone {}", url))?;

    let oid = git2::Oid::from_str(commit)
        .with_context(|| format!("invalid commit hash `{}`", commit))?;
    let object = repo
        .find_commit(oid)
        .with_context(|| format!("commit {} not found in {}", commit, url))?;
    repo.reset(object.as_object(), ResetType::Hard, None)
        .with_context(|| format!("failed to check out {} in {}", commit, url))?;

    Ok(())
}
