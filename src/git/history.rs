use std::path::Path;

use chrono::DateTime;
use git2::{Repository, Sort};

use crate::error::{Error, Result};

/// One entry from the commit log, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub date: String,
    pub message: String,
}

impl CommitInfo {
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }
}

/// Discovers the repository containing `path`.
pub fn open_repo(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(|_| Error::Repository(path.display().to_string()))
}

/// Lists at most `limit` commits reachable from HEAD, newest first.
/// History is re-read on every call; nothing is cached.
pub fn list_recent_commits(repo: &Repository, limit: usize) -> Result<Vec<CommitInfo>> {
    let mut walk = repo.revwalk()?;
    walk.push_head()?;
    walk.set_sorting(Sort::TIME)?;

    let mut commits = Vec::new();
    for oid in walk.take(limit) {
        let commit = repo.find_commit(oid?)?;
        let date = DateTime::from_timestamp(commit.time().seconds(), 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        commits.push(CommitInfo {
            hash: commit.id().to_string(),
            date,
            message: commit.summary().unwrap_or("").to_string(),
        });
    }

    tracing::debug!("Listed {} commits", commits.len());
    Ok(commits)
}
