use crate::error::Result;
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository for the few lookups release-notes needs
pub struct LocalRepository {
    repo: Git2Repo,
}

impl LocalRepository {
    /// Open or discover a git repository
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(LocalRepository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        LocalRepository { repo }
    }

    /// URL of the named remote, or `None` if the remote does not exist
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Short name of the checked-out branch; `None` when HEAD is detached or unborn
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("HEAD is unborn");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(None);
        }

        Ok(head.shorthand().map(str::to_string))
    }

    /// `(owner, repo)` of the named remote when it points at GitHub
    pub fn github_remote(&self, remote: &str) -> Result<Option<(String, String)>> {
        Ok(self
            .remote_url(remote)?
            .and_then(|url| super::parse_github_remote(&url)))
    }
}
