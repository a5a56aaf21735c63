use crate::domain::Commit;
use crate::error::{ReleaseNotesError, Result};
use crate::github::GithubApi;
use crate::release::ReleasePayload;
use std::cell::RefCell;

/// In-memory GitHub for testing without network access
pub struct MockGithub {
    login: Option<String>,
    releases: Vec<(String, String)>,
    commits: Vec<Commit>,
    requested_ranges: RefCell<Vec<(Option<String>, String)>>,
    created: RefCell<Vec<ReleasePayload>>,
}

impl MockGithub {
    /// Create a mock with a valid token and no releases or commits
    pub fn new() -> Self {
        MockGithub {
            login: Some("octocat".to_string()),
            releases: Vec::new(),
            commits: Vec::new(),
            requested_ranges: RefCell::new(Vec::new()),
            created: RefCell::new(Vec::new()),
        }
    }

    /// Make token verification fail
    pub fn with_bad_credentials(mut self) -> Self {
        self.login = None;
        self
    }

    /// Add an existing release, newest first
    pub fn add_release(&mut self, tag_name: impl Into<String>, target_commitish: impl Into<String>) {
        self.releases.push((tag_name.into(), target_commitish.into()));
    }

    /// Add a commit returned by every range query
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// `(start, end)` of every `commits_in_range` call so far
    pub fn requested_ranges(&self) -> Vec<(Option<String>, String)> {
        self.requested_ranges.borrow().clone()
    }

    /// Payloads submitted through `create_release`
    pub fn created_releases(&self) -> Vec<ReleasePayload> {
        self.created.borrow().clone()
    }
}

impl Default for MockGithub {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubApi for MockGithub {
    fn verify_token(&self) -> Result<String> {
        self.login
            .clone()
            .ok_or(ReleaseNotesError::BadCredentials)
    }

    fn latest_release_tag_name(&self, branch: Option<&str>) -> Result<Option<String>> {
        Ok(self
            .releases
            .iter()
            .find(|(_, target)| branch.map_or(true, |b| target == b))
            .map(|(tag, _)| tag.clone()))
    }

    fn commits_in_range(&self, start: Option<&str>, end: &str) -> Result<Vec<Commit>> {
        self.requested_ranges
            .borrow_mut()
            .push((start.map(str::to_string), end.to_string()));
        Ok(self.commits.clone())
    }

    fn create_release(&self, payload: &ReleasePayload) -> Result<String> {
        self.created.borrow_mut().push(payload.clone());
        Ok(format!(
            "https://github.com/mock/repo/releases/tag/{}",
            payload.tag_name
        ))
    }
}
