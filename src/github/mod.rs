//! GitHub REST API access
//!
//! The [GithubApi] trait lists the operations a release build needs. Two
//! implementations exist:
//!
//! - [client::GithubClient]: blocking HTTP client against a GitHub (or GitHub Enterprise) API
//! - [mock::MockGithub]: in-memory implementation for tests

pub mod client;
pub mod mock;

pub use client::GithubClient;
pub use mock::MockGithub;

use crate::domain::Commit;
use crate::error::Result;
use crate::release::ReleasePayload;

/// Repository-scoped GitHub operations
pub trait GithubApi {
    /// Check that the access token is accepted.
    ///
    /// # Returns
    /// * `Ok(login)` - Login of the authenticated user
    /// * `Err` - "Bad credentials" or a transport error
    fn verify_token(&self) -> Result<String>;

    /// Tag name of the most recent release.
    ///
    /// # Arguments
    /// * `branch` - Only consider releases targeting this branch; `None` considers all releases
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - Tag of the newest matching release
    /// * `Ok(None)` - No matching release exists
    fn latest_release_tag_name(&self, branch: Option<&str>) -> Result<Option<String>>;

    /// Commits after `start` up to and including `end`.
    ///
    /// With no `start`, every ancestor of `end` is returned.
    fn commits_in_range(&self, start: Option<&str>, end: &str) -> Result<Vec<Commit>>;

    /// Submit a release, returning its web URL
    fn create_release(&self, payload: &ReleasePayload) -> Result<String>;
}

impl<T: GithubApi + ?Sized> GithubApi for &T {
    fn verify_token(&self) -> Result<String> {
        (**self).verify_token()
    }

    fn latest_release_tag_name(&self, branch: Option<&str>) -> Result<Option<String>> {
        (**self).latest_release_tag_name(branch)
    }

    fn commits_in_range(&self, start: Option<&str>, end: &str) -> Result<Vec<Commit>> {
        (**self).commits_in_range(start, end)
    }

    fn create_release(&self, payload: &ReleasePayload) -> Result<String> {
        (**self).create_release(payload)
    }
}
