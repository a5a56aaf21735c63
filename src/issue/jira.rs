use super::IssueTracker;
use crate::error::{ReleaseNotesError, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct IssueResponse {
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    issuetype: IssueTypeField,
}

#[derive(Debug, Deserialize)]
struct IssueTypeField {
    name: String,
}

/// Jira REST client resolving issue keys to their issue type name
pub struct JiraClient {
    http: Client,
    base_url: String,
    username: Option<String>,
    token: Option<String>,
}

impl JiraClient {
    /// # Arguments
    /// * `base_url` - Jira server root, e.g. `https://example.atlassian.net`
    /// * `username` - Account for basic authentication, if any
    /// * `token` - API token or password for basic authentication
    pub fn new(
        base_url: impl Into<String>,
        username: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(JiraClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username,
            token,
        })
    }

    fn issue_url(&self, key: &str) -> String {
        format!("{}/rest/api/2/issue/{}?fields=issuetype", self.base_url, key)
    }
}

impl IssueTracker for JiraClient {
    fn issue_type(&self, key: &str) -> Result<Option<String>> {
        let url = self.issue_url(key);
        debug!(%url, "fetching issue");

        let mut request = self.http.get(&url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.token.as_deref());
        }

        let response = request.send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ReleaseNotesError::issue_tracker(format!(
                "Jira returned {} for issue {}",
                status, key
            )));
        }

        let issue: IssueResponse = response.json()?;
        Ok(Some(issue.fields.issuetype.name))
    }
}
