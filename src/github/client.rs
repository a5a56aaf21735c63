use crate::domain::Commit;
use crate::error::{ReleaseNotesError, Result};
use crate::github::GithubApi;
use crate::release::ReleasePayload;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    #[serde(default)]
    target_commitish: String,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
struct CreatedRelease {
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking GitHub client bound to one repository
pub struct GithubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GithubClient {
    /// Create a client for `owner/repo`
    ///
    /// # Arguments
    /// * `api_url` - API root; `None` uses [DEFAULT_API_URL]
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `token` - Access token sent with every request
    pub fn new(
        api_url: Option<&str>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubClient {
            http,
            api_url: api_url
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        })
    }

    /// Create a client and fail early if the token is rejected
    pub fn create_with_token(
        api_url: Option<&str>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = GithubClient::new(api_url, owner, repo, token)?;
        let login = client.verify_token()?;
        info!(%login, "authenticated with GitHub");
        Ok(client)
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!(%url, ?query, "GET");
        let response = self.authorized(self.http.get(url)).query(query).send()?;
        Ok(check_status(response)?.json()?)
    }

    /// Fetch up to [MAX_PAGES] pages of a listing, stopping early when
    /// `extract` reports a short page or `done` is satisfied.
    fn paginate<P, T>(
        &self,
        url: &str,
        query: &[(&str, String)],
        mut extract: impl FnMut(P) -> Vec<T>,
        mut done: impl FnMut(&[T]) -> bool,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned,
    {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let mut params = query.to_vec();
            params.push(("per_page", PER_PAGE.to_string()));
            params.push(("page", page.to_string()));

            let batch = extract(self.get_json::<P>(url, &params)?);
            let short = batch.len() < PER_PAGE;
            items.extend(batch);

            if short || done(&items) {
                return Ok(items);
            }
        }

        debug!(%url, pages = MAX_PAGES, "stopped paginating at page limit");
        Ok(items)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(ReleaseNotesError::BadCredentials);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.message)
        .unwrap_or_else(|_| "no details".to_string());
    Err(ReleaseNotesError::github(format!("{}: {}", status, message)))
}

fn matches_branch(release: &ReleaseResponse, branch: Option<&str>) -> bool {
    branch.map_or(true, |b| release.target_commitish == b)
}

impl GithubApi for GithubClient {
    fn verify_token(&self) -> Result<String> {
        let user: UserResponse = self.get_json(&format!("{}/user", self.api_url), &[])?;
        Ok(user.login)
    }

    fn latest_release_tag_name(&self, branch: Option<&str>) -> Result<Option<String>> {
        let releases = self.paginate(
            &self.repo_url("releases"),
            &[],
            |page: Vec<ReleaseResponse>| page,
            |seen| seen.iter().any(|r| matches_branch(r, branch)),
        )?;

        Ok(releases
            .into_iter()
            .find(|r| matches_branch(r, branch))
            .map(|r| r.tag_name))
    }

    fn commits_in_range(&self, start: Option<&str>, end: &str) -> Result<Vec<Commit>> {
        let commits = match start {
            Some(start) => self.paginate(
                &self.repo_url(&format!("compare/{}...{}", start, end)),
                &[],
                |page: CompareResponse| page.commits,
                |_| false,
            )?,
            None => self.paginate(
                &self.repo_url("commits"),
                &[("sha", end.to_string())],
                |page: Vec<Commit>| page,
                |_| false,
            )?,
        };

        debug!(count = commits.len(), ?start, end, "fetched commits");
        Ok(commits)
    }

    fn create_release(&self, payload: &ReleasePayload) -> Result<String> {
        let url = self.repo_url("releases");
        debug!(%url, tag = %payload.tag_name, "POST");

        let response = self.authorized(self.http.post(&url)).json(payload).send()?;
        let created: CreatedRelease = check_status(response)?.json()?;
        Ok(created.html_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: Option<&str>) -> GithubClient {
        GithubClient::new(api_url, "octo", "widgets", "secret").unwrap()
    }

    #[test]
    fn test_repo_url_default_api() {
        assert_eq!(
            client(None).repo_url("releases"),
            "https://api.github.com/repos/octo/widgets/releases"
        );
    }

    #[test]
    fn test_repo_url_enterprise_api() {
        assert_eq!(
            client(Some("https://github.example.com/api/v3/")).repo_url("commits"),
            "https://github.example.com/api/v3/repos/octo/widgets/commits"
        );
    }

    #[test]
    fn test_matches_branch() {
        let release = ReleaseResponse {
            tag_name: "v1.0.0".to_string(),
            target_commitish: "main".to_string(),
        };
        assert!(matches_branch(&release, None));
        assert!(matches_branch(&release, Some("main")));
        assert!(!matches_branch(&release, Some("develop")));
    }

    #[test]
    fn test_compare_response_parsing() {
        let json = r#"{
            "total_commits": 1,
            "commits": [
                {"sha": "abc", "parents": [{"sha": "p1"}, {"sha": "p2"}],
                 "commit": {"message": "Merge pull request #3 from a/b\n\nThing"}}
            ]
        }"#;
        let compare: CompareResponse = serde_json::from_str(json).unwrap();
        assert_eq!(compare.commits.len(), 1);
        assert!(compare.commits[0].is_merge());
    }
}
