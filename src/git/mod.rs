//! Local git repository inspection
//!
//! Only used to fill in defaults: the GitHub owner and repository name come
//! from the `origin` remote, the target branch from the checked-out branch.

pub mod repository;

pub use repository::LocalRepository;

/// Split a GitHub remote URL into `(owner, repo)`.
///
/// Accepts the SSH form (`git@github.com:owner/repo.git`), the `ssh://` form
/// and HTTPS URLs, on any host so GitHub Enterprise remotes work too.
pub fn parse_github_remote(url: &str) -> Option<(String, String)> {
    let url = url.trim();

    let path = if let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("ssh://"))
    {
        // host[:port]/owner/repo, possibly with user@ in front of the host
        rest.split_once('/')?.1
    } else if let Some((user_host, rest)) = url.split_once(':') {
        if !user_host.contains('@') {
            return None;
        }
        rest
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, repo) = path.split_once('/')?;

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}
