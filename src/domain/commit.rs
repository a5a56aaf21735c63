use serde::{Deserialize, Serialize};

/// A commit as returned by the GitHub REST API.
///
/// Only the fields needed for release notes are kept:
/// `{ "sha": ..., "parents": [{ "sha": ... }], "commit": { "message": ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParentRef {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
}

impl Commit {
    /// Create a commit from its sha, parent shas, and message
    pub fn new<S: Into<String>>(
        sha: impl Into<String>,
        parents: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        Commit {
            sha: sha.into(),
            parents: parents
                .into_iter()
                .map(|p| ParentRef { sha: p.into() })
                .collect(),
            commit: CommitDetail {
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.commit.message
    }

    /// Parent shas in the order git recorded them
    pub fn parent_shas(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|p| p.sha.as_str())
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
