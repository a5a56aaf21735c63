use crate::domain::ChangeList;
use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Body of a GitHub "create release" request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub prerelease: bool,
    pub draft: bool,
    pub target_commitish: String,
}

/// A release being prepared.
///
/// Built once per run and edited in place by the interactive menu until it is
/// submitted or abandoned.
#[derive(Debug)]
pub struct Release {
    /// Changes made since the previous release
    pub changes: ChangeList,
    /// Version of the previous release
    pub current_version: Box<dyn Version>,
    /// Version of this release
    pub version: Box<dyn Version>,
    /// Optional human-friendly name; empty for none
    pub name: String,
    /// Markdown release notes
    pub notes: String,
    /// Branch, tag or sha the release tag is created on
    pub target_commitish: String,
    /// Draft releases are not published until edited on GitHub
    pub is_draft: bool,
}

impl Release {
    pub fn new(
        changes: ChangeList,
        current_version: Box<dyn Version>,
        version: Box<dyn Version>,
        name: impl Into<String>,
        notes: impl Into<String>,
        target_commitish: impl Into<String>,
        is_draft: bool,
    ) -> Self {
        Release {
            changes,
            current_version,
            version,
            name: name.into(),
            notes: notes.into(),
            target_commitish: target_commitish.into(),
            is_draft,
        }
    }

    /// `Version <version>` followed by `: <name>` when a name is set
    pub fn release_name(&self) -> String {
        if self.name.is_empty() {
            format!("Version {}", self.version)
        } else {
            format!("Version {}: {}", self.version, self.name)
        }
    }

    /// e.g. `Drafting pre-release tag on main.`
    pub fn action_description(&self) -> String {
        let action = if self.is_draft { "Drafting" } else { "Publishing" };
        let release_type = if self.version.is_pre_release() {
            "pre-release"
        } else {
            "release"
        };
        format!("{} {} tag on {}.", action, release_type, self.target_commitish)
    }

    /// Text shown to the user before submission
    pub fn preview_format(&self) -> String {
        [self.action_description(), self.release_name(), self.notes.clone()].join("\n\n")
    }

    pub fn github_format(&self) -> ReleasePayload {
        ReleasePayload {
            tag_name: self.version.tag_name(),
            name: self.release_name(),
            body: self.notes.clone(),
            prerelease: self.version.is_pre_release(),
            draft: self.is_draft,
            target_commitish: self.target_commitish.clone(),
        }
    }
}
