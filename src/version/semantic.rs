use super::{Increments, Version, VersionFactory};
use std::fmt;
use tracing::debug;

const INITIAL_VERSION: &str = "v0.0.0";

/// A semantic version (`major.minor.patch[-pre][+build]`), leading `v` optional.
///
/// Input that is not valid semver is kept as an opaque string: it has no
/// increments and always counts as a pre-release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    raw: String,
    parsed: Option<semver::Version>,
}

impl SemanticVersion {
    /// Create a version; `None` or an empty string means `0.0.0`
    pub fn new(version: Option<&str>) -> Self {
        match version.filter(|v| !v.is_empty()) {
            None => SemanticVersion {
                raw: INITIAL_VERSION.to_string(),
                parsed: Some(semver::Version::new(0, 0, 0)),
            },
            Some(raw) => {
                let parsed = semver::Version::parse(raw.trim_start_matches('v')).ok();
                if parsed.is_none() {
                    debug!(version = raw, "not a semantic version, keeping it opaque");
                }
                SemanticVersion {
                    raw: raw.to_string(),
                    parsed,
                }
            }
        }
    }

    /// Parse a version string, e.g. a tag name like `v1.2.3`
    pub fn parse(version: &str) -> Self {
        SemanticVersion::new(Some(version))
    }

    pub fn is_semantic(&self) -> bool {
        self.parsed.is_some()
    }
}

impl Version for SemanticVersion {
    fn semantic_increments(&self) -> Increments {
        let Some(current) = &self.parsed else {
            return Increments::None;
        };

        // Candidates never carry the current pre-release or build metadata.
        let (Some(next_patch), Some(next_minor), Some(next_major)) = (
            current.patch.checked_add(1),
            current.minor.checked_add(1),
            current.major.checked_add(1),
        ) else {
            return Increments::None;
        };

        let patch = semver::Version::new(current.major, current.minor, next_patch);
        let minor = semver::Version::new(current.major, next_minor, 0);
        let major = semver::Version::new(next_major, 0, 0);

        Increments::Semantic {
            patch: patch.to_string(),
            minor: minor.to_string(),
            major: major.to_string(),
        }
    }

    fn is_pre_release(&self) -> bool {
        match &self.parsed {
            Some(v) => v.major == 0 || !v.pre.is_empty(),
            None => true,
        }
    }

    fn unprocessed(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parsed {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", self.raw),
        }
    }
}

/// Creates [`SemanticVersion`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticVersionFactory;

impl VersionFactory for SemanticVersionFactory {
    fn create_version(&self, version: Option<&str>) -> Box<dyn Version> {
        Box::new(SemanticVersion::new(version))
    }
}
