//! Versioning strategies.
//!
//! A [`Version`] wraps the tag of a release and knows how to propose the next
//! one. Two strategies exist:
//!
//! - [`SemanticVersion`]: `major.minor.patch` with patch/minor/major candidates
//! - [`CalendarVersion`]: `YY.M.N` with a single candidate for the current month
//!
//! Both keep unparseable input verbatim so it can still be used as a tag.

pub mod calendar;
pub mod semantic;

pub use calendar::{CalendarVersion, CalendarVersionFactory};
pub use semantic::{SemanticVersion, SemanticVersionFactory};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Next-version candidates derived from a current version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Increments {
    /// The current version could not be parsed; nothing to suggest
    None,
    /// Semantic versioning candidates
    Semantic {
        patch: String,
        minor: String,
        major: String,
    },
    /// The single calendar versioning candidate
    Calendar(String),
}

impl Increments {
    pub fn is_empty(&self) -> bool {
        matches!(self, Increments::None)
    }

    /// Candidates in their natural order (patch, minor, major for semantic versions)
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Increments::None => Vec::new(),
            Increments::Semantic {
                patch,
                minor,
                major,
            } => vec![patch.clone(), minor.clone(), major.clone()],
            Increments::Calendar(next) => vec![next.clone()],
        }
    }
}

/// Common behavior of the versioning strategies
pub trait Version: fmt::Display + fmt::Debug {
    /// Possible next versions
    fn semantic_increments(&self) -> Increments;

    /// Whether a release with this version should be flagged as a pre-release
    fn is_pre_release(&self) -> bool;

    /// The string this version was created from
    fn unprocessed(&self) -> &str;

    /// Tag name for a release of this version
    fn tag_name(&self) -> String {
        format!("v{}", self)
    }
}

/// Creates versions of one strategy
pub trait VersionFactory {
    /// Create a version; `None` means no prior release exists
    fn create_version(&self, version: Option<&str>) -> Box<dyn Version>;
}

/// Versioning strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionScheme {
    #[default]
    Semantic,
    Calendar,
}

impl VersionScheme {
    pub fn factory(&self) -> Box<dyn VersionFactory> {
        match self {
            VersionScheme::Semantic => Box::new(SemanticVersionFactory),
            VersionScheme::Calendar => Box::new(CalendarVersionFactory),
        }
    }
}

impl fmt::Display for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionScheme::Semantic => write!(f, "semantic"),
            VersionScheme::Calendar => write!(f, "calendar"),
        }
    }
}
