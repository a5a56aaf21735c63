use std::fmt;

/// Non-fatal conditions met while assembling a release.
/// These are reported to the user and the build carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No earlier release exists on the target branch
    NoPreviousRelease { branch: String },
    /// Nothing was merged since the previous release
    NoUnreleasedChanges { since: String },
    /// The previous release tag is not a version the scheme understands
    UnparsableVersion { tag: String },
    /// The fetched history has no single newest commit to start from
    AmbiguousGraphTip { tips: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPreviousRelease { branch } => {
                write!(
                    f,
                    "No previous release found on '{}', using the full branch history",
                    branch
                )
            }
            BoundaryWarning::NoUnreleasedChanges { since } => {
                write!(f, "No unreleased changes since '{}'", since)
            }
            BoundaryWarning::UnparsableVersion { tag } => {
                write!(
                    f,
                    "Cannot parse tag '{}' as a version, no versions will be suggested",
                    tag
                )
            }
            BoundaryWarning::AmbiguousGraphTip { tips } => {
                if *tips == 0 {
                    write!(f, "Commit history has no tip commit")
                } else {
                    write!(
                        f,
                        "Commit history has {} tip commits, cannot pick the mainline",
                        tips
                    )
                }
            }
        }
    }
}
