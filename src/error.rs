use thiserror::Error;

/// Unified error type for release-notes operations
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Type with code '{0}' already exists")]
    DuplicateTypeCode(char),

    #[error("Unknown type code: '{0}'")]
    UnknownTypeCode(char),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    Github(String),

    #[error("GitHub API error: Bad credentials")]
    BadCredentials,

    #[error("Issue tracker error: {0}")]
    IssueTracker(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }

    /// Create a GitHub API error with context
    pub fn github(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Github(msg.into())
    }

    /// Create an issue tracker error with context
    pub fn issue_tracker(msg: impl Into<String>) -> Self {
        ReleaseNotesError::IssueTracker(msg.into())
    }

    /// Create an editor error with context
    pub fn editor(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Editor(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Prompt(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_type_code_display() {
        let err = ReleaseNotesError::DuplicateTypeCode('m');
        assert_eq!(err.to_string(), "Type with code 'm' already exists");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseNotesError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ReleaseNotesError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseNotesError::config("x"), "Configuration error"),
            (ReleaseNotesError::github("x"), "GitHub API error"),
            (ReleaseNotesError::issue_tracker("x"), "Issue tracker error"),
            (ReleaseNotesError::editor("x"), "Editor error"),
            (ReleaseNotesError::prompt("x"), "Prompt error"),
            (ReleaseNotesError::UnknownTypeCode('q'), "Unknown type code"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_long_messages() {
        let long_msg = "a".repeat(1000);
        let err = ReleaseNotesError::github(&long_msg);
        assert!(err.to_string().contains(&long_msg));
    }
}
