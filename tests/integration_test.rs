// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_release_notes_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "release-notes", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-notes"));
    assert!(stdout.contains("Build GitHub release notes"));
    assert!(stdout.contains("--release-version"));
    assert!(stdout.contains("--calendar"));
}

#[test]
fn test_release_notes_version() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "release-notes", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_classify_mode_is_rejected() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "release-notes", "--", "--classify", "guess"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("guess"));
}

#[test]
fn test_change_list_from_commits() {
    use release_notes::classify::{ChangeFactory, ChangeListFactory};
    use release_notes::domain::{Commit, TypeManager};

    let types = TypeManager::semantic();
    let factory = ChangeListFactory::new(ChangeFactory::new(&types));
    let commits = vec![
        Commit::new(
            "a",
            ["p1", "p2"],
            "Merge pull request #12 from x/login\n\nFix login",
        ),
        Commit::new("b", ["p0"], "Plain commit"),
    ];

    let changes = factory.create_from_commits(commits.iter()).unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().any(|c| c.is_pull_request()));
    assert!(changes.display().contains("Fix login"));
}

#[test]
fn test_version_suggestions() {
    use release_notes::analyzer::suggested_versions;
    use release_notes::domain::{Change, TypeManager};
    use release_notes::version::{SemanticVersion, Version};

    let types = TypeManager::semantic();
    let current = SemanticVersion::new(Some("v1.4.2"));
    let major = Change::new("Big feature", types.major_type().unwrap().clone());

    let suggestions = suggested_versions(&current.semantic_increments(), Some(&major), &types);
    assert_eq!(suggestions, vec!["1.5.0", "1.4.3", "2.0.0"]);

    let none = suggested_versions(&current.semantic_increments(), None, &types);
    assert_eq!(none, vec!["1.4.3", "1.5.0", "2.0.0"]);
}

#[test]
fn test_github_remote_parsing() {
    use release_notes::git::parse_github_remote;

    assert_eq!(
        parse_github_remote("git@github.com:octo/widgets.git"),
        Some(("octo".to_string(), "widgets".to_string()))
    );
    assert_eq!(
        parse_github_remote("https://github.com/octo/widgets"),
        Some(("octo".to_string(), "widgets".to_string()))
    );
    assert_eq!(parse_github_remote("not a url"), None);
}
