//! Main workflow orchestration logic
//!
//! Fetches the unreleased history from GitHub, classifies it, proposes a
//! version and lets the user review the release before submitting it. CLI
//! argument parsing stays in main.rs.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::analyzer::{suggested_versions, CommitGraph};
use crate::boundary::BoundaryWarning;
use crate::classify::{
    ChangeListFactory, DefaultTypeSelector, IssueTrackerTypeSelector, PullRequestTypeSelector,
    TypeSelector,
};
use crate::cli::menu::{run_menu, MenuOutcome};
use crate::config::{ClassificationMode, JiraConfig};
use crate::error::ReleaseNotesError;
use crate::github::GithubApi;
use crate::issue::JiraClient;
use crate::release::Release;
use crate::ui::{self, PromptTypeSelector, Prompter};
use crate::version::VersionFactory;

/// Arguments for the release build workflow
///
/// Mirrors the CLI Args after config defaults are applied, so the workflow
/// can be called programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReleaseArgs {
    /// Name for the release; asked for when absent
    pub release_name: Option<String>,

    /// Exact version to release; asked for when absent
    pub release_version: Option<String>,

    /// Branch the release is cut from
    pub target_branch: String,

    /// Merge levels to descend into when collecting commits
    pub depth: usize,

    /// Create the release as a draft
    pub draft: bool,
}

/// A release assembled from the unreleased history, before review
#[derive(Debug)]
pub struct AssembledRelease {
    pub release: Release,

    /// Tag of the previous release on the target branch
    pub previous_tag: Option<String>,

    /// Next-version candidates, most likely first
    pub suggestions: Vec<String>,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a release build
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// The release was created on GitHub
    Submitted { tag: String, url: String },
    /// The user abandoned the release
    Cancelled,
    /// Nothing was merged since the previous release
    NothingToRelease,
}

/// Build the type selector for a classification mode.
///
/// # Arguments
/// * `mode` - Configured or requested classification mode
/// * `jira` - Jira settings, required for [ClassificationMode::Jira]
/// * `prompter` - Shared prompter for the interactive modes
pub fn type_selector<'p, R, W>(
    mode: ClassificationMode,
    jira: Option<&JiraConfig>,
    prompter: &'p RefCell<Prompter<R, W>>,
) -> crate::error::Result<Box<dyn TypeSelector + 'p>>
where
    R: BufRead + 'p,
    W: Write + 'p,
{
    let selector: Box<dyn TypeSelector + 'p> = match mode {
        ClassificationMode::Prompt => Box::new(PromptTypeSelector::new(prompter)),
        ClassificationMode::PullRequest => Box::new(PullRequestTypeSelector::with_inner(
            Box::new(PromptTypeSelector::new(prompter)),
        )),
        ClassificationMode::Default => Box::new(DefaultTypeSelector),
        ClassificationMode::Jira => {
            let jira = jira.ok_or_else(|| {
                ReleaseNotesError::config("Classification mode 'jira' needs a [jira] section")
            })?;
            let token = std::env::var(&jira.token_env).ok();
            if jira.username.is_some() && token.is_none() {
                warn!(var = %jira.token_env, "Jira token variable is not set");
            }
            let client = JiraClient::new(jira.url.as_str(), jira.username.clone(), token)?;
            Box::new(IssueTrackerTypeSelector::new(client, &jira.pattern)?)
        }
    };

    debug!(?mode, "type selector ready");
    Ok(selector)
}

/// Collect and classify the unreleased changes and draft a release from them.
///
/// 1. Find the previous release on the target branch
/// 2. Fetch the commits since then and walk their mainline
/// 3. Classify the commits into changes
/// 4. Suggest the next version from the largest change
///
/// The returned release has no changes when nothing was merged since the
/// previous release.
pub fn assemble_release(
    api: &dyn GithubApi,
    changes: &ChangeListFactory<'_>,
    versions: &dyn VersionFactory,
    args: &BuildReleaseArgs,
) -> Result<AssembledRelease> {
    let mut warnings = Vec::new();
    let branch = args.target_branch.as_str();

    let previous_tag = api
        .latest_release_tag_name(Some(branch))
        .context("Failed to look up the latest release")?;
    if previous_tag.is_none() {
        warnings.push(BoundaryWarning::NoPreviousRelease {
            branch: branch.to_string(),
        });
    }

    let commits = api
        .commits_in_range(previous_tag.as_deref(), branch)
        .with_context(|| format!("Failed to fetch commits on '{}'", branch))?;

    let graph = CommitGraph::new(commits);
    if !graph.is_empty() && graph.tip().is_none() {
        warnings.push(BoundaryWarning::AmbiguousGraphTip {
            tips: graph.tip_count(),
        });
    }
    let mainline = graph.first_parents(args.depth);
    debug!(commits = mainline.len(), depth = args.depth, "mainline collected");

    let change_list = changes
        .create_from_commits(mainline)
        .context("Failed to classify changes")?;
    if change_list.is_empty() {
        warnings.push(BoundaryWarning::NoUnreleasedChanges {
            since: previous_tag.clone().unwrap_or_else(|| branch.to_string()),
        });
    }

    let current_version = versions.create_version(previous_tag.as_deref());
    let increments = current_version.semantic_increments();
    if increments.is_empty() {
        warnings.push(BoundaryWarning::UnparsableVersion {
            tag: current_version.unprocessed().to_string(),
        });
    }

    let suggestions =
        suggested_versions(&increments, change_list.largest_change(), changes.types());
    let version = args
        .release_version
        .clone()
        .or_else(|| suggestions.first().cloned())
        .unwrap_or_else(|| current_version.unprocessed().to_string());

    let notes = change_list.display();
    let release = Release::new(
        change_list,
        current_version,
        versions.create_version(Some(&version)),
        args.release_name.clone().unwrap_or_default(),
        notes,
        branch,
        args.draft,
    );

    Ok(AssembledRelease {
        release,
        previous_tag,
        suggestions,
        warnings,
    })
}

/// Main release build workflow
///
/// Assembles the release, asks for whatever the arguments leave open,
/// runs the review menu and submits the result.
///
/// # Arguments
/// * `api` - GitHub repository access
/// * `changes` - Classifies commits; may share `prompter`
/// * `versions` - Versioning scheme
/// * `args` - Workflow arguments
/// * `prompter` - Interactive input and output
/// * `edit` - Opens release notes in an editor
pub fn run_build_release<R: BufRead, W: Write>(
    api: &dyn GithubApi,
    changes: &ChangeListFactory<'_>,
    versions: &dyn VersionFactory,
    args: &BuildReleaseArgs,
    prompter: &RefCell<Prompter<R, W>>,
    edit: &mut dyn FnMut(&str) -> crate::error::Result<String>,
) -> Result<WorkflowResult> {
    let AssembledRelease {
        mut release,
        previous_tag,
        suggestions,
        warnings,
    } = assemble_release(api, changes, versions, args)?;

    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }

    if release.changes.is_empty() {
        return Ok(WorkflowResult::NothingToRelease);
    }

    ui::display_change_summary(&release.changes, previous_tag.as_deref());

    let mut prompter = prompter.borrow_mut();
    if args.release_version.is_none() {
        let question = format!("Version number (current: {})", release.current_version);
        let answer = prompter.ask_with_suggestions(&question, &suggestions)?;
        if !answer.is_empty() {
            release.version = versions.create_version(Some(&answer));
        }
    }
    if args.release_name.is_none() {
        release.name = prompter.ask(None, "Release name", None)?;
    }

    match run_menu(&mut *prompter, &mut release, &suggestions, versions, edit)? {
        MenuOutcome::Cancel => {
            info!("release cancelled");
            Ok(WorkflowResult::Cancelled)
        }
        MenuOutcome::Submit => {
            let payload = release.github_format();
            let url = api
                .create_release(&payload)
                .context("Failed to create the release")?;
            info!(tag = %payload.tag_name, %url, "release created");
            Ok(WorkflowResult::Submitted {
                tag: payload.tag_name,
                url,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ChangeFactory;
    use crate::domain::{Commit, TypeManager};
    use crate::github::MockGithub;
    use crate::version::{CalendarVersionFactory, SemanticVersionFactory};
    use std::io::Cursor;

    fn args() -> BuildReleaseArgs {
        BuildReleaseArgs {
            release_name: None,
            release_version: None,
            target_branch: "main".to_string(),
            depth: 1,
            draft: true,
        }
    }

    fn github_with_merge() -> MockGithub {
        let mut github = MockGithub::new();
        github.add_release("v1.2.3", "main");
        github.add_commit(Commit::new("r", ["v123sha"], "Previous work"));
        github.add_commit(Commit::new("b", ["v123sha"], "Feature work"));
        github.add_commit(Commit::new(
            "m",
            ["r", "b"],
            "Merge pull request #7 from x/y\n\nAdd widgets",
        ));
        github
    }

    #[test]
    fn test_assemble_release() {
        let github = github_with_merge();
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args()).unwrap();

        assert_eq!(assembled.previous_tag.as_deref(), Some("v1.2.3"));
        assert_eq!(assembled.suggestions, vec!["1.2.4", "1.3.0", "2.0.0"]);
        assert!(assembled.warnings.is_empty());
        assert_eq!(assembled.release.changes.len(), 2);
        assert_eq!(assembled.release.version.to_string(), "1.2.4");
        assert_eq!(assembled.release.target_commitish, "main");
        assert!(assembled.release.notes.contains("Add widgets"));
        assert_eq!(
            github.requested_ranges(),
            vec![(Some("v1.2.3".to_string()), "main".to_string())]
        );
    }

    #[test]
    fn test_assemble_release_explicit_version() {
        let github = github_with_merge();
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));
        let args = BuildReleaseArgs {
            release_version: Some("3.0.0".to_string()),
            release_name: Some("Cobalt".to_string()),
            ..args()
        };

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args).unwrap();
        assert_eq!(assembled.release.release_name(), "Version 3.0.0: Cobalt");
    }

    #[test]
    fn test_assemble_release_without_previous_release() {
        let mut github = MockGithub::new();
        github.add_commit(Commit::new("a", Vec::<String>::new(), "Initial commit"));
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args()).unwrap();

        assert_eq!(
            assembled.warnings,
            vec![BoundaryWarning::NoPreviousRelease {
                branch: "main".to_string()
            }]
        );
        assert_eq!(assembled.suggestions, vec!["0.0.1", "0.1.0", "1.0.0"]);
        assert_eq!(github.requested_ranges(), vec![(None, "main".to_string())]);
    }

    #[test]
    fn test_assemble_release_nothing_new() {
        let mut github = MockGithub::new();
        github.add_release("v2.0.0", "main");
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args()).unwrap();

        assert!(assembled.release.changes.is_empty());
        assert_eq!(
            assembled.warnings,
            vec![BoundaryWarning::NoUnreleasedChanges {
                since: "v2.0.0".to_string()
            }]
        );
    }

    #[test]
    fn test_assemble_release_unparsable_tag() {
        let mut github = MockGithub::new();
        github.add_release("release-banana", "main");
        github.add_commit(Commit::new("a", ["x"], "Work"));
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args()).unwrap();

        assert!(assembled.suggestions.is_empty());
        assert_eq!(
            assembled.warnings,
            vec![BoundaryWarning::UnparsableVersion {
                tag: "release-banana".to_string(),
            }]
        );
        // Without suggestions the previous tag is proposed again
        assert_eq!(assembled.release.version.to_string(), "release-banana");
    }

    #[test]
    fn test_assemble_release_ambiguous_tip() {
        let mut github = MockGithub::new();
        github.add_release("v1.0.0", "main");
        github.add_commit(Commit::new("x", ["base"], "one"));
        github.add_commit(Commit::new("y", ["base"], "two"));
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &SemanticVersionFactory, &args()).unwrap();

        assert!(assembled
            .warnings
            .contains(&BoundaryWarning::AmbiguousGraphTip { tips: 2 }));
        assert!(assembled.release.changes.is_empty());
    }

    #[test]
    fn test_calendar_suggestion() {
        let github = github_with_merge();
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));

        let assembled =
            assemble_release(&github, &factory, &CalendarVersionFactory, &args()).unwrap();
        assert_eq!(assembled.suggestions.len(), 1);
        assert!(!assembled.release.version.is_pre_release());
    }

    #[test]
    fn test_run_build_release_submits() {
        let github = github_with_merge();
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));
        // version: first suggestion, name: Cobalt, menu: submit
        let prompter = RefCell::new(Prompter::new(
            Cursor::new(b"\nCobalt\ns\n".to_vec()),
            Vec::new(),
        ));
        let mut edit = |text: &str| -> crate::error::Result<String> { Ok(text.to_string()) };

        let result = run_build_release(
            &github,
            &factory,
            &SemanticVersionFactory,
            &args(),
            &prompter,
            &mut edit,
        )
        .unwrap();

        assert_eq!(
            result,
            WorkflowResult::Submitted {
                tag: "v1.2.4".to_string(),
                url: "https://github.com/mock/repo/releases/tag/v1.2.4".to_string(),
            }
        );
        let created = github.created_releases();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Version 1.2.4: Cobalt");
        assert!(created[0].draft);
        assert!(!created[0].prerelease);
    }

    #[test]
    fn test_run_build_release_cancelled() {
        let github = github_with_merge();
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));
        let prompter = RefCell::new(Prompter::new(
            Cursor::new(b"2.0.0\n\nc\n".to_vec()),
            Vec::new(),
        ));
        let mut edit = |text: &str| -> crate::error::Result<String> { Ok(text.to_string()) };

        let result = run_build_release(
            &github,
            &factory,
            &SemanticVersionFactory,
            &args(),
            &prompter,
            &mut edit,
        )
        .unwrap();

        assert_eq!(result, WorkflowResult::Cancelled);
        assert!(github.created_releases().is_empty());
    }

    #[test]
    fn test_run_build_release_nothing_to_release() {
        let mut github = MockGithub::new();
        github.add_release("v2.0.0", "main");
        let types = TypeManager::semantic();
        let factory = ChangeListFactory::new(ChangeFactory::new(&types));
        let prompter = RefCell::new(Prompter::new(Cursor::new(Vec::new()), Vec::new()));
        let mut edit = |text: &str| -> crate::error::Result<String> { Ok(text.to_string()) };

        let result = run_build_release(
            &github,
            &factory,
            &SemanticVersionFactory,
            &args(),
            &prompter,
            &mut edit,
        )
        .unwrap();
        assert_eq!(result, WorkflowResult::NothingToRelease);
    }

    #[test]
    fn test_type_selector_modes() {
        let prompter = RefCell::new(Prompter::new(Cursor::new(Vec::new()), Vec::new()));
        for mode in [
            ClassificationMode::Prompt,
            ClassificationMode::PullRequest,
            ClassificationMode::Default,
        ] {
            assert!(type_selector(mode, None, &prompter).is_ok());
        }

        let missing = type_selector(ClassificationMode::Jira, None, &prompter);
        assert!(matches!(missing, Err(ReleaseNotesError::Config(_))));

        let jira = JiraConfig {
            url: "https://jira.example.com".to_string(),
            username: None,
            token_env: "RELEASE_NOTES_TEST_UNSET".to_string(),
            pattern: "[A-Z]+-[0-9]+".to_string(),
        };
        assert!(type_selector(ClassificationMode::Jira, Some(&jira), &prompter).is_ok());
    }
}
