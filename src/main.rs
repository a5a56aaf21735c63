use std::cell::RefCell;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use release_notes::classify::{ChangeFactory, ChangeListFactory};
use release_notes::cli::{run_build_release, type_selector, BuildReleaseArgs, WorkflowResult};
use release_notes::config::{self, ClassificationMode};
use release_notes::domain::TypeManager;
use release_notes::git::LocalRepository;
use release_notes::github::GithubClient;
use release_notes::token::{resolve_token, TokenCache};
use release_notes::ui::{self, Prompter};
use release_notes::version::VersionScheme;

#[derive(clap::Parser)]
#[command(
    name = "release-notes",
    version,
    about = "Build GitHub release notes from the changes merged since the last release"
)]
struct Args {
    #[arg(help = "Repository owner, or owner/repo (default: from the origin remote)")]
    owner: Option<String>,

    #[arg(help = "Repository name (default: from the origin remote)")]
    repo: Option<String>,

    #[arg(short = 'r', long, help = "Name of the release")]
    release_name: Option<String>,

    #[arg(short = 'R', long, help = "Exact version to release")]
    release_version: Option<String>,

    #[arg(short = 't', long, help = "GitHub access token")]
    access_token: Option<String>,

    #[arg(long, help = "File caching the access token")]
    token_file: Option<String>,

    #[arg(short = 'b', long, help = "Branch to release from")]
    target_branch: Option<String>,

    #[arg(long, help = "Use calendar versioning (YY.M.N)")]
    calendar: bool,

    #[arg(long, help = "Merge levels to descend into when collecting commits")]
    depth: Option<usize>,

    #[arg(long, help = "Publish the release instead of saving a draft")]
    publish: bool,

    #[arg(long, value_enum, help = "How changes get their types")]
    classify: Option<ClassificationMode>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Log debug output to stderr")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let local = match LocalRepository::discover(".") {
        Ok(repo) => Some(repo),
        Err(e) => {
            debug!(error = %e, "not inside a git repository");
            None
        }
    };

    let (owner, repo) = repository_name(args.owner, args.repo, local.as_ref())?;

    let target_branch = match args.target_branch.or(config.release.target_branch.clone()) {
        Some(branch) => branch,
        None => local
            .as_ref()
            .and_then(|l| l.current_branch().ok().flatten())
            .unwrap_or_else(|| "master".to_string()),
    };

    let scheme = if args.calendar {
        VersionScheme::Calendar
    } else {
        config.release.version_scheme
    };
    let mode = args.classify.unwrap_or(config.classification.mode);
    let token_file = args
        .token_file
        .unwrap_or_else(|| config.github.token_file.clone());

    let prompter = RefCell::new(Prompter::stdio());

    let cache = TokenCache::in_config_dir(&token_file);
    let (token, source) = resolve_token(args.access_token.as_deref(), &cache, || {
        prompter
            .borrow_mut()
            .ask(None, "Please enter a GitHub access token", None)
    })?;

    let client = match GithubClient::create_with_token(
        config.github.api_url.as_deref(),
        owner.as_str(),
        repo.as_str(),
        token,
    ) {
        Ok(client) => client,
        Err(e) => {
            if let Err(clear) = cache.forget_rejected(source, &e) {
                warn!(error = %clear, "failed to clear the cached token");
            }
            return Err(e).context("Failed to authenticate with GitHub");
        }
    };

    ui::display_status(&format!(
        "Building a {} release for {}/{} from '{}'",
        scheme, owner, repo, target_branch
    ));

    let types = TypeManager::semantic();
    let selector = type_selector(mode, config.jira.as_ref(), &prompter)?;
    let factory = ChangeListFactory::new(ChangeFactory::with_selector(&types, selector));
    let versions = scheme.factory();

    let build_args = BuildReleaseArgs {
        release_name: args.release_name,
        release_version: args.release_version,
        target_branch,
        depth: args.depth.unwrap_or(config.release.depth),
        draft: !args.publish && config.release.draft,
    };

    let result = run_build_release(
        &client,
        &factory,
        versions.as_ref(),
        &build_args,
        &prompter,
        &mut |text: &str| ui::edit_text(text),
    )?;

    match result {
        WorkflowResult::Submitted { tag, url } => {
            ui::display_success(&format!("Created release {}", tag));
            ui::display_release_url(&url);
        }
        WorkflowResult::Cancelled => println!("Release cancelled."),
        WorkflowResult::NothingToRelease => ui::display_status("Nothing to release."),
    }

    Ok(())
}

/// Owner and repository from the arguments, falling back to the origin remote
fn repository_name(
    owner: Option<String>,
    repo: Option<String>,
    local: Option<&LocalRepository>,
) -> Result<(String, String)> {
    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        (Some(slug), None) => match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => bail!("Repository name is required, pass owner and repo or owner/repo"),
        },
        (None, _) => {
            let remote = match local {
                Some(local) => local.github_remote("origin")?,
                None => None,
            };
            match remote {
                Some(name) => Ok(name),
                None => bail!(
                    "Cannot infer the repository from the origin remote, pass owner and repo"
                ),
            }
        }
    }
}
