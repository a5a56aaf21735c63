use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use crate::release::Release;
use crate::ui::Prompter;
use crate::version::{Version, VersionFactory};

/// Actions offered while reviewing a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Submit,
    ChangeVersion,
    ChangeName,
    EditNotes,
    RegenerateNotes,
    ToggleDraft,
    ChangeTarget,
    Cancel,
}

impl MenuChoice {
    const ALL: [MenuChoice; 8] = [
        MenuChoice::Submit,
        MenuChoice::ChangeVersion,
        MenuChoice::ChangeName,
        MenuChoice::EditNotes,
        MenuChoice::RegenerateNotes,
        MenuChoice::ToggleDraft,
        MenuChoice::ChangeTarget,
        MenuChoice::Cancel,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Submit => "s",
            MenuChoice::ChangeVersion => "v",
            MenuChoice::ChangeName => "n",
            MenuChoice::EditNotes => "e",
            MenuChoice::RegenerateNotes => "r",
            MenuChoice::ToggleDraft => "d",
            MenuChoice::ChangeTarget => "t",
            MenuChoice::Cancel => "c",
        }
    }

    pub fn from_key(key: &str) -> Option<MenuChoice> {
        MenuChoice::ALL.into_iter().find(|c| c.key() == key)
    }

    fn label(&self, release: &Release) -> String {
        match self {
            MenuChoice::Submit => "Submit to GitHub".to_string(),
            MenuChoice::ChangeVersion => format!("Change version ({})", release.version),
            MenuChoice::ChangeName => "Change release name".to_string(),
            MenuChoice::EditNotes => "Edit release notes".to_string(),
            MenuChoice::RegenerateNotes => "Regenerate release notes from changes".to_string(),
            MenuChoice::ToggleDraft => {
                if release.is_draft {
                    "Publish immediately instead of drafting".to_string()
                } else {
                    "Save as a draft instead of publishing".to_string()
                }
            }
            MenuChoice::ChangeTarget => {
                format!("Change target commitish ({})", release.target_commitish)
            }
            MenuChoice::Cancel => "Cancel".to_string(),
        }
    }
}

/// How the review loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Submit,
    Cancel,
}

/// Show the release preview and apply menu actions until the user submits or cancels.
///
/// # Arguments
/// * `prompter` - Where to ask
/// * `release` - Release edited in place
/// * `suggestions` - Versions offered when changing the version
/// * `versions` - Builds the version from the user's answer
/// * `edit` - Opens text in an editor and returns the edited text
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    release: &mut Release,
    suggestions: &[String],
    versions: &dyn VersionFactory,
    edit: &mut dyn FnMut(&str) -> crate::error::Result<String>,
) -> Result<MenuOutcome> {
    loop {
        let choices: Vec<(String, String)> = MenuChoice::ALL
            .iter()
            .map(|c| (c.key().to_string(), c.label(release)))
            .collect();

        let key = prompter
            .select(
                Some(&release.preview_format()),
                "What would you like to do",
                &choices,
                Some(MenuChoice::Submit.key()),
            )
            .context("Failed to read menu choice")?;

        let Some(choice) = MenuChoice::from_key(&key) else {
            continue;
        };
        debug!(?choice, "menu choice");

        match choice {
            MenuChoice::Submit => {
                if release.is_draft || confirm_publish(prompter, release)? {
                    return Ok(MenuOutcome::Submit);
                }
            }
            MenuChoice::Cancel => return Ok(MenuOutcome::Cancel),
            MenuChoice::ChangeVersion => {
                let question = format!("Version number (current: {})", release.current_version);
                let answer = prompter.ask_with_suggestions(&question, suggestions)?;
                if !answer.is_empty() {
                    release.version = versions.create_version(Some(&answer));
                }
            }
            MenuChoice::ChangeName => {
                let current = (!release.name.is_empty()).then(|| release.name.clone());
                release.name = prompter.ask(None, "Release name", current.as_deref())?;
            }
            MenuChoice::EditNotes => match edit(&release.notes) {
                Ok(notes) => release.notes = notes.trim_end().to_string(),
                Err(e) => prompter.message(&format!("{} {}", style("Editor failed:").red(), e))?,
            },
            MenuChoice::RegenerateNotes => release.notes = release.changes.display(),
            MenuChoice::ToggleDraft => release.is_draft = !release.is_draft,
            MenuChoice::ChangeTarget => {
                let target = release.target_commitish.clone();
                release.target_commitish =
                    prompter.ask(None, "Target commitish", Some(&target))?;
            }
        }
    }
}

/// A published release is visible right away, so ask before submitting one
fn confirm_publish<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    release: &Release,
) -> Result<bool> {
    let question = format!(
        "Publish {} on {} without a draft",
        release.version.tag_name(),
        release.target_commitish
    );
    prompter
        .confirm(None, &question, true)
        .context("Failed to read confirmation")
}
