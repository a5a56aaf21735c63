//! Turning commits into classified changes

pub mod selector;

pub use selector::{
    DefaultTypeSelector, IssueTrackerTypeSelector, PullRequestTypeSelector, TypeSelector,
};

use crate::domain::{Change, ChangeList, Commit, TypeManager};
use crate::error::Result;
use regex::Regex;
use tracing::debug;

/// Creates changes from commits, classifying each one with a [`TypeSelector`]
pub struct ChangeFactory<'a> {
    types: &'a TypeManager,
    selector: Box<dyn TypeSelector + 'a>,
}

impl<'a> ChangeFactory<'a> {
    /// Factory that keeps every change at the default type
    pub fn new(types: &'a TypeManager) -> Self {
        ChangeFactory::with_selector(types, Box::new(DefaultTypeSelector))
    }

    pub fn with_selector(types: &'a TypeManager, selector: Box<dyn TypeSelector + 'a>) -> Self {
        ChangeFactory { types, selector }
    }

    pub fn types(&self) -> &TypeManager {
        self.types
    }

    /// Create the change for a commit.
    ///
    /// Merge commits are recognized as pull requests
    /// (`Merge pull request #N ...`) or branch merges (`Merge branch 'name' ...`),
    /// in which case the message body after the title and blank line becomes
    /// the change message.
    ///
    /// # Returns
    /// * `Ok(Some(change))` - The classified change
    /// * `Ok(None)` - The selector chose the ignore type
    /// * `Err` - The selector failed
    pub fn create_from_commit(&self, commit: &Commit) -> Result<Option<Change>> {
        let mut change = self.parse(commit);

        let selected = self.selector.select_type(&change, self.types)?;
        if selected.is_ignored() {
            debug!(sha = %commit.sha, "change ignored");
            return Ok(None);
        }

        change.set_type(selected);
        Ok(Some(change))
    }

    fn parse(&self, commit: &Commit) -> Change {
        let message = commit.message();
        let initial = self.types.initial_type();

        if !commit.is_merge() {
            return Change::new(message, initial);
        }

        if let Some(captures) =
            Regex::new(r"(?s)Merge pull request #([0-9]+)[^\n]*\n[^\n]*\n(.*)")
                .ok()
                .and_then(|re| re.captures(message))
        {
            let number = captures.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
            let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            if let Some(number) = number {
                return Change::pull_request(number, body, initial);
            }
        }

        if let Some(captures) = Regex::new(r"(?s)Merge branch '([^']*)'[^\n]*\n[^\n]*\n(.*)")
            .ok()
            .and_then(|re| re.captures(message))
        {
            let branch = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            return Change::merge(branch, body, initial);
        }

        Change::new(message, initial)
    }
}

/// Builds a [`ChangeList`] from a range of commits
pub struct ChangeListFactory<'a> {
    change_factory: ChangeFactory<'a>,
}

impl<'a> ChangeListFactory<'a> {
    pub fn new(change_factory: ChangeFactory<'a>) -> Self {
        ChangeListFactory { change_factory }
    }

    pub fn types(&self) -> &TypeManager {
        self.change_factory.types()
    }

    /// Classify every commit, dropping the ignored ones
    pub fn create_from_commits<'c>(
        &self,
        commits: impl IntoIterator<Item = &'c Commit>,
    ) -> Result<ChangeList> {
        let mut changes = Vec::new();
        for commit in commits {
            if let Some(change) = self.change_factory.create_from_commit(commit)? {
                changes.push(change);
            }
        }

        debug!(count = changes.len(), "classified changes");
        Ok(ChangeList::new(changes))
    }
}
