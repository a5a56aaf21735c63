//! Type selection policies applied to each change during classification

use crate::domain::{Change, Type, TypeManager};
use crate::error::{ReleaseNotesError, Result};
use crate::issue::IssueTracker;
use regex::Regex;
use tracing::{debug, warn};

/// Decides the type of a freshly parsed change.
///
/// Returning the ignore type drops the change from the release notes.
pub trait TypeSelector {
    fn select_type(&self, change: &Change, types: &TypeManager) -> Result<Type>;
}

/// Keeps the type the change was created with
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeSelector;

impl TypeSelector for DefaultTypeSelector {
    fn select_type(&self, change: &Change, _types: &TypeManager) -> Result<Type> {
        Ok(change.change_type().clone())
    }
}

/// Only keeps pull requests; everything else is ignored.
///
/// Pull requests are handed to the inner selector when one is set.
#[derive(Default)]
pub struct PullRequestTypeSelector<'a> {
    inner: Option<Box<dyn TypeSelector + 'a>>,
}

impl<'a> PullRequestTypeSelector<'a> {
    pub fn new() -> Self {
        PullRequestTypeSelector { inner: None }
    }

    pub fn with_inner(inner: Box<dyn TypeSelector + 'a>) -> Self {
        PullRequestTypeSelector { inner: Some(inner) }
    }
}

impl TypeSelector for PullRequestTypeSelector<'_> {
    fn select_type(&self, change: &Change, types: &TypeManager) -> Result<Type> {
        if !change.is_pull_request() {
            return Ok(types.ignore_type());
        }

        match &self.inner {
            Some(inner) => inner.select_type(change, types),
            None => Ok(change.change_type().clone()),
        }
    }
}

/// Looks up issue keys mentioned in a change in an issue tracker and maps the
/// issue's category onto a type by name.
///
/// The first key that resolves to a known type wins. Unknown issues and
/// lookup failures fall through to the manager's default type.
pub struct IssueTrackerTypeSelector<T: IssueTracker> {
    tracker: T,
    pattern: Regex,
}

impl<T: IssueTracker> IssueTrackerTypeSelector<T> {
    /// # Arguments
    /// * `tracker` - Issue tracker to query
    /// * `pattern` - Regex matching issue keys, e.g. `[A-Z][A-Z0-9]+-[0-9]+`
    pub fn new(tracker: T, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ReleaseNotesError::config(format!("Invalid issue key pattern '{}': {}", pattern, e))
        })?;

        Ok(IssueTrackerTypeSelector { tracker, pattern })
    }
}

impl<T: IssueTracker> TypeSelector for IssueTrackerTypeSelector<T> {
    fn select_type(&self, change: &Change, types: &TypeManager) -> Result<Type> {
        let text = change.display_short();

        for key in self.pattern.find_iter(&text).map(|m| m.as_str()) {
            match self.tracker.issue_type(key) {
                Ok(Some(category)) => {
                    if let Some(found) = types.get_type_by_name(&category) {
                        debug!(key, category = %category, "classified from issue tracker");
                        return Ok(found.clone());
                    }
                    debug!(key, category = %category, "issue category matches no type");
                }
                Ok(None) => debug!(key, "issue not found"),
                Err(e) => warn!(key, error = %e, "could not look up issue"),
            }
        }

        Ok(types.initial_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticTracker(HashMap<String, String>);

    impl IssueTracker for StaticTracker {
        fn issue_type(&self, key: &str) -> Result<Option<String>> {
            if key == "FAIL-1" {
                return Err(ReleaseNotesError::issue_tracker("boom"));
            }
            Ok(self.0.get(key).cloned())
        }
    }

    fn tracker() -> StaticTracker {
        let mut issues = HashMap::new();
        issues.insert("APP-1".to_string(), "Bug".to_string());
        issues.insert("APP-2".to_string(), "Epic".to_string());
        issues.insert("APP-3".to_string(), "Major".to_string());
        StaticTracker(issues)
    }

    fn minor(types: &TypeManager) -> Type {
        types.get_type_by_code('m').unwrap().clone()
    }

    #[test]
    fn test_default_selector_keeps_type() {
        let types = TypeManager::semantic();
        let change = Change::new("msg", types.get_type_by_code('b').unwrap().clone());
        let selected = DefaultTypeSelector.select_type(&change, &types).unwrap();
        assert_eq!(selected.code(), 'b');
    }

    #[test]
    fn test_pull_request_selector_ignores_plain_commits() {
        let types = TypeManager::semantic();
        let selector = PullRequestTypeSelector::new();

        let plain = Change::new("msg", minor(&types));
        assert!(selector.select_type(&plain, &types).unwrap().is_ignored());

        let merge = Change::merge("dev", "msg", minor(&types));
        assert!(selector.select_type(&merge, &types).unwrap().is_ignored());

        let pr = Change::pull_request(1, "msg", minor(&types));
        assert_eq!(selector.select_type(&pr, &types).unwrap().code(), 'm');
    }

    #[test]
    fn test_pull_request_selector_delegates() {
        let types = TypeManager::semantic();
        let inner = IssueTrackerTypeSelector::new(tracker(), r"APP-[0-9]+").unwrap();
        let selector = PullRequestTypeSelector::with_inner(Box::new(inner));

        let pr = Change::pull_request(1, "APP-1 fix crash", minor(&types));
        assert_eq!(selector.select_type(&pr, &types).unwrap().code(), 'b');
    }

    #[test]
    fn test_issue_tracker_first_known_type_wins() {
        let types = TypeManager::semantic();
        let selector = IssueTrackerTypeSelector::new(tracker(), r"APP-[0-9]+").unwrap();

        let change = Change::new("APP-2 and APP-3 and APP-1", minor(&types));
        assert_eq!(selector.select_type(&change, &types).unwrap().code(), 'M');
    }

    #[test]
    fn test_issue_tracker_falls_back_to_default() {
        let types = TypeManager::semantic();
        let selector = IssueTrackerTypeSelector::new(tracker(), r"[A-Z]+-[0-9]+").unwrap();

        let unknown = Change::new("APP-99 nothing", types.get_type_by_code('d').unwrap().clone());
        assert_eq!(selector.select_type(&unknown, &types).unwrap().code(), 'm');

        let failing = Change::new("FAIL-1 lookup error", minor(&types));
        assert_eq!(selector.select_type(&failing, &types).unwrap().code(), 'm');

        let no_key = Change::new("no issue key", minor(&types));
        assert_eq!(selector.select_type(&no_key, &types).unwrap().code(), 'm');
    }

    #[test]
    fn test_issue_tracker_invalid_pattern() {
        let result = IssueTrackerTypeSelector::new(tracker(), "(unclosed");
        assert!(matches!(result, Err(ReleaseNotesError::Config(_))));
    }
}
