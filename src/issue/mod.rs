//! Issue tracker lookups used to classify changes by the issues they mention

pub mod jira;

pub use jira::JiraClient;

use crate::error::Result;

/// Source of issue categories
pub trait IssueTracker {
    /// Category name of the issue with the given key (e.g. "Bug").
    ///
    /// # Returns
    /// * `Ok(Some(name))` - The issue exists
    /// * `Ok(None)` - No such issue
    /// * `Err` - The tracker could not be queried
    fn issue_type(&self, key: &str) -> Result<Option<String>>;
}

impl<T: IssueTracker + ?Sized> IssueTracker for &T {
    fn issue_type(&self, key: &str) -> Result<Option<String>> {
        (**self).issue_type(key)
    }
}
