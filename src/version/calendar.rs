use super::{Increments, Version, VersionFactory};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

const INITIAL_VERSION: &str = "v0.0.0";

/// A calendar version `YY.M.N`: two-digit year, month, and a release counter
/// within that month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarVersion {
    raw: String,
    parsed: Option<semver::Version>,
}

impl CalendarVersion {
    /// Create a version; `None` or an empty string means `v0.0.0`
    pub fn new(version: Option<&str>) -> Self {
        let raw = version
            .filter(|v| !v.is_empty())
            .unwrap_or(INITIAL_VERSION)
            .to_string();
        let parsed = semver::Version::parse(raw.trim_start_matches('v')).ok();

        CalendarVersion { raw, parsed }
    }

    /// The next version for a release made on `date`.
    ///
    /// Continues the counter when this version is from the same year and
    /// month, otherwise starts the month at 0.
    pub fn increment_on(&self, date: NaiveDate) -> String {
        let year = (date.year() % 100) as u64;
        let month = u64::from(date.month());

        let counter = match &self.parsed {
            Some(v) if v.major == year && v.minor == month => v.patch + 1,
            _ => 0,
        };

        format!("{}.{}.{}", year, month, counter)
    }
}

impl Version for CalendarVersion {
    fn semantic_increments(&self) -> Increments {
        Increments::Calendar(self.increment_on(Local::now().date_naive()))
    }

    fn is_pre_release(&self) -> bool {
        false
    }

    fn unprocessed(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CalendarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parsed {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", self.raw),
        }
    }
}

/// Creates [`CalendarVersion`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarVersionFactory;

impl VersionFactory for CalendarVersionFactory {
    fn create_version(&self, version: Option<&str>) -> Box<dyn Version> {
        Box::new(CalendarVersion::new(version))
    }
}
