pub mod analyzer;
pub mod boundary;
pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod issue;
pub mod release;
pub mod token;
pub mod ui;
pub mod version;

pub use error::{ReleaseNotesError, Result};
