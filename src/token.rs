//! GitHub access token lookup and caching

use crate::error::{ReleaseNotesError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted before the cache file
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Environment,
    Cache,
    Prompt,
}

/// A file holding a single access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenCache { path: path.into() }
    }

    /// Cache file `file_name` in the user config directory.
    ///
    /// Absolute paths are used as given. Without a config directory the
    /// file is looked up relative to the working directory.
    pub fn in_config_dir(file_name: &str) -> Self {
        let file = Path::new(file_name);
        if file.is_absolute() {
            return TokenCache::new(file);
        }

        match dirs::config_dir() {
            Some(dir) => TokenCache::new(dir.join("release-notes").join(file)),
            None => TokenCache::new(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached token, if the file exists and is not blank
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the token, creating the parent directory if needed
    pub fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // An existing file keeps its old mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;

        debug!(path = %self.path.display(), "stored access token");
        Ok(())
    }

    /// Remove the cached token; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Drop the cached token after GitHub rejected it.
    ///
    /// Only a [ReleaseNotesError::BadCredentials] failure of a token that
    /// came from the cache or the prompt clears it. Returns whether it did.
    pub fn forget_rejected(&self, source: TokenSource, error: &ReleaseNotesError) -> Result<bool> {
        let rejected = matches!(error, ReleaseNotesError::BadCredentials)
            && matches!(source, TokenSource::Cache | TokenSource::Prompt);
        if rejected {
            self.clear()?;
            debug!(path = %self.path.display(), "cleared rejected access token");
        }
        Ok(rejected)
    }
}

/// Find an access token.
///
/// Tries, in order: the explicit `flag` value, the `GITHUB_TOKEN` environment
/// variable, the cache file, and finally `prompt`. A prompted token is stored
/// in the cache.
pub fn resolve_token(
    flag: Option<&str>,
    cache: &TokenCache,
    prompt: impl FnOnce() -> Result<String>,
) -> Result<(String, TokenSource)> {
    if let Some(token) = flag.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok((token.to_string(), TokenSource::Flag));
    }

    if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
        let token = token.trim();
        if !token.is_empty() {
            debug!("using token from {}", GITHUB_TOKEN_ENV);
            return Ok((token.to_string(), TokenSource::Environment));
        }
    }

    if let Some(token) = cache.load()? {
        debug!(path = %cache.path().display(), "using cached token");
        return Ok((token, TokenSource::Cache));
    }

    let token = prompt()?.trim().to_string();
    if token.is_empty() {
        return Err(ReleaseNotesError::prompt("An access token is required"));
    }
    cache.store(&token)?;
    Ok((token, TokenSource::Prompt))
}
