//! Flat-file token storage.
//!
//! Each credential lives in its own plain-text file under one directory.
//! Writes overwrite the whole file in place with no rename step, so a crash
//! mid-write can leave a truncated file. Two processes sharing a directory
//! will race.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Code,
    RefreshToken,
    AccessToken,
    Uuids,
}

impl Credential {
    pub fn file_name(&self) -> &'static str {
        match self {
            Credential::Code => "code",
            Credential::RefreshToken => "refresh_token",
            Credential::AccessToken => "access_token",
            Credential::Uuids => "uuids",
        }
    }
}

pub trait CredentialStore {
    /// Trimmed contents, or `None` when missing, unreadable or blank.
    fn get(&self, key: Credential) -> Option<String>;

    fn set(&self, key: Credential, value: &str) -> Result<()>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: Credential) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: Credential) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    debug!(file = key.file_name(), "credential file is empty");
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "credential file does not exist");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read credential file");
                None
            }
        }
    }

    fn set(&self, key: Credential, value: &str) -> Result<()> {
        let path = self.path(key);
        fs::write(&path, value)?;
        debug!(path = %path.display(), "credential file written");
        Ok(())
    }
}

/// The OAuth pair as currently on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn load(store: &dyn CredentialStore) -> Self {
        Credentials {
            access_token: store.get(Credential::AccessToken),
            refresh_token: store.get(Credential::RefreshToken),
        }
    }
}

/// Ordered broadcast targets from the `uuids` file, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientSet(Vec<String>);

impl RecipientSet {
    pub fn parse(content: &str) -> Option<Self> {
        let ids: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if ids.is_empty() { None } else { Some(RecipientSet(ids)) }
    }

    pub fn load(store: &dyn CredentialStore) -> Option<Self> {
        store.get(Credential::Uuids).and_then(|content| Self::parse(&content))
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }
}
