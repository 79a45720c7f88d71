//! Preservation of the original container next to the input file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;

const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::AlreadyExists(p) => p,
        }
    }
}

/// `mhfpac.bin` -> `mhfpac.bin.bak`
pub fn backup_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `input` to its backup path unless a backup is already there
pub fn preserve_original(input: &Path) -> Result<BackupOutcome> {
    let backup = backup_path(input);
    if backup.exists() {
        debug!("Backup already exists: {}", backup.display());
        return Ok(BackupOutcome::AlreadyExists(backup));
    }

    fs::copy(input, &backup)?;
    info!("Saved backup to {}", backup.display());
    Ok(BackupOutcome::Created(backup))
}
