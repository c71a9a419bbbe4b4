//! Local config source using std::fs.

use std::io;
use std::path::Path;

use cliforge_core::{
    application::{
        ApplicationError,
        ports::{ConfigSource, FileInfo},
    },
    error::{ForgeError, ForgeResult},
};

/// Production config source reading from the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct LocalConfigSource;

impl LocalConfigSource {
    /// Create a new local config source.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for LocalConfigSource {
    fn inspect(&self, path: &Path) -> ForgeResult<FileInfo> {
        let metadata = std::fs::metadata(path).map_err(|e| stat_error(path, e))?;
        Ok(FileInfo {
            size: metadata.len(),
            mode: permission_bits(&metadata),
        })
    }

    fn read(&self, path: &Path) -> ForgeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            ApplicationError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &std::fs::Metadata) -> Option<u32> {
    // No POSIX permission bits to report.
    None
}

fn stat_error(path: &Path, e: io::Error) -> ForgeError {
    ApplicationError::Stat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
