//! File-level security rules, evaluated on metadata before any parsing.

use std::path::Path;

use crate::domain::error::DomainError;

/// Write permission for "others".
pub const WORLD_WRITABLE_BIT: u32 = 0o002;

/// Write permission for the owning group.
pub const GROUP_WRITABLE_BIT: u32 = 0o020;

/// Reject world-writable files.
///
/// `mode` is `None` on platforms without POSIX permission bits, where the
/// check always passes.
pub fn check_permissions(path: &Path, mode: Option<u32>) -> Result<(), DomainError> {
    match mode {
        Some(mode) if mode & WORLD_WRITABLE_BIT != 0 => Err(DomainError::WorldWritable {
            path: path.to_path_buf(),
            mode: mode & 0o7777,
        }),
        _ => Ok(()),
    }
}

/// Group-writable files are permitted but worth reporting.
pub fn is_group_writable(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & GROUP_WRITABLE_BIT != 0)
}

/// Reject files strictly larger than `max_size` bytes.
///
/// A negative limit rejects every file, including empty ones.
pub fn check_size(path: &Path, size: u64, max_size: i64) -> Result<(), DomainError> {
    if i128::from(size) > i128::from(max_size) {
        return Err(DomainError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_size,
        });
    }
    Ok(())
}
