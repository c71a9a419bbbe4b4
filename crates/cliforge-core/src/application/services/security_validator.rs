//! Security Validator - file checks that run before any parsing.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::{ConfigSource, FileInfo},
    domain::security,
    error::ForgeResult,
};

/// Checks a config file's permission bits and size.
///
/// Every method stats the file through the [`ConfigSource`]; a missing or
/// unreadable file is reported as an access error
/// ([`crate::error::ForgeError::is_access_error`]), separately from the
/// `DomainError` returned for a violation.
pub struct SecurityValidator<'a> {
    source: &'a dyn ConfigSource,
}

impl<'a> SecurityValidator<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self { source }
    }

    fn inspect(&self, path: &Path) -> ForgeResult<FileInfo> {
        self.source.inspect(path)
    }

    /// Fail if the file is writable by "others". Always succeeds where the
    /// platform has no permission bits.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn validate_config_file_permissions(&self, path: &Path) -> ForgeResult<()> {
        let info = self.inspect(path)?;
        debug!(mode = ?info.mode.map(|m| format!("{m:o}")), "Checking permissions");
        security::check_permissions(path, info.mode)?;
        Ok(())
    }

    /// Fail if the file is strictly larger than `max_size` bytes.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn validate_config_file_size(&self, path: &Path, max_size: i64) -> ForgeResult<()> {
        let info = self.inspect(path)?;
        security::check_size(path, info.size, max_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockConfigSource},
        domain::DomainError,
        error::ForgeError,
    };

    fn source_with(size: u64, mode: Option<u32>) -> MockConfigSource {
        let mut source = MockConfigSource::new();
        source
            .expect_inspect()
            .returning(move |_| Ok(FileInfo { size, mode }));
        source
    }

    fn missing_source() -> MockConfigSource {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(|path| {
            Err(ApplicationError::Stat {
                path: path.to_path_buf(),
                reason: "No such file or directory".into(),
            }
            .into())
        });
        source
    }

    fn path() -> PathBuf {
        PathBuf::from("config.yaml")
    }

    #[test]
    fn world_writable_is_rejected() {
        let source = source_with(10, Some(0o666));
        let err = SecurityValidator::new(&source)
            .validate_config_file_permissions(&path())
            .unwrap_err();

        assert!(err.to_string().contains("world-writable"));
        assert!(!err.is_access_error());
    }

    #[test]
    fn private_file_is_accepted() {
        let source = source_with(10, Some(0o600));
        assert!(
            SecurityValidator::new(&source)
                .validate_config_file_permissions(&path())
                .is_ok()
        );
    }

    #[test]
    fn no_permission_model_is_accepted() {
        let source = source_with(10, None);
        let validator = SecurityValidator::new(&source);
        assert!(validator.validate_config_file_permissions(&path()).is_ok());
    }

    #[test]
    fn group_writable_passes_permission_check() {
        let source = source_with(10, Some(0o660));
        let validator = SecurityValidator::new(&source);
        assert!(validator.validate_config_file_permissions(&path()).is_ok());
    }

    #[test]
    fn stat_failure_is_distinct() {
        let source = missing_source();
        let validator = SecurityValidator::new(&source);

        let err = validator
            .validate_config_file_permissions(&path())
            .unwrap_err();
        assert!(err.is_access_error());

        let err = validator
            .validate_config_file_size(&path(), 100)
            .unwrap_err();
        assert!(err.is_access_error());
    }

    #[test]
    fn size_zero_limit() {
        let non_empty = source_with(1, Some(0o600));
        let err = SecurityValidator::new(&non_empty)
            .validate_config_file_size(&path(), 0)
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::FileTooLarge { size: 1, max: 0, .. })
        ));

        let empty = source_with(0, Some(0o600));
        assert!(
            SecurityValidator::new(&empty)
                .validate_config_file_size(&path(), 0)
                .is_ok()
        );
    }

    #[test]
    fn negative_limit_rejects_empty_file() {
        let empty = source_with(0, Some(0o600));
        assert!(
            SecurityValidator::new(&empty)
                .validate_config_file_size(&path(), -1)
                .is_err()
        );
    }
}
