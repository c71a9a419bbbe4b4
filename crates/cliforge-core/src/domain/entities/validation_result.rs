//! Outcome of validating one configuration file.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer, ser::SerializeStruct};

/// Pass/fail report for a single validation pass.
///
/// Validity is derived from the error list, so a result can never claim to
/// be valid while carrying errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    config_file: PathBuf,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// `true` iff no errors were recorded. Warnings never affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 4)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("config_file", &self.config_file)?;
        state.end()
    }
}
