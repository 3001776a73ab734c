//! Shader source loading.
//!
//! [`SourceLoader`] carries the base directory for GLSL files as an
//! explicit configuration value handed to whoever compiles stages. There
//! is no process-wide path state to initialize, so there is no
//! must-call-this-first ordering to get wrong.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShaderError;

/// Resolves shader source files against a configured base directory.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    base: PathBuf,
}

impl SourceLoader {
    /// Creates a loader rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The configured base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Reads the source file `file_name` under the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::SourceRead`] with the full path if the file
    /// cannot be read.
    pub fn load(&self, file_name: impl AsRef<Path>) -> Result<String, ShaderError> {
        let path = self.base.join(file_name.as_ref());
        fs::read_to_string(&path).map_err(|e| ShaderError::SourceRead {
            reason: e.to_string(),
            path,
        })
    }
}
