//! Error types for the shadekit core.
//!
//! GPU-reported compile and link failures are deliberately *not* errors:
//! construction of stages and programs always completes, with the failed
//! state queryable on the returned object. Only caller-contract violations
//! and CPU-side source loading produce an `Err`.

use std::path::PathBuf;

use thiserror::Error;

use crate::uniform::UniformType;

/// Errors produced by uniform updates and shader source loading.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A uniform update was requested for a name that was never registered
    /// on the program. This is a caller bug (the uniform/shader contract is
    /// out of sync) and fails the call rather than being swallowed.
    #[error("unknown uniform \"{name}\" in program \"{program}\": it was never registered")]
    UnknownUniform {
        /// Diagnostic name of the program the update targeted.
        program: String,
        /// The unregistered uniform name.
        name: String,
    },

    /// A uniform update supplied a value whose shape does not match the
    /// type the uniform was registered with.
    #[error("type mismatch for uniform \"{name}\": registered as {expected}, update supplied {got}")]
    UniformTypeMismatch {
        /// The uniform name the update targeted.
        name: String,
        /// The type the uniform was registered with.
        expected: UniformType,
        /// The type of the supplied value.
        got: UniformType,
    },

    /// A shader source file could not be read from disk.
    #[error("failed to read shader source \"{}\": {reason}", .path.display())]
    SourceRead {
        /// Full path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error, rendered as text.
        reason: String,
    },
}
