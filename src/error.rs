//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orbis crate.
///
/// Only construction-time and I/O paths return these; the per-frame update
/// path never fails.
#[derive(Debug)]
pub enum OrbisError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Balance snapshot JSON could not be parsed.
    SnapshotParse(String),
    /// Two shader programs were registered under the same id.
    DuplicateProgram(String),
    /// The configured default program id is not registered.
    MissingDefaultProgram(String),
    /// A program's uniform schema is malformed.
    InvalidSchema {
        /// Offending program id.
        program: String,
        /// What is wrong with the schema.
        reason: String,
    },
    /// WGSL composition (imports, parsing, validation) failed.
    ShaderCompose {
        /// Offending program id or shader file.
        program: String,
        /// Composer diagnostic.
        reason: String,
    },
    /// The WGSL `OrbUniforms` struct does not match [`UniformBlock`].
    ///
    /// [`UniformBlock`]: crate::shader::UniformBlock
    UniformLayoutMismatch {
        /// Offending program id.
        program: String,
        /// Missing or extra member description.
        reason: String,
    },
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for OrbisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SnapshotParse(msg) => {
                write!(f, "balance snapshot parse error: {msg}")
            }
            Self::DuplicateProgram(id) => {
                write!(f, "shader program '{id}' registered twice")
            }
            Self::MissingDefaultProgram(id) => {
                write!(f, "default shader program '{id}' is not registered")
            }
            Self::InvalidSchema { program, reason } => {
                write!(f, "invalid uniform schema for '{program}': {reason}")
            }
            Self::ShaderCompose { program, reason } => {
                write!(f, "failed to compose shader '{program}': {reason}")
            }
            Self::UniformLayoutMismatch { program, reason } => {
                write!(f, "uniform layout mismatch in '{program}': {reason}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for OrbisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbisError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_program() {
        let err = OrbisError::UniformLayoutMismatch {
            program: "flete_sur".to_owned(),
            reason: "missing member 'mood'".to_owned(),
        };
        let text = err.to_string();
        assert!(text.contains("flete_sur"));
        assert!(text.contains("mood"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err: OrbisError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
