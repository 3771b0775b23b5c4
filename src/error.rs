//! Error taxonomy for the renderer.
//!
//! Three classes of failure exist with distinct propagation policies:
//! fatal errors abort renderer construction, recoverable errors fail a
//! single draw call (the caller skips that element for the frame), and
//! advisory conditions are logged and never surface as `Err`. Caller bugs
//! (negative box dimensions, bottom-corner selectors on the rounded-rect
//! primitive) are contract violations and panic instead.

use thiserror::Error;

use crate::gl::ShaderStage;

/// How far an error propagates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Renderer construction must be aborted; partially created GPU objects
    /// are released before the error is returned.
    Fatal,
    /// Only the failing draw call is affected; subsequent draws stay valid.
    Recoverable,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to compile {stage:?} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {log}")]
    ProgramLink { log: String },

    #[error("shader program is missing the `{name}` vertex attribute")]
    MissingAttribute { name: &'static str },

    #[error("graphics context refused to allocate a {kind}: {reason}")]
    ResourceAlloc {
        kind: &'static str,
        reason: String,
    },

    #[error("external texture sampling is not supported by this context")]
    ExternalTexturesUnsupported,
}

impl RenderError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::ShaderCompile { .. }
            | Self::ProgramLink { .. }
            | Self::MissingAttribute { .. }
            | Self::ResourceAlloc { .. } => Severity::Fatal,
            Self::ExternalTexturesUnsupported => Severity::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_texture_failure_is_recoverable() {
        assert_eq!(
            RenderError::ExternalTexturesUnsupported.severity(),
            Severity::Recoverable
        );
    }

    #[test]
    fn link_failure_is_fatal() {
        let err = RenderError::ProgramLink {
            log: "oh no".into(),
        };
        assert!(err.is_fatal());
    }
}
