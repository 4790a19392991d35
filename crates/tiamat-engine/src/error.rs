//! Error taxonomy for the rendering harness.
//!
//! Every failure class here is terminal: there is no partial-pipeline mode,
//! no device-lost recovery, and no fallback shader program. The first error
//! during setup aborts everything downstream via plain `?` propagation.

use crate::shader::ShaderStage;

/// Unrecoverable failure surfaced to the process entry point.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// Invalid arguments to an initialization call (layout/stride mismatch,
    /// out-of-range index data). Programming defect class; never expected
    /// at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// Device/adapter/surface/buffer/texture creation failed.
    #[error("resource error while {what}: {detail}")]
    Resource { what: &'static str, detail: String },

    /// Shader source failed to load or validate. Carries the diagnostic
    /// text produced by the compiler.
    #[error("{stage} shader failed to compile: {diagnostics}")]
    Compile {
        stage: ShaderStage,
        diagnostics: String,
    },
}

impl FatalError {
    /// Wraps an underlying creation error with the step it occurred in.
    pub fn resource(what: &'static str, err: impl std::fmt::Display) -> Self {
        FatalError::Resource {
            what,
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_message_names_the_step() {
        let e = FatalError::resource("creating depth target", "out of memory");
        let msg = e.to_string();
        assert!(msg.contains("creating depth target"));
        assert!(msg.contains("out of memory"));
    }

    #[test]
    fn compile_message_carries_diagnostics() {
        let e = FatalError::Compile {
            stage: ShaderStage::Vertex,
            diagnostics: "unknown identifier `positon`".to_string(),
        };
        assert!(e.to_string().contains("unknown identifier"));
        assert!(e.to_string().contains("vertex"));
    }
}
