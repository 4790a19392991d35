//! Shader compilation collaborator.
//!
//! Invoked exactly twice at startup (vertex and pixel stages); there is no
//! runtime recompilation, hot reload, or fallback program. Source files are
//! read-only inputs resolved against the working directory logged at
//! startup.

mod compiler;

pub use compiler::{compile, CompiledShader, ShaderSource, ShaderStage};
