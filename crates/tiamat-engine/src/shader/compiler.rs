use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::FatalError;

/// Pipeline stage a shader program is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    /// Target-profile label used in diagnostics, mirroring the
    /// stage/profile pair handed to the compiler.
    pub fn profile(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs/wgsl",
            ShaderStage::Pixel => "ps/wgsl",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Pixel => f.write_str("pixel"),
        }
    }
}

/// Shader source text plus the entry point and stage it targets.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub path: PathBuf,
    pub text: String,
}

impl ShaderSource {
    /// Reads shader source from disk.
    ///
    /// A missing or unreadable file is a compile failure for its stage: the
    /// collaborator's contract is source-in, program-out, and both ends of
    /// that can fail.
    pub fn load(
        path: impl AsRef<Path>,
        entry_point: &str,
        stage: ShaderStage,
    ) -> Result<Self, FatalError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FatalError::Compile {
            stage,
            diagnostics: format!("cannot read {}: {e}", path.display()),
        })?;

        Ok(Self {
            stage,
            entry_point: entry_point.to_string(),
            path: path.to_path_buf(),
            text,
        })
    }
}

/// A validated shader module plus its entry point.
pub struct CompiledShader {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub module: wgpu::ShaderModule,
}

/// Compiles `source` into an executable module, surfacing validation
/// diagnostics on failure.
///
/// wgpu reports shader validation through error scopes rather than a return
/// value; the scope is drained synchronously since compilation happens once
/// at startup.
pub fn compile(device: &wgpu::Device, source: &ShaderSource) -> Result<CompiledShader, FatalError> {
    log::debug!(
        "compiling {} shader ({}) from {}",
        source.stage,
        source.stage.profile(),
        source.path.display()
    );

    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(source.stage.profile()),
        source: wgpu::ShaderSource::Wgsl(source.text.as_str().into()),
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(FatalError::Compile {
            stage: source.stage,
            diagnostics: err.to_string(),
        });
    }

    Ok(CompiledShader {
        stage: source.stage,
        entry_point: source.entry_point.clone(),
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── source loading ────────────────────────────────────────────────────

    #[test]
    fn load_missing_file_is_a_compile_error_for_its_stage() {
        let err = ShaderSource::load("does/not/exist.wgsl", "main", ShaderStage::Pixel)
            .expect_err("missing file must fail");
        match err {
            FatalError::Compile { stage, diagnostics } => {
                assert_eq!(stage, ShaderStage::Pixel);
                assert!(diagnostics.contains("does/not/exist.wgsl"));
            }
            other => panic!("expected Compile, got {other:?}"),
        }
    }

    #[test]
    fn profiles_are_stage_distinct() {
        assert_ne!(ShaderStage::Vertex.profile(), ShaderStage::Pixel.profile());
    }
}
