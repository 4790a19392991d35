//! Two overlapping quads at different depths, rendered with the tiamat
//! engine: static geometry uploaded once, a fixed camera, and an animated
//! clear color behind them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;

use tiamat_engine::core::{App, AppControl, FrameCtx};
use tiamat_engine::device::Gpu;
use tiamat_engine::error::FatalError;
use tiamat_engine::frame::{ClearPulse, DrawRange, LoopDriver};
use tiamat_engine::input::{EventDispatch, Key, Reaction};
use tiamat_engine::logging::{init_logging, LoggingConfig};
use tiamat_engine::mesh::{perspective, Camera, Transform, Vertex};
use tiamat_engine::render::Renderer;
use tiamat_engine::shader::{ShaderSource, ShaderStage};
use tiamat_engine::window::{Runtime, RuntimeConfig};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Exit code for any fatal condition (device, resource, or shader-compile
/// failure). Quit-triggered shutdown exits 0.
const FATAL_EXIT_CODE: u8 = 2;

/// The static scene: 8 vertices forming two quads, indexed as two spans of
/// the shared index buffer, one draw range per quad.
fn two_quad_scene() -> (Vec<Vertex>, Vec<u32>, Vec<DrawRange>) {
    let vertices = vec![
        // Front quad, warm colors, nearer the camera.
        Vertex::new([-0.7, -0.5, 0.5], [1.0, 0.0, 0.0, 1.0]),
        Vertex::new([-0.7, 0.5, 0.5], [1.0, 0.5, 0.0, 1.0]),
        Vertex::new([0.3, 0.5, 0.5], [1.0, 1.0, 0.0, 1.0]),
        Vertex::new([0.3, -0.5, 0.5], [1.0, 0.0, 0.5, 1.0]),
        // Back quad, cool colors, overlapping the front one.
        Vertex::new([-0.3, -0.3, 0.7], [0.0, 0.0, 1.0, 1.0]),
        Vertex::new([-0.3, 0.7, 0.7], [0.0, 0.5, 1.0, 1.0]),
        Vertex::new([0.7, 0.7, 0.7], [0.0, 1.0, 1.0, 1.0]),
        Vertex::new([0.7, -0.3, 0.7], [0.5, 0.0, 1.0, 1.0]),
    ];

    let indices = vec![
        0, 1, 2, 0, 2, 3, // front quad
        4, 5, 6, 4, 6, 7, // back quad
    ];

    let draws = vec![DrawRange::new(0, 6), DrawRange::new(6, 6)];

    (vertices, indices, draws)
}

fn scene_transform() -> Transform {
    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, -2.5),
        target: Vec3::ZERO,
        up: Vec3::Y,
    };

    Transform {
        world: Mat4::IDENTITY,
        view: camera.view(),
        projection: perspective(
            std::f32::consts::FRAC_PI_4,
            WIDTH as f32 / HEIGHT as f32,
            0.1,
            100.0,
        ),
    }
}

struct Viewer {
    shader_dir: PathBuf,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    transform: Transform,
    renderer: Option<Renderer>,
}

impl App for Viewer {
    fn on_ready(&mut self, gpu: &Gpu<'_>) -> Result<(), FatalError> {
        // Both stages compile before any buffer exists; a diagnostic from
        // either aborts setup with nothing else allocated.
        let vs = ShaderSource::load(
            self.shader_dir.join("vertex.wgsl"),
            "main",
            ShaderStage::Vertex,
        )?;
        let ps = ShaderSource::load(
            self.shader_dir.join("pixel.wgsl"),
            "main",
            ShaderStage::Pixel,
        )?;

        let renderer = Renderer::create(
            gpu,
            &vs,
            &ps,
            &self.vertices,
            &self.indices,
            &self.transform,
        )?;
        self.renderer = Some(renderer);

        log::info!("scene ready: {} vertices, {} indices", self.vertices.len(), self.indices.len());
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl, FatalError> {
        let Some(renderer) = self.renderer.as_ref() else {
            return Err(FatalError::Config(
                "frame callback before scene setup".to_string(),
            ));
        };

        renderer.render_frame(ctx.gpu, ctx.plan)?;
        Ok(AppControl::Continue)
    }
}

fn run() -> anyhow::Result<()> {
    let (vertices, indices, draws) = two_quad_scene();

    let viewer = Viewer {
        shader_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders"),
        vertices,
        indices,
        transform: scene_transform(),
        renderer: None,
    };

    let config = RuntimeConfig {
        title: "tiamat viewer".to_string(),
        size: PhysicalSize::new(WIDTH, HEIGHT),
        ..Default::default()
    };

    let driver = LoopDriver::new(ClearPulse::default(), draws);

    // Escape asks the window layer to close; everything else is ignored.
    let dispatch = EventDispatch::new().on_key_down(|key| {
        if key == Key::Escape {
            Reaction::RequestClose
        } else {
            Reaction::None
        }
    });

    Runtime::run(config, dispatch, driver, viewer).context("render harness terminated")
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    // Shader sources resolve against paths logged here; keep this early for
    // diagnosing missing-file compile errors.
    match std::env::current_dir() {
        Ok(cwd) => log::info!("working directory: {}", cwd.display()),
        Err(e) => log::warn!("working directory unavailable: {e}"),
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("tiamat-viewer: fatal: {err:#}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiamat_engine::mesh::validate_indices;

    // ── scene integrity ───────────────────────────────────────────────────

    #[test]
    fn scene_indices_reference_existing_vertices() {
        let (vertices, indices, _) = two_quad_scene();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 12);
        validate_indices(&indices, vertices.len()).expect("all indices in range");
    }

    #[test]
    fn draw_ranges_split_the_index_buffer_per_quad() {
        let (_, indices, draws) = two_quad_scene();
        assert_eq!(draws.len(), 2);
        assert_eq!((draws[0].first_index, draws[0].end()), (0, 6));
        assert_eq!((draws[1].first_index, draws[1].end()), (6, 12));
        assert_eq!(draws.iter().map(|d| d.index_count).sum::<u32>() as usize, indices.len());
    }

    #[test]
    fn quads_sit_at_distinct_depths() {
        let (vertices, _, _) = two_quad_scene();
        let front: Vec<f32> = vertices[..4].iter().map(|v| v.position[2]).collect();
        let back: Vec<f32> = vertices[4..].iter().map(|v| v.position[2]).collect();
        assert!(front.iter().all(|&z| z < back[0]));
        assert!(back.iter().all(|&z| z == back[0]));
    }

    #[test]
    fn camera_faces_the_scene() {
        let t = scene_transform();
        // Both quads must land inside clip space after projection.
        let center = t.wvp().project_point3(Vec3::new(0.0, 0.0, 0.5));
        assert!(center.x.abs() <= 1.0 && center.y.abs() <= 1.0);
        assert!(center.z > 0.0 && center.z < 1.0);
    }
}
