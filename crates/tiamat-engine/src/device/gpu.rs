use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::FatalError;

/// Depth-stencil target format: 24-bit depth + 8-bit stencil.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Initialization parameters for the display path.
///
/// Keep this structure minimal; the harness has exactly one presentation
/// configuration for the process lifetime.
#[derive(Debug, Clone)]
pub struct DisplayInit {
    /// Present mode (swap behavior). FIFO is the vsync'd refresh-rate hint
    /// and is universally supported.
    pub present_mode: wgpu::PresentMode,

    /// Desired maximum frame latency for the surface. A hint; support
    /// depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for DisplayInit {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Owns the wgpu core objects, the configured surface, and the depth target.
///
/// All other GPU resources are logically children of this context and must
/// not outlive it. Teardown is structural: wgpu handles release their
/// resources on drop, so acquisition/release pairing needs no manual
/// ordering at shutdown.
pub struct Gpu<'w> {
    /// wgpu instance used to create the adapter and surface.
    instance: wgpu::Instance,

    /// Surface bound to the window. The window must outlive this context;
    /// the `'w` borrow enforces it.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration (fixed for the process lifetime).
    config: wgpu::SurfaceConfiguration,

    /// Depth-stencil image matching the surface dimensions, created once
    /// and reused every frame.
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,

    /// Drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

/// A single acquired frame: the swapchain back-buffer, a render-target view
/// over it, and the command encoder for this frame's pass.
///
/// Short-lived; holding the surface texture blocks acquisition of the next
/// back-buffer.
pub struct Frame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> Gpu<'w> {
    /// Creates the device, configures the swapchain for `window`, and
    /// allocates the matching depth-stencil target.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers block
    /// with `pollster`. Every step failing here is fatal — there is no
    /// fallback adapter or deferred retry.
    pub async fn new(window: &'w Window, init: DisplayInit) -> Result<Self, FatalError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(FatalError::Config(format!(
                "window has zero size ({}x{})",
                size.width, size.height
            )));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        log_adapters(&instance);

        let surface = instance
            .create_surface(window)
            .map_err(|e| FatalError::resource("creating surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| FatalError::resource("requesting adapter", e))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tiamat device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| FatalError::resource("creating device/queue", e))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&surface_caps).ok_or_else(|| {
            FatalError::resource("selecting surface format", "no 8-bit-per-channel format")
        })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        // Depth target must match the swapchain's width/height exactly;
        // both come from `size`, so the invariant holds by construction.
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tiamat depth target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::info!(
            "display ready: {}x{} {:?}, present mode {:?}",
            size.width,
            size.height,
            format,
            init.present_mode
        );

        Ok(Gpu {
            instance,
            surface,
            adapter,
            device,
            queue,
            config,
            depth_texture,
            depth_view,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the depth-stencil view bound alongside the render target.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Acquires the next back-buffer and creates this frame's encoder.
    ///
    /// Surface errors are fatal: post-setup recovery (lost device, resize)
    /// is outside this harness's model.
    pub fn begin_frame(&self) -> Result<Frame, FatalError> {
        let surface_texture = self
            .surface
            .get_current_texture()
            .map_err(|e| FatalError::resource("acquiring back-buffer", e))?;

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tiamat frame encoder"),
            });

        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's recorded commands and presents the back-buffer.
    ///
    /// Fire-and-forget: the only blocking is whatever the swapchain enforces
    /// for vsync.
    pub fn present(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }
}

/// Logs every visible adapter before selection, for startup diagnostics.
fn log_adapters(instance: &wgpu::Instance) {
    for adapter in pollster::block_on(instance.enumerate_adapters(wgpu::Backends::all())) {
        let info = adapter.get_info();
        log::info!(
            "adapter: {} [{:?}/{:?}] vendor={:#06x} device={:#06x}",
            info.name,
            info.device_type,
            info.backend,
            info.vendor,
            info.device
        );
    }
}

/// Picks a fixed 8-bit-per-channel color format from the surface caps.
fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    let preferred = [
        wgpu::TextureFormat::Bgra8Unorm,
        wgpu::TextureFormat::Rgba8Unorm,
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    for f in preferred {
        if caps.formats.contains(&f) {
            return Some(f);
        }
    }
    None
}
