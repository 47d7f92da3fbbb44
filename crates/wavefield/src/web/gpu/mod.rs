//! GPU point tier
//!
//! Draws every grid point with one instanced draw call: six vertices per
//! instance, two instance buffers (`vec3` position, `f32` scale) refreshed
//! from [`FieldGeometry`](crate::geometry::FieldGeometry) each frame.

mod init;
mod shaders;
mod uniforms;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use self::init::*;
use self::uniforms::Uniforms;
use super::dom_error;
use crate::config::RenderConfig;
use crate::geometry::FieldGeometry;
use crate::tier::{FrameInput, TierError, TierKind, TierRenderer, Viewport};

/// Vertices per point quad (two triangles)
const QUAD_VERTICES: u32 = 6;

const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("inset", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("display", "block"),
];

/// wgpu resources created after the canvas is in place
struct GpuResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    scale_buffer: wgpu::Buffer,
}

/// Instanced point renderer on WebGPU or WebGL2
pub struct GpuPointRenderer {
    canvas: HtmlCanvasElement,
    gpu: GpuResources,
    instance_count: u32,
    viewport: Viewport,
    /// Set from the device-lost callback
    lost: Arc<AtomicBool>,
    disposed: bool,
}

impl GpuPointRenderer {
    /// Create a canvas inside `surface` and bring up the device
    ///
    /// The canvas is removed again if any step fails.
    pub async fn new(
        document: &Document,
        surface: HtmlElement,
        config: &RenderConfig,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<Self, TierError> {
        let canvas = create_canvas(document, viewport)?;
        surface
            .append_child(&canvas)
            .map_err(|e| dom_error("append canvas", e))?;

        match Self::setup_gpu(canvas.clone(), geometry, viewport).await {
            Ok(gpu) => {
                let lost = Arc::new(AtomicBool::new(false));
                let flag = Arc::clone(&lost);
                gpu.device.set_device_lost_callback(move |reason, message| {
                    tracing::warn!("[gpu] Device lost ({:?}): {}", reason, message);
                    flag.store(true, Ordering::SeqCst);
                });

                tracing::info!(
                    "[gpu] Initialized: {} points, {}x{} @{}x, color {}",
                    geometry.point_count(),
                    gpu.surface_config.width,
                    gpu.surface_config.height,
                    viewport.pixel_ratio,
                    config.color.to_css()
                );
                Ok(Self {
                    canvas,
                    gpu,
                    instance_count: geometry.point_count() as u32,
                    viewport,
                    lost,
                    disposed: false,
                })
            }
            Err(err) => {
                canvas.remove();
                Err(err)
            }
        }
    }

    async fn setup_gpu(
        canvas: HtmlCanvasElement,
        geometry: &FieldGeometry,
        viewport: Viewport,
    ) -> Result<GpuResources, TierError> {
        let (width, height) = viewport.physical_size();
        let (instance, surface) = create_surface(canvas).await?;
        let (device, queue, adapter) = create_device(&instance, &surface).await?;
        let surface_config = configure_surface(&surface, &adapter, &device, width, height)?;
        let (uniform_buffer, bind_group_layout, bind_group) = create_uniform_resources(&device);
        let (position_buffer, scale_buffer) =
            create_instance_buffers(&device, geometry.positions(), geometry.scales());
        let pipeline = create_point_pipeline(&device, &bind_group_layout, surface_config.format);

        Ok(GpuResources {
            device,
            queue,
            surface,
            surface_config,
            pipeline,
            bind_group,
            uniform_buffer,
            position_buffer,
            scale_buffer,
        })
    }

    fn surface_texture(&mut self) -> Result<wgpu::SurfaceTexture, TierError> {
        match self.gpu.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu
                    .surface
                    .configure(&self.gpu.device, &self.gpu.surface_config);
                Err(TierError::FrameSkipped("surface reconfigured".to_string()))
            }
            Err(wgpu::SurfaceError::Timeout) => {
                Err(TierError::FrameSkipped("GPU timeout".to_string()))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(TierError::DeviceLost("out of GPU memory".to_string()))
            }
        }
    }
}

impl TierRenderer for GpuPointRenderer {
    fn kind(&self) -> TierKind {
        TierKind::Gpu
    }

    fn paint(&mut self, frame: &FrameInput<'_>) -> Result<(), TierError> {
        if self.disposed {
            return Ok(());
        }
        if self.lost.load(Ordering::SeqCst) {
            return Err(TierError::DeviceLost("device lost".to_string()));
        }
        if frame.geometry.point_count() != self.instance_count as usize {
            return Err(TierError::FrameSkipped(format!(
                "geometry has {} points, buffers hold {}",
                frame.geometry.point_count(),
                self.instance_count
            )));
        }

        let uniforms = Uniforms::new(frame, self.viewport);
        let queue = &self.gpu.queue;
        queue.write_buffer(&self.gpu.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        queue.write_buffer(
            &self.gpu.position_buffer,
            0,
            bytemuck::cast_slice(frame.geometry.positions()),
        );
        queue.write_buffer(
            &self.gpu.scale_buffer,
            0,
            bytemuck::cast_slice(frame.geometry.scales()),
        );

        let output = self.surface_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Wave Field Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wave Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.gpu.pipeline);
            render_pass.set_bind_group(0, &self.gpu.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.gpu.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.gpu.scale_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES, 0..self.instance_count);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        let (width, height) = viewport.physical_size();
        self.viewport = viewport;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gpu.surface_config.width = width;
        self.gpu.surface_config.height = height;
        self.gpu
            .surface
            .configure(&self.gpu.device, &self.gpu.surface_config);
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.gpu.position_buffer.destroy();
        self.gpu.scale_buffer.destroy();
        self.gpu.uniform_buffer.destroy();
        self.canvas.remove();
        self.disposed = true;
        tracing::debug!("[gpu] Disposed");
    }
}

/// Canvas sized in device pixels (ratio applied first), stretched by CSS
fn create_canvas(document: &Document, viewport: Viewport) -> Result<HtmlCanvasElement, TierError> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| dom_error("create canvas", e))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| TierError::ContextUnavailable("canvas element unavailable".to_string()))?;

    let (width, height) = viewport.physical_size();
    canvas.set_width(width);
    canvas.set_height(height);

    let style = canvas.style();
    for (name, value) in CANVAS_STYLE {
        style
            .set_property(name, value)
            .map_err(|e| dom_error("style canvas", e))?;
    }
    Ok(canvas)
}
