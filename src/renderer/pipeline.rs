//! WebGPU render pipeline setup
//!
//! One `RenderState` per canvas. Scenes arrive already in clip space.
//!
//! Vertex colours are linear, so the pipeline always draws into an sRGB
//! view. Browsers that only offer plain unorm canvas formats (WebGPU) get an
//! sRGB view format on top of the unorm surface.

use thiserror::Error;
use wgpu::util::DeviceExt;

use super::vertex::{Vertex, hex};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not open device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface offers no {0}")]
    Unsupported(&'static str),
}

/// Formats picked from a surface's capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFormats {
    /// Format the surface is configured with
    pub surface: wgpu::TextureFormat,
    /// Format the frame is viewed and rendered as
    pub view: wgpu::TextureFormat,
    pub alpha_mode: wgpu::CompositeAlphaMode,
}

impl SurfaceFormats {
    /// Prefer a native sRGB format, then one with an sRGB view variant.
    pub fn choose(caps: &wgpu::SurfaceCapabilities) -> Result<Self, RenderError> {
        let surface = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.iter().find(|f| f.add_srgb_suffix().is_srgb()))
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(RenderError::Unsupported("texture format"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::Unsupported("alpha mode"))?;
        Ok(Self {
            surface,
            view: surface.add_srgb_suffix(),
            alpha_mode,
        })
    }

    /// Extra view formats the surface must allow
    fn view_formats(&self) -> Vec<wgpu::TextureFormat> {
        if self.view == self.surface {
            vec![]
        } else {
            vec![self.view]
        }
    }
}

/// Render state for a single canvas
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub formats: SurfaceFormats,
    /// Viewport size in pixels
    pub size: (u32, u32),
    clear: wgpu::Color,
}

impl RenderState {
    /// `label` names the GPU objects; `clear_rgb` is an sRGB hex background
    pub async fn new(
        label: &str,
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        clear_rgb: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let formats = SurfaceFormats::choose(&surface.get_capabilities(adapter))?;
        if !formats.view.is_srgb() {
            log::warn!("{}: no sRGB view for {:?}, colours may be off", label, formats.surface);
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: formats.surface,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: formats.alpha_mode,
            view_formats: formats.view_formats(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: formats.view,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let [r, g, b, a] = hex(clear_rgb, 1.0);
        log::info!(
            "{} renderer ready ({}x{}, {:?} viewed as {:?})",
            label,
            width,
            height,
            formats.surface,
            formats.view
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            formats,
            size: (width, height),
            clear: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 && (new_width, new_height) != self.size {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        // Recreate buffer each frame; scenes are a few thousand vertices at most
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.formats.view),
                ..Default::default()
            });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Render, recovering from a lost surface. Other errors are logged.
    pub fn present(&mut self, vertices: &[Vertex]) {
        match self.render(vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.size;
                self.surface.configure(&self.device, &self.config);
                log::warn!("Surface lost, reconfigured at {}x{}", w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, SurfaceCapabilities, TextureFormat};

    fn caps(formats: &[TextureFormat]) -> SurfaceCapabilities {
        SurfaceCapabilities {
            formats: formats.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unorm_canvas_gets_srgb_view() {
        // What a WebGPU canvas reports
        let chosen = SurfaceFormats::choose(&caps(&[
            TextureFormat::Bgra8Unorm,
            TextureFormat::Rgba8Unorm,
            TextureFormat::Rgba16Float,
        ]))
        .unwrap();
        assert_eq!(chosen.surface, TextureFormat::Bgra8Unorm);
        assert_eq!(chosen.view, TextureFormat::Bgra8UnormSrgb);
        assert_eq!(chosen.view_formats(), vec![TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(chosen.alpha_mode, CompositeAlphaMode::Opaque);
    }

    #[test]
    fn test_native_srgb_preferred() {
        let chosen = SurfaceFormats::choose(&caps(&[
            TextureFormat::Rgba16Float,
            TextureFormat::Rgba8Unorm,
            TextureFormat::Rgba8UnormSrgb,
        ]))
        .unwrap();
        assert_eq!(chosen.surface, TextureFormat::Rgba8UnormSrgb);
        assert_eq!(chosen.view, TextureFormat::Rgba8UnormSrgb);
        assert!(chosen.view_formats().is_empty());
    }

    #[test]
    fn test_float_canvas_skipped_for_unorm() {
        let chosen = SurfaceFormats::choose(&caps(&[
            TextureFormat::Rgba16Float,
            TextureFormat::Rgba8Unorm,
        ]))
        .unwrap();
        assert_eq!(chosen.view, TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn test_empty_capabilities_are_errors() {
        assert!(matches!(
            SurfaceFormats::choose(&caps(&[])),
            Err(RenderError::Unsupported(_))
        ));

        let no_alpha = SurfaceCapabilities {
            formats: vec![TextureFormat::Rgba8UnormSrgb],
            alpha_modes: vec![],
            ..Default::default()
        };
        assert!(matches!(
            SurfaceFormats::choose(&no_alpha),
            Err(RenderError::Unsupported("alpha mode"))
        ));
    }
}
