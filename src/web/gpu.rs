//! Async renderer creation for a canvas

use std::rc::Rc;

use thiserror::Error;
use web_sys::HtmlCanvasElement;

use galaxy_portfolio::renderer::{RenderError, RenderState};

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("could not create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// WebGPU first, WebGL2 as fallback
pub fn instance() -> Rc<wgpu::Instance> {
    Rc::new(wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    }))
}

/// Build a renderer for `canvas` at its current pixel size.
/// The adapter is requested per surface because a WebGL context belongs to
/// a single canvas.
pub async fn create_renderer(
    instance: Rc<wgpu::Instance>,
    canvas: HtmlCanvasElement,
    label: &'static str,
    clear_rgb: u32,
) -> Result<RenderState, GpuError> {
    let (width, height) = (canvas.width(), canvas.height());
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;
    log::info!("{} adapter: {:?}", label, adapter.get_info().name);

    Ok(RenderState::new(label, surface, &adapter, width, height, clear_rgb).await?)
}
