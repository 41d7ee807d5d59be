use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use tracing::{error, info, trace};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::runtime::{FrameClock, SystemTimeSource, TimeSource};
use crate::types::RendererConfig;

/// Builds the preview window and blocks on the draw loop until close.
///
/// The window shows the fixed-size drawing buffer scaled down to the
/// display size; resizing is disabled and resize events are ignored.
pub(crate) fn run_preview(config: RendererConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let display_size = PhysicalSize::new(config.display_size.0, config.display_size.1);
    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(display_size)
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create preview window: {err}"))?;
    let window = Arc::new(window);

    let buffer_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let mut gpu = GpuState::new(window.as_ref(), buffer_size, &config.fragment_body)?;

    info!(
        buffer_width = buffer_size.width,
        buffer_height = buffer_size.height,
        display_width = display_size.width,
        display_height = display_size.height,
        fps = config.target_fps,
        "starting preview loop"
    );

    let mut clock = FrameClock::new(config.target_fps);
    let mut time_source = SystemTimeSource::new();
    clock.start(Instant::now());
    time_source.reset();
    window.request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => match gpu.render(time_source.sample()) {
                    Ok(()) => clock.mark_rendered(),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("surface out of memory; exiting preview");
                        elwt.exit();
                    }
                    Err(err) => {
                        error!(?err, "surface error; retrying next frame");
                    }
                },
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if clock.ready_for_frame(now) {
                    trace!("frame due; requesting redraw");
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = clock.next_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
