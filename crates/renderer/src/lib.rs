//! Renderer crate for the ISF preview harness.
//!
//! Glues the preview window, the `wgpu` pipeline, and the ISF fragment
//! header together. The overall flow is:
//!
//! ```text
//!   isfview CLI
//!        │ RendererConfig
//!        ▼
//!   Renderer::run ──▶ winit event loop ──▶ FrameClock tick ──▶ GpuState::render
//! ```
//!
//! `GpuState` owns all GPU resources (surface, device, pipeline, uniforms),
//! while `Renderer` is the thin entry point that builds the window and
//! drives the fixed-rate draw loop. ISF fragment bodies are prefixed with a
//! GLSL 450 header at compile time so WebGL-style shaders build under
//! naga's GLSL front-end and receive the `TIME` and `RENDERSIZE` uniforms
//! they expect.

mod compile;
mod gpu;
mod runtime;
mod types;
mod window;

pub use compile::{
    compose_fragment_source, Shader, ShaderStage, ISF_FRAGMENT_HEADER, QUAD_VERTEX_SHADER,
};
pub use runtime::{FrameClock, SystemTimeSource, TimeSample, TimeSource};
pub use types::RendererConfig;

use anyhow::Result;

/// Thin entry point: owns the configuration and drives the preview window.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Builds the window, initialises the GPU, and blocks on the draw loop
    /// until the window is closed.
    pub fn run(self) -> Result<()> {
        window::run_preview(self.config)
    }
}
