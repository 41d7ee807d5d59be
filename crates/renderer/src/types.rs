/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags and tells the renderer which fragment
/// body to compile, how large the drawing buffer should be, and how fast
/// the draw loop should tick.
#[derive(Clone)]
pub struct RendererConfig {
    /// Drawing-buffer size in physical pixels; also fed to the shader as
    /// `RENDERSIZE` every frame.
    pub surface_size: (u32, u32),
    /// On-screen window size; the drawing buffer is scaled to fit it.
    pub display_size: (u32, u32),
    /// ISF fragment shader body, header not yet applied.
    pub fragment_body: String,
    /// Window title.
    pub window_title: String,
    /// Frames per second for the wall-clock frame schedule.
    pub target_fps: f32,
}

impl Default for RendererConfig {
    /// A 1080p drawing buffer shown at half size, 60 FPS, no shader selected.
    fn default() -> Self {
        Self {
            surface_size: (1920, 1080),
            display_size: (960, 540),
            fragment_body: String::new(),
            window_title: "ISF Preview".to_string(),
            target_fps: 60.0,
        }
    }
}
