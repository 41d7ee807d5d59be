use std::borrow::Cow;

use tracing::error;
use wgpu::naga;

/// Pipeline stage a [`Shader`] compiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// One GPU shader-stage object plus the outcome of its last compile.
///
/// Compile failure is not an error value: it is recorded on the object as a
/// status flag and a diagnostic log, and the caller decides what to do with
/// it. Compiling again replaces the previous module.
pub struct Shader {
    stage: ShaderStage,
    module: Option<wgpu::ShaderModule>,
    status: Option<bool>,
    info_log: String,
}

impl Shader {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            module: None,
            status: None,
            info_log: String::new(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compiles `source` for this stage.
    ///
    /// The source is trimmed before submission. Diagnostics are captured
    /// through a wgpu validation error scope, so a broken shader surfaces
    /// here instead of reaching the device's uncaptured-error handler.
    pub fn compile(&mut self, device: &wgpu::Device, source: &str) {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.stage.name()),
            source: wgpu::ShaderSource::Glsl {
                shader: Cow::Owned(source.trim().to_string()),
                stage: self.stage.to_naga(),
                defines: &[],
            },
        });

        match pollster::block_on(device.pop_error_scope()) {
            None => {
                self.module = Some(module);
                self.status = Some(true);
                self.info_log = String::new();
            }
            Some(err) => {
                self.module = None;
                self.status = Some(false);
                self.info_log = err.to_string();
            }
        }
    }

    /// `None` before any compile, `Some(success)` afterwards.
    pub fn compile_status(&self) -> Option<bool> {
        self.status
    }

    /// Compiler diagnostics from the last compile; empty on success.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }

    pub(crate) fn module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }
}

/// Compiles the static full-screen-quad vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Shader {
    let mut shader = Shader::new(ShaderStage::Vertex);
    shader.compile(device, QUAD_VERTEX_SHADER);
    if shader.compile_status() != Some(true) {
        error!("failed to compile vertex shader:\n{}", shader.info_log());
    }
    shader
}

/// Prefixes `body` with the ISF header and compiles it as the fragment stage.
pub(crate) fn compile_isf_fragment_shader(device: &wgpu::Device, body: &str) -> Shader {
    let mut shader = Shader::new(ShaderStage::Fragment);
    shader.compile(device, &compose_fragment_source(ISF_FRAGMENT_HEADER, body));
    if shader.compile_status() != Some(true) {
        error!("failed to compile fragment shader:\n{}", shader.info_log());
    }
    shader
}

/// Joins the fixed ISF header and a user shader body into one compile unit.
///
/// The header must precede the body so its declarations are visible to the
/// user code; only `compile` trims, never the concatenation itself.
pub fn compose_fragment_source(header: &str, body: &str) -> String {
    format!("{header}\n\n{body}")
}

/// GLSL prologue injected ahead of every ISF fragment shader.
///
/// The uniform block layout must match `IsfUniforms` in `gpu/uniforms.rs`.
/// The macros map the WebGL-era ISF names onto the block members so
/// unmodified ISF bodies compile as GLSL 450.
pub const ISF_FRAGMENT_HEADER: &str = r"#version 450
layout(location = 0) out vec4 isf_fragColor;

layout(std140, set = 0, binding = 0) uniform IsfParams {
    vec2 _RENDERSIZE;
    float _TIME;
    float _isf_pad;
} isf;

#define RENDERSIZE isf._RENDERSIZE
#define TIME isf._TIME
#define gl_FragColor isf_fragColor
#define isf_FragNormCoord (vec2(gl_FragCoord.x / RENDERSIZE.x, 1.0 - gl_FragCoord.y / RENDERSIZE.y))
";

/// Full-screen quad vertex shader; positions arrive from the vertex buffer.
pub const QUAD_VERTEX_SHADER: &str = r"#version 450
layout(location = 0) in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_header_then_body_with_blank_line() {
        assert_eq!(compose_fragment_source("HEADER", "BODY"), "HEADER\n\nBODY");
    }

    #[test]
    fn concatenation_boundary_is_untrimmed() {
        let composed = compose_fragment_source(ISF_FRAGMENT_HEADER, "void main() {}\n");
        assert!(composed.starts_with(ISF_FRAGMENT_HEADER));
        assert!(composed.ends_with("void main() {}\n"));
    }

    #[test]
    fn header_declares_isf_uniform_aliases() {
        assert!(ISF_FRAGMENT_HEADER.contains("#define TIME"));
        assert!(ISF_FRAGMENT_HEADER.contains("#define RENDERSIZE"));
        assert!(ISF_FRAGMENT_HEADER.contains("#define gl_FragColor"));
        assert!(ISF_FRAGMENT_HEADER.contains("isf_FragNormCoord"));
    }

    #[test]
    fn vertex_shader_exposes_position_attribute() {
        assert!(QUAD_VERTEX_SHADER.contains("in vec2 position"));
    }

    #[test]
    fn stage_names_match_pipeline_stages() {
        assert_eq!(ShaderStage::Vertex.name(), "vertex");
        assert_eq!(ShaderStage::Fragment.name(), "fragment");
    }
}
