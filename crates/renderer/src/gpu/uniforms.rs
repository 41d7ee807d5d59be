use bytemuck::{Pod, Zeroable};

/// Std140 contents of the `IsfParams` uniform block declared by the
/// fragment header in `compile.rs`. Field order and padding must match the
/// GLSL declaration exactly.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct IsfUniforms {
    pub render_size: [f32; 2],
    pub time: f32,
    pub _padding: f32,
}

/// Byte offsets of the animated members within the block, resolved once and
/// used for per-frame writes.
pub(crate) const RENDER_SIZE_OFFSET: wgpu::BufferAddress = 0;
pub(crate) const TIME_OFFSET: wgpu::BufferAddress = 8;

impl IsfUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            render_size: [width as f32, height as f32],
            time: 0.0,
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<IsfUniforms>(), 16);
    }

    #[test]
    fn offsets_match_the_std140_layout() {
        let uniforms = IsfUniforms {
            render_size: [1920.0, 1080.0],
            time: 2.5,
            _padding: 0.0,
        };
        let bytes = bytemuck::bytes_of(&uniforms);

        let width = f32::from_ne_bytes(bytes[0..4].try_into().unwrap());
        let height = f32::from_ne_bytes(bytes[4..8].try_into().unwrap());
        let time_start = TIME_OFFSET as usize;
        let time = f32::from_ne_bytes(bytes[time_start..time_start + 4].try_into().unwrap());

        assert_eq!(RENDER_SIZE_OFFSET, 0);
        assert_eq!(width, 1920.0);
        assert_eq!(height, 1080.0);
        assert_eq!(time, 2.5);
    }

    #[test]
    fn new_starts_at_time_zero() {
        let uniforms = IsfUniforms::new(1920, 1080);
        assert_eq!(uniforms.render_size, [1920.0, 1080.0]);
        assert_eq!(uniforms.time, 0.0);
    }
}
