//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::scene::Rgba;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert an 8-bit sRGB color to linear floats for an sRGB surface.
/// Alpha is already linear.
pub fn to_linear(color: Rgba) -> [f32; 4] {
    fn channel(c: u8) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3] as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_linear_endpoints() {
        assert_eq!(to_linear([0, 0, 0, 255]), [0.0, 0.0, 0.0, 1.0]);
        let white = to_linear([255, 255, 255, 0]);
        assert!((white[0] - 1.0).abs() < 1e-6);
        assert_eq!(white[3], 0.0);
        // Mid grey is darker in linear space
        assert!(to_linear([128, 128, 128, 255])[0] < 0.5);
    }
}
