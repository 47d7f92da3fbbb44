//! Uniform block for the point shader

use bytemuck::{Pod, Zeroable};

use crate::tier::{FrameInput, Viewport};

/// Uniform buffer layout, mirrored by `Uniforms` in the WGSL source
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position
    pub camera_pos: [f32; 4],
    /// rgb = primary color, a = opacity
    pub color: [f32; 4],
    /// rgb = secondary color, a = 1 when a secondary color is set
    pub secondary: [f32; 4],
    /// Surface size in device pixels
    pub resolution: [f32; 2],
    pub particle_size: f32,
    pub pixel_ratio: f32,
}

impl Uniforms {
    pub fn new(frame: &FrameInput<'_>, viewport: Viewport) -> Self {
        let config = frame.config;
        let [r, g, b] = config.color.to_rgb_f32();
        let secondary = match config.secondary_color {
            Some(color) => {
                let [r, g, b] = color.to_rgb_f32();
                [r, g, b, 1.0]
            }
            None => [r, g, b, 0.0],
        };
        let (width, height) = viewport.physical_size();

        Self {
            view_proj: frame.camera.view_projection().to_cols_array_2d(),
            camera_pos: frame.camera.position.extend(1.0).to_array(),
            color: [r, g, b, config.opacity],
            secondary,
            resolution: [width as f32, height as f32],
            particle_size: config.particle_size,
            pixel_ratio: viewport.pixel_ratio,
        }
    }
}
