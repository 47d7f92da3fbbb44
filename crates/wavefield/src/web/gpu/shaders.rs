//! WGSL source for the point renderer

/// Instanced soft-disc sprites
///
/// Each instance is one grid point (`offset`, `scale`); six vertices expand
/// it into a screen-aligned quad whose side is the attenuated point size.
pub const SHADER_POINTS: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    color: vec4<f32>,
    secondary: vec4<f32>,
    resolution: vec2<f32>,
    particle_size: f32,
    pixel_ratio: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

const POINT_ATTENUATION: f32 = 300.0;
const DISC_INNER_RADIUS: f32 = 0.4;
const DISC_OUTER_RADIUS: f32 = 0.5;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) scale: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) offset: vec3<f32>,
    @location(1) scale: f32,
) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );
    let corner = corners[vertex_index];

    let clip = uniforms.view_proj * vec4<f32>(offset, 1.0);
    let distance = max(length(uniforms.camera_pos.xyz - offset), 1.0);
    let size_px = uniforms.particle_size * scale * POINT_ATTENUATION / distance * uniforms.pixel_ratio;
    // Pixel diameter -> clip-space extent (NDC spans 2 units)
    let extent = corner * size_px * 2.0 / uniforms.resolution;

    var out: VsOut;
    out.position = clip + vec4<f32>(extent * clip.w, 0.0, 0.0);
    out.corner = corner;
    out.scale = scale;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let r = length(in.corner);
    if (r > DISC_OUTER_RADIUS) {
        discard;
    }
    let disc = 1.0 - smoothstep(DISC_INNER_RADIUS, DISC_OUTER_RADIUS, r);
    let mix_amount = clamp(in.scale / 2.0, 0.0, 1.0) * uniforms.secondary.a;
    let rgb = mix(uniforms.color.rgb, uniforms.secondary.rgb, mix_amount);
    let alpha = disc * uniforms.color.a;
    // Premultiplied output
    return vec4<f32>(rgb * alpha, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{DISC_INNER_RADIUS, POINT_ATTENUATION};

    #[test]
    fn test_shader_constants_match_cpu_math() {
        assert!(SHADER_POINTS.contains(&format!("POINT_ATTENUATION: f32 = {:.1};", POINT_ATTENUATION)));
        assert!(SHADER_POINTS.contains(&format!("DISC_INNER_RADIUS: f32 = {:.1};", DISC_INNER_RADIUS)));
    }

    #[test]
    fn test_shader_entry_points() {
        assert!(SHADER_POINTS.contains("fn vs_main("));
        assert!(SHADER_POINTS.contains("fn fs_main("));
    }
}
