/// WGSL shader for the textured cube grid.
///
/// Group 0 holds the uniform matrix, group 1 the atlas sampler and texture.
pub const CUBE_SHADER: &str = r#"
struct Uniforms {
    matrix: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var atlas_sampler: sampler;
@group(1) @binding(1)
var atlas_texture: texture_2d<f32>;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.matrix * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(atlas_texture, atlas_sampler, in.uv);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_and_bindings() {
        assert!(CUBE_SHADER.contains("fn vs_main"));
        assert!(CUBE_SHADER.contains("fn fs_main"));
        assert!(CUBE_SHADER.contains("@group(1) @binding(1)"));
        assert!(CUBE_SHADER.contains("@location(1) uv: vec2<f32>"));
    }
}
