/// WGSL shader for the terrain surface and the water plane.
///
/// Both share the vertex stage; lighting is a hemisphere term plus one
/// directional sun term.
pub const TERRAIN_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // xyz: direction towards the sun, w: intensity
    sun: vec4<f32>,
    // rgb: tint, w: intensity (sky only)
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    terrain_color: vec4<f32>,
    // rgb: color, w: opacity
    water_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_normal = vertex.normal;
    return out;
}

fn lighting(normal: vec3<f32>) -> vec3<f32> {
    let n = normalize(normal);
    let hemi_t = 0.5 * n.y + 0.5;
    let hemi = mix(uniforms.hemi_ground.rgb, uniforms.hemi_sky.rgb, hemi_t) * uniforms.hemi_sky.w;
    let sun = max(dot(n, normalize(uniforms.sun.xyz)), 0.0) * uniforms.sun.w;
    return hemi + vec3<f32>(sun);
}

@fragment
fn fs_terrain(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.terrain_color.rgb * lighting(in.world_normal), 1.0);
}

@fragment
fn fs_water(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.water_color.rgb * lighting(in.world_normal), uniforms.water_color.w);
}
"#;
