/// WGSL shader for the lit, optionally textured demo meshes and game
/// objects. The `FrameUniforms` struct must stay layout-identical to the
/// Rust side.
pub const MESH_SHADER: &str = r#"
struct FrameUniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    world: mat4x4<f32>,
    diffuse_light: vec4<f32>,
    diffuse_material: vec4<f32>,
    ambient_light: vec4<f32>,
    ambient_material: vec4<f32>,
    specular_light: vec4<f32>,
    specular_material: vec4<f32>,
    light_dir: vec3<f32>,
    elapsed: f32,
    camera_pos: vec3<f32>,
    specular_power: f32,
    has_texture: u32,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniforms;
@group(0) @binding(1)
var base_texture: texture_2d<f32>;
@group(0) @binding(2)
var base_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) texcoord: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) texcoord: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = frame.world * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((frame.world * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.texcoord = vertex.texcoord;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let to_light = normalize(-frame.light_dir);
    let to_eye = normalize(frame.camera_pos - in.world_pos);

    let diffuse_amount = max(dot(n, to_light), 0.0);
    let diffuse = diffuse_amount * frame.diffuse_light * frame.diffuse_material;
    let ambient = frame.ambient_light * frame.ambient_material;

    let halfway = normalize(to_light + to_eye);
    let spec_amount = pow(max(dot(n, halfway), 0.0), frame.specular_power);
    let specular = spec_amount * frame.specular_light * frame.specular_material;

    // Sampling stays in uniform control flow; the flag only selects.
    let sampled = textureSample(base_texture, base_sampler, in.texcoord);
    let base = select(vec4<f32>(1.0), sampled, frame.has_texture == 1u);

    let color = base.rgb * (ambient + diffuse).rgb + specular.rgb;
    return vec4<f32>(color, base.a);
}
"#;

/// WGSL shader for the marker line: transformed position, vertex color
/// carried in the normal slot, no lighting.
pub const LINE_SHADER: &str = r#"
struct FrameUniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    world: mat4x4<f32>,
    diffuse_light: vec4<f32>,
    diffuse_material: vec4<f32>,
    ambient_light: vec4<f32>,
    ambient_material: vec4<f32>,
    specular_light: vec4<f32>,
    specular_material: vec4<f32>,
    light_dir: vec3<f32>,
    elapsed: f32,
    camera_pos: vec3<f32>,
    specular_power: f32,
    has_texture: u32,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniforms;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) texcoord: vec2<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = frame.projection * frame.view * frame.world * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;
