/// WGSL shader for the lit cube (`fs_lit`) and the lamp marker (`fs_lamp`).
pub const SCENE_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
    // unit vector from a surface towards the light
    to_light: vec4<f32>,
    light_ambient: vec4<f32>,
    light_diffuse: vec4<f32>,
    light_specular: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    // w holds the shininess exponent
    specular: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var<uniform> object: Object;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.view_proj * world;
    out.world_pos = world.xyz;
    out.world_normal = (object.normal_matrix * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_lit(in: VertexOutput) -> @location(0) vec4<f32> {
    let norm = normalize(in.world_normal);
    let light_dir = frame.to_light.xyz;

    let ambient = frame.light_ambient.rgb * object.ambient.rgb;

    let diff = max(dot(norm, light_dir), 0.0);
    let diffuse = frame.light_diffuse.rgb * diff * object.diffuse.rgb;

    let view_dir = normalize(frame.view_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, norm);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), object.specular.w);
    let specular = frame.light_specular.rgb * spec * object.specular.rgb;

    return vec4<f32>(ambient + diffuse + specular, 1.0);
}

@fragment
fn fs_lamp(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
