use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use litcube_render::RenderView;
use litcube_scene::{Light, Material, Scene};
use wgpu::util::DeviceExt;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    view_pos: [f32; 4],
    to_light: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
}

impl FrameUniforms {
    fn new(view: &RenderView, light: &Light) -> Self {
        Self {
            view_proj: view.view_projection().to_cols_array_2d(),
            view_pos: view.eye.extend(1.0).to_array(),
            to_light: light.to_light().extend(0.0).to_array(),
            light_ambient: light.ambient.extend(1.0).to_array(),
            light_diffuse: light.diffuse.extend(1.0).to_array(),
            light_specular: light.specular.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
}

impl ObjectUniforms {
    fn new(model: Mat4, material: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            ambient: material.ambient.extend(1.0).to_array(),
            diffuse: material.diffuse.extend(1.0).to_array(),
            specular: material.specular.extend(material.shininess).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Generate unit cube vertices and indices.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Lit and lamp pipelines for one polygon mode.
struct PipelinePair {
    lit: wgpu::RenderPipeline,
    lamp: wgpu::RenderPipeline,
}

/// A uniform buffer with its bind group.
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new<T: Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        contents: &T,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(contents),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write<T: Pod>(&self, queue: &wgpu::Queue, contents: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(contents));
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    surface_format: wgpu::TextureFormat,
    polygon_mode: wgpu::PolygonMode,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let label = format!("{fragment_entry}_{polygon_mode:?}_pipeline");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                ],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: match polygon_mode {
                wgpu::PolygonMode::Fill => Some(wgpu::Face::Back),
                _ => None,
            },
            polygon_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    solid: PipelinePair,
    wireframe: Option<PipelinePair>,
    frame_uniforms: UniformSlot,
    cube_uniforms: UniformSlot,
    lamp_uniforms: UniformSlot,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    targets: FrameTargets,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
}

/// Depth buffer, plus the multisampled colour buffer when MSAA is on.
struct FrameTargets {
    depth: wgpu::TextureView,
    msaa: Option<wgpu::TextureView>,
}

impl FrameTargets {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let depth = attachment(device, "depth_texture", DEPTH_FORMAT, width, height, sample_count);
        let msaa = (sample_count > 1)
            .then(|| attachment(device, "msaa_color_texture", format, width, height, sample_count));
        Self { depth, msaa }
    }

    /// Colour view to draw into and the view it resolves to, if any.
    fn color<'a>(
        &'a self,
        target: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa {
            Some(msaa) => (msaa, Some(target)),
            None => (target, None),
        }
    }
}

fn attachment(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

impl WgpuRenderer {
    /// Build pipelines and buffers. Wireframe pipelines are only created when
    /// `wireframe_supported` (the device has `POLYGON_MODE_LINE`).
    /// `sample_count` must be one the device supports for both the surface
    /// and depth formats; see [`crate::GpuContext::sample_count`].
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        wireframe_supported: bool,
        sample_count: u32,
    ) -> Self {
        let frame_layout = uniform_layout(device, "frame_bind_group_layout");
        let object_layout = uniform_layout(device, "object_bind_group_layout");

        let frame_uniforms = UniformSlot::new(
            device,
            &frame_layout,
            "frame_uniforms",
            &FrameUniforms::zeroed(),
        );
        let cube_uniforms = UniformSlot::new(
            device,
            &object_layout,
            "cube_uniforms",
            &ObjectUniforms::zeroed(),
        );
        let lamp_uniforms = UniformSlot::new(
            device,
            &object_layout,
            "lamp_uniforms",
            &ObjectUniforms::zeroed(),
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = |entry, mode| {
            create_pipeline(
                device,
                &pipeline_layout,
                &shader,
                entry,
                surface_format,
                mode,
                sample_count,
            )
        };
        let pair = |mode| PipelinePair {
            lit: pipeline("fs_lit", mode),
            lamp: pipeline("fs_lamp", mode),
        };
        let solid = pair(wgpu::PolygonMode::Fill);
        let wireframe = wireframe_supported.then(|| pair(wgpu::PolygonMode::Line));

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cube_index_count = cube_indices.len() as u32;

        let targets = FrameTargets::new(device, surface_format, width, height, sample_count);
        tracing::debug!(sample_count, "scene renderer ready");

        Self {
            solid,
            wireframe,
            frame_uniforms,
            cube_uniforms,
            lamp_uniforms,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            targets,
            surface_format,
            sample_count,
        }
    }

    /// Recreate the depth and multisample targets for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.targets =
            FrameTargets::new(device, self.surface_format, width, height, self.sample_count);
    }

    pub fn wireframe_available(&self) -> bool {
        self.wireframe.is_some()
    }

    /// Render one frame: the lit cube, then the lamp marker.
    ///
    /// A wireframe request on a device without line support falls back to solid.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        view: &RenderView,
        wireframe: bool,
    ) {
        let _span = tracing::trace_span!("render_frame").entered();

        self.frame_uniforms
            .write(queue, &FrameUniforms::new(view, &scene.light));
        self.cube_uniforms.write(
            queue,
            &ObjectUniforms::new(scene.cube_model(), &scene.material),
        );
        self.lamp_uniforms.write(
            queue,
            &ObjectUniforms::new(scene.lamp_model(), &scene.material),
        );

        let pipelines = match (wireframe, &self.wireframe) {
            (true, Some(lines)) => lines,
            _ => &self.solid,
        };

        let [r, g, b, a] = scene.clear_color;
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        let (color_view, resolve_target) = self.targets.color(target);
        // the multisampled buffer is only read through its resolve
        let color_store = match resolve_target {
            Some(_) => wgpu::StoreOp::Discard,
            None => wgpu::StoreOp::Store,
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: color_store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.frame_uniforms.bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            // Lit cube
            pass.set_pipeline(&pipelines.lit);
            pass.set_bind_group(1, &self.cube_uniforms.bind_group, &[]);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..1);

            // Lamp marker
            pass.set_pipeline(&pipelines.lamp);
            pass.set_bind_group(1, &self.lamp_uniforms.bind_group, &[]);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
