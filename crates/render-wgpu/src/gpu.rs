use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use terrawalk_render::{RenderView, SceneStyle};
use terrawalk_terrain::TerrainSurface;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    sun: [f32; 4],
    hemi_sky: [f32; 4],
    hemi_ground: [f32; 4],
    terrain_color: [f32; 4],
    water_color: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: Mat4, style: &SceneStyle) -> Self {
        let rgbw = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
        let sun = style.sun_direction;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            sun: [sun.x, sun.y, sun.z, style.sun_intensity],
            hemi_sky: rgbw(style.hemi_sky, style.hemi_intensity),
            hemi_ground: rgbw(style.hemi_ground, 0.0),
            terrain_color: rgbw(style.terrain, 1.0),
            water_color: rgbw(style.water, style.water_opacity),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Flat translucent plane at a fixed height, covering the terrain footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterPlane {
    pub y: f32,
    pub half_extent: f32,
}

fn surface_vertices(surface: &TerrainSurface) -> Vec<Vertex> {
    surface
        .positions()
        .iter()
        .zip(surface.normals())
        .map(|(p, n)| Vertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

/// Water quad, wound counter-clockwise seen from above like the terrain.
fn water_mesh(plane: &WaterPlane) -> (Vec<Vertex>, Vec<u32>) {
    let (y, h) = (plane.y, plane.half_extent);
    let up = [0.0, 1.0, 0.0];
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-h, y, -h], normal: up },
        Vertex { position: [ h, y, -h], normal: up },
        Vertex { position: [-h, y,  h], normal: up },
        Vertex { position: [ h, y,  h], normal: up },
    ];
    (vertices, vec![0, 2, 1, 1, 2, 3])
}

struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, name: &str, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_vertex_buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_index_buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices: vertex_buffer,
            indices: index_buffer,
            index_count: indices.len() as u32,
        }
    }

    fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// wgpu-based terrain renderer.
pub struct WgpuRenderer {
    terrain_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    terrain: MeshBuffers,
    water: Option<MeshBuffers>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    style: SceneStyle,
}

impl WgpuRenderer {
    /// Create the pipelines and upload the terrain (and water) meshes.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        surface: &TerrainSurface,
        water: Option<WaterPlane>,
        style: SceneStyle,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(Mat4::IDENTITY, &style)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::TERRAIN_SHADER.into()),
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
            ],
        };

        let make_pipeline = |label: &str, fs: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout.clone()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            })
        };

        let terrain_pipeline =
            make_pipeline("terrain_pipeline", "fs_terrain", wgpu::BlendState::REPLACE, true);
        let water_pipeline = make_pipeline(
            "water_pipeline",
            "fs_water",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        );

        let terrain = MeshBuffers::upload(
            device,
            "terrain",
            &surface_vertices(surface),
            surface.indices(),
        );
        let water = water.map(|plane| {
            let (vertices, indices) = water_mesh(&plane);
            MeshBuffers::upload(device, "water", &vertices, &indices)
        });

        tracing::debug!(
            vertices = surface.vertex_count(),
            triangles = surface.triangle_count(),
            water = water.is_some(),
            "uploaded terrain buffers"
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            terrain_pipeline,
            water_pipeline,
            uniform_buffer,
            uniform_bind_group,
            terrain,
            water,
            depth_texture,
            surface_format,
            style,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: terrain, then the water plane blended over it.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &RenderView,
        aspect: f32,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(view.view_projection(aspect), &self.style)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b] = self.style.sky;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            pass.set_pipeline(&self.terrain_pipeline);
            self.terrain.draw(&mut pass);

            if let Some(water) = &self.water {
                pass.set_pipeline(&self.water_pipeline);
                water.draw(&mut pass);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrawalk_render::SceneStyle;

    #[test]
    fn uniforms_layout_is_std140_friendly() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 + 5 * 16);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn uniforms_carry_style() {
        let style = SceneStyle::default();
        let u = Uniforms::new(Mat4::IDENTITY, &style);
        assert_eq!(u.water_color[3], 0.55);
        assert_eq!(u.hemi_sky[3], 0.9);
        assert_eq!(u.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn water_quad_faces_up() {
        let (vertices, indices) = water_mesh(&WaterPlane {
            y: -5.0,
            half_extent: 200.0,
        });
        assert_eq!(vertices.len(), 4);
        for tri in indices.chunks_exact(3) {
            let p = |i: u32| glam::Vec3::from_array(vertices[i as usize].position);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            assert!((b - a).cross(c - a).y > 0.0);
            assert_eq!(a.y, -5.0);
        }
    }
}
