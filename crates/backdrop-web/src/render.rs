//! WebGPU state for the 3D layer: rotating globe with shells and markers,
//! plus the star point field, composited over the glyph-rain canvas.

use backdrop_core::{
    mesh, Globe, OrbitCamera, ShellMesh, Starfield, AMBIENT_INTENSITY, ATMOSPHERE_COLOR,
    CLOUD_SHELL_OPACITY, GRID_COLOR, MARKER_COLOR, MARKER_STEM_OPACITY, MARKER_STEM_RADIUS,
    POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION, SCENE_WGSL,
};
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

use crate::textures::TextureSet;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_pos: [f32; 4],
    // x: ambient, y: point light intensity, z: layer opacity
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FlatParams {
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerInstance {
    offset_scale: [f32; 4],
    color: [f32; 4],
}

struct MeshBuffers {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
}

/// One translucent flat-color draw (grid shell, stems or atmosphere).
struct FlatDraw {
    buffers: MeshBuffers,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globe_pipeline: wgpu::RenderPipeline,
    clouds_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    flat_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    sphere: MeshBuffers,
    shells: Vec<FlatDraw>,
    atmosphere: FlatDraw,
    stems: Option<FlatDraw>,
    marker_mesh: MeshBuffers,
    marker_instances: wgpu::Buffer,
    marker_count: u32,
    stars_vb: wgpu::Buffer,
    star_count: u32,

    globe_globals: wgpu::Buffer,
    cloud_globals: wgpu::Buffer,
    star_globals: wgpu::Buffer,
    bg_globe0: wgpu::BindGroup,
    bg_surface: wgpu::BindGroup,
    bg_clouds0: wgpu::BindGroup,
    bg_cloud_tex: wgpu::BindGroup,
    bg_stars0: wgpu::BindGroup,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        globe: &Globe,
        starfield: &Starfield,
        textures: &TextureSet,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        // Transparent composition lets the rain canvas show through
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::CompositeAlphaMode::PreMultiplied | wgpu::CompositeAlphaMode::PostMultiplied
                )
            })
            .unwrap_or(caps.alpha_modes[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        // ---------------- bind group layouts ----------------
        let bgl_globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl_globals"),
            entries: &[uniform_entry(0)],
        });
        let bgl_globals_flat = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl_globals_flat"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });
        let bgl_surface = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl_surface"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
            ],
        });

        let pl_textured = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_textured"),
            bind_group_layouts: &[&bgl_globals, &bgl_surface],
            push_constant_ranges: &[],
        });
        let pl_flat = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_flat"),
            bind_group_layouts: &[&bgl_globals_flat],
            push_constant_ranges: &[],
        });
        let pl_globals = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_globals"),
            bind_group_layouts: &[&bgl_globals],
            push_constant_ranges: &[],
        });

        // ---------------- vertex layouts ----------------
        let vertex_attrs =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        let instance_attrs = wgpu::vertex_attr_array![3 => Float32x4, 4 => Float32x4];
        let star_attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<mesh::Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &vertex_attrs,
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &instance_attrs,
        };
        let star_layout = wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &star_attrs,
        };

        // ---------------- pipelines ----------------
        let globe_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_textured,
            format,
            "globe",
            "vs_mesh",
            "fs_globe",
            &[vertex_layout.clone()],
            wgpu::PrimitiveTopology::TriangleList,
            true,
            None,
        );
        let clouds_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_textured,
            format,
            "clouds",
            "vs_mesh",
            "fs_clouds",
            &[vertex_layout.clone()],
            wgpu::PrimitiveTopology::TriangleList,
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );
        let line_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_flat,
            format,
            "shell_lines",
            "vs_mesh",
            "fs_flat",
            &[vertex_layout.clone()],
            wgpu::PrimitiveTopology::LineList,
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );
        let flat_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_flat,
            format,
            "flat",
            "vs_mesh",
            "fs_flat",
            &[vertex_layout.clone()],
            wgpu::PrimitiveTopology::TriangleList,
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );
        let marker_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_globals,
            format,
            "markers",
            "vs_marker",
            "fs_marker",
            &[vertex_layout.clone(), instance_layout],
            wgpu::PrimitiveTopology::TriangleList,
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );
        let star_pipeline = build_pipeline(
            &device,
            &shader,
            &pl_globals,
            format,
            "stars",
            "vs_star",
            "fs_star",
            &[star_layout],
            wgpu::PrimitiveTopology::PointList,
            false,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        // ---------------- static geometry ----------------
        let radius = globe.config.radius;
        let sphere = upload_mesh(&device, &mesh::uv_sphere(radius, 64, 64), "sphere");
        let marker_mesh = upload_mesh(&device, &mesh::uv_sphere(1.0, 16, 16), "marker_sphere");

        let mut instances: Vec<MarkerInstance> = Vec::new();
        let dot_color = [MARKER_COLOR[0], MARKER_COLOR[1], MARKER_COLOR[2], 1.0];
        for m in globe
            .capital_markers
            .iter()
            .chain(globe.city_markers.iter())
        {
            let p = m.local_position;
            instances.push(MarkerInstance {
                offset_scale: [p.x, p.y, p.z, m.dot_radius],
                color: dot_color,
            });
            if m.glow_radius > 0.0 {
                instances.push(MarkerInstance {
                    offset_scale: [p.x, p.y, p.z, m.glow_radius],
                    color: [
                        MARKER_COLOR[0],
                        MARKER_COLOR[1],
                        MARKER_COLOR[2],
                        m.glow_opacity,
                    ],
                });
            }
        }
        let marker_count = instances.len() as u32;
        let marker_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let stars_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stars"),
            contents: bytemuck::cast_slice(&starfield.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let star_count = starfield.positions.len() as u32;

        // ---------------- uniforms and bind groups ----------------
        let globe_globals = create_globals_buffer(&device, "globe_globals");
        let cloud_globals = create_globals_buffer(&device, "cloud_globals");
        let star_globals = create_globals_buffer(&device, "star_globals");

        let bg_globe0 = bind_globals(&device, &bgl_globals, &globe_globals, "bg_globe0");
        let bg_clouds0 = bind_globals(&device, &bgl_globals, &cloud_globals, "bg_clouds0");
        let bg_stars0 = bind_globals(&device, &bgl_globals, &star_globals, "bg_stars0");

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });
        let color_view = upload_texture(&device, &queue, &textures.color, true, "earth_color");
        let normal_view = upload_texture(&device, &queue, &textures.normal, false, "earth_normal");
        let specular_view =
            upload_texture(&device, &queue, &textures.specular, false, "earth_specular");
        let clouds_view = upload_texture(&device, &queue, &textures.clouds, true, "earth_clouds");

        let bg_surface = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_surface"),
            layout: &bgl_surface,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&normal_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&specular_view),
                },
            ],
        });
        // Cloud pass reads its map through the color binding; the other two
        // slots are filled with the same view to satisfy the layout.
        let bg_cloud_tex = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_cloud_tex"),
            layout: &bgl_surface,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&clouds_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&clouds_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&clouds_view),
                },
            ],
        });

        // Grid shells, pre-scaled so they share the globe's model matrix
        let mut shells = Vec::new();
        for (i, spec) in backdrop_core::GRID_SHELLS.iter().enumerate() {
            let shell_mesh = match spec.mesh {
                ShellMesh::UvSphere { segments, rings } => {
                    mesh::uv_sphere_lines(radius * spec.scale, segments, rings)
                }
                ShellMesh::Icosahedron { detail } => {
                    mesh::icosahedron_lines(radius * spec.scale, detail)
                }
            };
            shells.push(flat_draw(
                &device,
                &bgl_globals_flat,
                &globe_globals,
                &shell_mesh,
                [GRID_COLOR[0], GRID_COLOR[1], GRID_COLOR[2], spec.opacity],
                &format!("shell_{i}"),
            ));
        }

        let atmo_spec = globe.atmosphere_shell();
        let atmosphere = flat_draw(
            &device,
            &bgl_globals_flat,
            &globe_globals,
            &mesh::uv_sphere(radius * atmo_spec.scale, 64, 64),
            [
                ATMOSPHERE_COLOR[0],
                ATMOSPHERE_COLOR[1],
                ATMOSPHERE_COLOR[2],
                atmo_spec.opacity,
            ],
            "atmosphere",
        );

        let mut stem_mesh = mesh::Mesh::default();
        for m in &globe.capital_markers {
            if m.stem_length > 0.0 {
                let dir = m.local_position.normalize();
                mesh::append_cylinder(
                    &mut stem_mesh,
                    m.local_position - dir * m.stem_length,
                    m.local_position,
                    MARKER_STEM_RADIUS,
                    8,
                );
            }
        }
        let stems = (!stem_mesh.indices.is_empty()).then(|| {
            flat_draw(
                &device,
                &bgl_globals_flat,
                &globe_globals,
                &stem_mesh,
                [
                    MARKER_COLOR[0],
                    MARKER_COLOR[1],
                    MARKER_COLOR[2],
                    MARKER_STEM_OPACITY,
                ],
                "stems",
            )
        });

        log::info!(
            "[gpu] initialized {}x{} format {:?}, {} markers, {} stars",
            width,
            height,
            format,
            marker_count,
            star_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globe_pipeline,
            clouds_pipeline,
            line_pipeline,
            flat_pipeline,
            marker_pipeline,
            star_pipeline,
            sphere,
            shells,
            atmosphere,
            stems,
            marker_mesh,
            marker_instances,
            marker_count,
            stars_vb,
            star_count,
            globe_globals,
            cloud_globals,
            star_globals,
            bg_globe0,
            bg_surface,
            bg_clouds0,
            bg_cloud_tex,
            bg_stars0,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Draw one frame at `elapsed` seconds on the shared animation clock.
    pub fn render(
        &mut self,
        camera: &OrbitCamera,
        globe: &Globe,
        starfield: &Starfield,
        elapsed: f32,
    ) {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let view_proj = camera.view_proj(aspect).to_cols_array_2d();
        let eye = camera.eye();
        let light = Vec3::from(POINT_LIGHT_POSITION);

        let globals = |model: glam::Mat4, opacity: f32| Globals {
            view_proj,
            model: model.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            light_pos: [light.x, light.y, light.z, 1.0],
            params: [AMBIENT_INTENSITY, POINT_LIGHT_INTENSITY, opacity, 0.0],
        };
        self.queue.write_buffer(
            &self.globe_globals,
            0,
            bytemuck::bytes_of(&globals(globe.model_matrix(elapsed), 1.0)),
        );
        self.queue.write_buffer(
            &self.cloud_globals,
            0,
            bytemuck::bytes_of(&globals(
                globe.cloud_model_matrix(elapsed),
                CLOUD_SHELL_OPACITY,
            )),
        );
        self.queue.write_buffer(
            &self.star_globals,
            0,
            bytemuck::bytes_of(&globals(starfield.model_matrix(elapsed), 1.0)),
        );

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::warn!("[gpu] surface error: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Back-to-front: stars, surface, markers, stems, grids, clouds, glow
            pass.set_pipeline(&self.star_pipeline);
            pass.set_bind_group(0, &self.bg_stars0, &[]);
            pass.set_vertex_buffer(0, self.stars_vb.slice(..));
            pass.draw(0..self.star_count, 0..1);

            pass.set_pipeline(&self.globe_pipeline);
            pass.set_bind_group(0, &self.bg_globe0, &[]);
            pass.set_bind_group(1, &self.bg_surface, &[]);
            pass.set_vertex_buffer(0, self.sphere.vb.slice(..));
            pass.set_index_buffer(self.sphere.ib.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.sphere.index_count, 0, 0..1);

            pass.set_pipeline(&self.marker_pipeline);
            pass.set_bind_group(0, &self.bg_globe0, &[]);
            pass.set_vertex_buffer(0, self.marker_mesh.vb.slice(..));
            pass.set_vertex_buffer(1, self.marker_instances.slice(..));
            pass.set_index_buffer(self.marker_mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.marker_mesh.index_count, 0, 0..self.marker_count);

            if let Some(stems) = &self.stems {
                pass.set_pipeline(&self.flat_pipeline);
                pass.set_bind_group(0, &stems.bind_group, &[]);
                pass.set_vertex_buffer(0, stems.buffers.vb.slice(..));
                pass.set_index_buffer(stems.buffers.ib.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..stems.buffers.index_count, 0, 0..1);
            }

            pass.set_pipeline(&self.line_pipeline);
            for shell in &self.shells {
                pass.set_bind_group(0, &shell.bind_group, &[]);
                pass.set_vertex_buffer(0, shell.buffers.vb.slice(..));
                pass.set_index_buffer(shell.buffers.ib.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..shell.buffers.index_count, 0, 0..1);
            }

            pass.set_pipeline(&self.clouds_pipeline);
            pass.set_bind_group(0, &self.bg_clouds0, &[]);
            pass.set_bind_group(1, &self.bg_cloud_tex, &[]);
            pass.set_vertex_buffer(0, self.sphere.vb.slice(..));
            pass.set_index_buffer(self.sphere.ib.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.sphere.index_count, 0, 0..1);

            pass.set_pipeline(&self.flat_pipeline);
            pass.set_bind_group(0, &self.atmosphere.bind_group, &[]);
            pass.set_vertex_buffer(0, self.atmosphere.buffers.vb.slice(..));
            pass.set_index_buffer(
                self.atmosphere.buffers.ib.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..self.atmosphere.buffers.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

// ---------------- helpers ----------------

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    label: &str,
    vs: &str,
    fs: &str,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    depth_write: bool,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth24Plus,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth24Plus,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_globals_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<Globals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn bind_globals(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

fn upload_mesh(device: &wgpu::Device, mesh: &mesh::Mesh, label: &str) -> MeshBuffers {
    let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label}_vb")),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label}_ib")),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vb,
        ib,
        index_count: mesh.indices.len() as u32,
    }
}

fn flat_draw(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    globals: &wgpu::Buffer,
    mesh: &mesh::Mesh,
    color: [f32; 4],
    label: &str,
) -> FlatDraw {
    let buffers = upload_mesh(device, mesh, label);
    let flat_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label}_params")),
        contents: bytemuck::bytes_of(&FlatParams { color }),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label}_bg")),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: globals.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: flat_buf.as_entire_binding(),
            },
        ],
    });
    FlatDraw {
        buffers,
        bind_group,
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &image::RgbaImage,
    srgb: bool,
    label: &str,
) -> wgpu::TextureView {
    let (width, height) = img.dimensions();
    let format = if srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        img.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
