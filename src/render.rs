use carousel_core::{PanelMesh, SlideCanvas, CLEAR_COLOR};
use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod panels;
use panels::{CameraUniforms, PanelGpu, PanelResources, PanelUniforms};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    resources: PanelResources,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    panels: Vec<PanelGpu>,
    texture_size: u32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    /// Acquire a WebGPU device for `canvas` and allocate `panel_count`
    /// textured panels sharing `mesh`. Textures start blank until uploaded.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        mesh: &PanelMesh,
        panel_count: usize,
        texture_size: u32,
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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("panel_shader"),
            source: wgpu::ShaderSource::Wgsl(carousel_core::PANEL_WGSL.into()),
        });
        let resources = panels::create_panel_resources(&device, &shader, format);

        let vertices = mesh.vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("panel_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("panel_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &resources.camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let panels = (0..panel_count)
            .map(|i| {
                panels::create_panel_gpu(
                    &device,
                    &resources.panel_bgl,
                    &linear_sampler,
                    i,
                    texture_size,
                )
            })
            .collect();

        let [r, g, b] = CLEAR_COLOR.to_linear_f64();
        Ok(Self {
            surface,
            device,
            queue,
            config,
            resources,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            camera_buffer,
            camera_bind_group,
            panels,
            texture_size,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("[gpu] reconfigured surface {}x{}", width, height);
        }
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Copy a slide canvas into its panel texture.
    pub fn upload_panel_texture(&self, index: usize, canvas: &SlideCanvas) {
        let Some(panel) = self.panels.get(index) else {
            log::warn!("[gpu] no panel {index} for texture upload");
            return;
        };
        if canvas.size() != self.texture_size {
            log::warn!(
                "[gpu] canvas {} is {}px, expected {}px; skipping upload",
                index,
                canvas.size(),
                self.texture_size
            );
            return;
        }
        helpers::write_rgba(
            &self.queue,
            &panel.texture,
            self.texture_size,
            self.texture_size,
            canvas.pixels(),
        );
    }

    /// Draw the panels in `draw_list` as (index, model matrix, opacity).
    pub fn render(
        &mut self,
        view_proj: Mat4,
        draw_list: impl IntoIterator<Item = (usize, Mat4, f32)>,
    ) -> Result<(), wgpu::SurfaceError> {
        let cam = CameraUniforms {
            view_proj: view_proj.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        let mut drawn: smallvec::SmallVec<[usize; 8]> = smallvec::SmallVec::new();
        for (index, model, opacity) in draw_list {
            let Some(panel) = self.panels.get(index) else {
                continue;
            };
            let uniforms = PanelUniforms {
                model: model.to_cols_array_2d(),
                params: [opacity.clamp(0.0, 1.0), 0.0, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&panel.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            drawn.push(index);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("panel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.resources.pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for index in drawn {
                rpass.set_bind_group(1, &self.panels[index].bind_group, &[]);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release GPU memory held by panel textures and buffers.
    pub fn dispose(&mut self) {
        for panel in self.panels.drain(..) {
            panel.texture.destroy();
            panel.uniform_buffer.destroy();
        }
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.camera_buffer.destroy();
        log::info!("[gpu] disposed");
    }
}
