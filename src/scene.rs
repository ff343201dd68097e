use crate::dom;
use crate::indicators;
use crate::loader::LoadedImage;
use crate::render::GpuState;
use carousel_core::{
    angle_per_slide, build_panel_mesh, Camera, Carousel, CarouselConfig, PanelMesh, RegionImage,
    SlideCanvas, SlideConfig, Viewport,
};
use smallvec::SmallVec;
use std::time::Duration;
use web_sys as web;

/// Scene, camera, renderer and navigation state for one mounted carousel.
pub struct SceneManager {
    canvas: web::HtmlCanvasElement,
    carousel: Carousel,
    camera: Camera,
    mesh: PanelMesh,
    canvases: Vec<SlideCanvas>,
    texture_size: u32,
    gpu: Option<GpuState>,
    viewport: Viewport,
    indicators_dirty: bool,
    disposed: bool,
}

impl SceneManager {
    /// Build navigation state, camera, shared panel mesh and placeholder
    /// textures. The GPU is attached later with `attach_gpu`.
    pub fn initialize(
        canvas: web::HtmlCanvasElement,
        viewport: Viewport,
        config: &CarouselConfig,
    ) -> anyhow::Result<Self> {
        let carousel = Carousel::new(config)?;
        let total = carousel.slide_count();
        let geometry = &config.geometry;
        let mesh = build_panel_mesh(
            geometry.radius,
            geometry.height,
            geometry.radial_segments,
            angle_per_slide(total),
        );
        let canvases = config
            .slides
            .iter()
            .map(|slide| SlideCanvas::for_slide(slide, config.texture_size, config.darken_factor))
            .collect::<carousel_core::Result<Vec<_>>>()?;
        dom::sync_canvas_backing_size(&canvas, viewport);
        let camera = Camera::for_viewport(viewport);
        log::info!(
            "[scene] {} slides, camera {:?} at z={}",
            total,
            camera.profile,
            camera.profile.distance()
        );
        Ok(Self {
            canvas,
            carousel,
            camera,
            mesh,
            canvases,
            texture_size: config.texture_size,
            gpu: None,
            viewport,
            indicators_dirty: true,
            disposed: false,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn mesh(&self) -> &PanelMesh {
        &self.mesh
    }

    pub fn texture_size(&self) -> u32 {
        self.texture_size
    }

    pub fn slides(&self) -> &[SlideConfig] {
        self.carousel.slides()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Run a navigation operation and schedule an indicator refresh.
    pub fn navigate(&mut self, op: impl FnOnce(&mut Carousel)) {
        if self.disposed {
            return;
        }
        op(&mut self.carousel);
        self.indicators_dirty = true;
    }

    /// Install the renderer. Canvases not yet uploaded are still dirty and
    /// go up on the next frame.
    pub fn attach_gpu(&mut self, mut gpu: GpuState) {
        if self.disposed {
            gpu.dispose();
            return;
        }
        self.gpu = Some(gpu);
        self.on_resize(dom::viewport_size());
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.disposed || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        let previous = self.camera.profile;
        self.viewport = viewport;
        self.camera.resize(viewport);
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas, viewport);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(w, h);
        }
        if previous != self.camera.profile {
            log::info!("[resize] camera profile {:?} -> {:?}", previous, self.camera.profile);
        }
        log::debug!("[resize] viewport {}x{} backing {}x{}", viewport.width, viewport.height, w, h);
        self.indicators_dirty = true;
    }

    /// Layer resolved region images onto panel `index`.
    pub fn composite_panel(&mut self, index: usize, images: &[LoadedImage]) {
        if self.disposed {
            return;
        }
        let Some(canvas) = self.canvases.get_mut(index) else {
            return;
        };
        let regions: SmallVec<[RegionImage<'_>; 3]> = images
            .iter()
            .map(|img| match img {
                Some(img) => RegionImage::Decoded(img),
                None => RegionImage::Placeholder,
            })
            .collect();
        canvas.composite(&regions);
        log::info!("[texture] panel {} upgraded", index);
    }

    /// One animation tick: tweens and timer, indicators, texture uploads, draw.
    pub fn frame(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        if self.carousel.tick(dt) {
            self.indicators_dirty = true;
        }
        if std::mem::take(&mut self.indicators_dirty) {
            if let Some(document) = dom::window_document() {
                indicators::sync(&document, &self.carousel, self.viewport.width);
            }
        }
        if let Some(gpu) = self.gpu.as_ref() {
            for (index, canvas) in self.canvases.iter_mut().enumerate() {
                if canvas.take_dirty() {
                    gpu.upload_panel_texture(index, canvas);
                }
            }
        }
        self.render_frame();
    }

    pub fn render_frame(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        match gpu.render(self.camera.view_proj(), self.carousel.draw_list()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    /// Stop animation and release GPU memory. Later calls do nothing.
    pub fn teardown(&mut self) {
        if std::mem::replace(&mut self.disposed, true) {
            return;
        }
        self.carousel.stop_autoplay();
        if let Some(mut gpu) = self.gpu.take() {
            gpu.dispose();
        }
        self.canvases.clear();
        log::info!("[scene] torn down");
    }
}
