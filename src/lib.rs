#![cfg(target_arch = "wasm32")]
use carousel_core::{wrap_index, CarouselConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod defer;
mod dom;
mod events;
mod frame;
mod indicators;
mod loader;
mod render;
mod scene;

use frame::FrameLoop;
use loader::ImageCache;
use render::GpuState;
use scene::SceneManager;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("carousel-web loaded");
    Ok(())
}

/// Mount a carousel on the canvas with id `canvas_id`.
///
/// `config_json` overrides the page's `#carousel-config` script; with
/// neither, the stock slides are used. Navigation works immediately; the
/// renderer attaches once WebGPU is ready.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<CarouselHandle, JsValue> {
    mount_inner(canvas_id, config_json).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn load_config(document: &web::Document, config_json: Option<String>) -> anyhow::Result<CarouselConfig> {
    match config_json.or_else(|| dom::read_config_script(document)) {
        Some(json) => Ok(CarouselConfig::from_json(&json)?),
        None => Ok(CarouselConfig::default()),
    }
}

fn mount_inner(canvas_id: &str, config_json: Option<String>) -> anyhow::Result<CarouselHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = load_config(&document, config_json)?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let scene = Rc::new(RefCell::new(SceneManager::initialize(
        canvas.clone(),
        dom::viewport_size(),
        &config,
    )?));

    let cache = ImageCache::default();
    loader::spawn_panel_loads(&scene, &cache);
    spawn_gpu_init(&scene);
    let frame = FrameLoop::start(scene.clone());

    // Sizes come from the window; the parent is observed so layout changes
    // that do not resize the window still reflow the canvas.
    let observed = canvas
        .parent_element()
        .unwrap_or_else(|| canvas.clone().unchecked_into());
    let scene_resize = Rc::downgrade(&scene);
    let resize = dom::ResizeWatch::observe(&observed, move || {
        if let Some(scene) = scene_resize.upgrade() {
            if let Ok(mut scene) = scene.try_borrow_mut() {
                scene.on_resize(dom::viewport_size());
            }
        }
    });

    let weak = Rc::downgrade(&scene);
    let mut listeners = events::clicks::wire_nav_buttons(&document, &weak);
    listeners.extend(events::keyboard::wire_arrow_keys(weak.clone()));
    listeners.extend(events::clicks::wire_indicator_clicks(&document, weak));

    log::info!(
        "[scene] mounted on #{} ({} image paths, {} listeners)",
        canvas_id,
        cache.len(),
        listeners.len()
    );
    Ok(CarouselHandle {
        mounted: Some(Mounted {
            scene,
            frame,
            resize,
            listeners,
            cache,
        }),
    })
}

fn spawn_gpu_init(scene: &Rc<RefCell<SceneManager>>) {
    let (canvas, mesh, panel_count, texture_size) = {
        let s = scene.borrow();
        (
            s.canvas().clone(),
            s.mesh().clone(),
            s.slides().len(),
            s.texture_size(),
        )
    };
    let weak = Rc::downgrade(scene);
    spawn_local(async move {
        match GpuState::new(&canvas, &mesh, panel_count, texture_size).await {
            Ok(mut gpu) => match weak.upgrade() {
                Some(scene) => scene.borrow_mut().attach_gpu(gpu),
                None => gpu.dispose(),
            },
            Err(e) => log::error!("[gpu] WebGPU init error: {:?}", e),
        }
    });
}

struct Mounted {
    scene: Rc<RefCell<SceneManager>>,
    frame: FrameLoop,
    resize: Option<dom::ResizeWatch>,
    listeners: Vec<dom::Listener>,
    cache: ImageCache,
}

impl Mounted {
    fn teardown(self) {
        self.frame.cancel();
        drop(self.resize);
        drop(self.listeners);
        defer::with_mut_or_defer(&self.scene, SceneManager::teardown, |retry| {
            log::warn!("[scene] scene busy, deferring teardown");
            spawn_local(async move { retry() });
        });
        self.cache.clear();
    }
}

/// Handle returned by `mount`. Dropping it (or `free()` from JS) tears the
/// carousel down just like `destroy`.
#[wasm_bindgen]
pub struct CarouselHandle {
    mounted: Option<Mounted>,
}

impl CarouselHandle {
    fn with_scene<R>(&self, f: impl FnOnce(&SceneManager) -> R) -> Option<R> {
        let mounted = self.mounted.as_ref()?;
        let scene = mounted.scene.try_borrow().ok()?;
        Some(f(&scene))
    }

    fn navigate(&self, op: impl FnOnce(&mut carousel_core::Carousel)) {
        if let Some(mounted) = self.mounted.as_ref() {
            if let Ok(mut scene) = mounted.scene.try_borrow_mut() {
                scene.navigate(op);
            }
        }
    }

    fn wrapped(&self, index: i32) -> Option<usize> {
        self.with_scene(|s| wrap_index(index as i64, s.carousel().slide_count()))
    }
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Negative and out-of-range indices wrap around the ring.
    pub fn select_slide(&self, index: i32) {
        if let Some(i) = self.wrapped(index) {
            self.navigate(|c| c.select_slide(i));
        }
    }

    pub fn next_slide(&self) {
        self.navigate(|c| c.next_slide());
    }

    pub fn previous_slide(&self) {
        self.navigate(|c| c.previous_slide());
    }

    pub fn active_slide(&self) -> u32 {
        self.with_scene(|s| s.carousel().active_slide() as u32)
            .unwrap_or(0)
    }

    pub fn slide_count(&self) -> u32 {
        self.with_scene(|s| s.carousel().slide_count() as u32)
            .unwrap_or(0)
    }

    pub fn slide_title(&self, index: i32) -> Option<String> {
        let i = self.wrapped(index)?;
        self.with_scene(|s| s.slides().get(i).map(|slide| slide.title.clone()))
            .flatten()
    }

    /// Steps around the ring between indicator `index` and the active slide.
    pub fn indicator_distance(&self, index: i32) -> u32 {
        self.wrapped(index)
            .and_then(|i| self.with_scene(|s| s.carousel().indicator_distance(i) as u32))
            .unwrap_or(0)
    }

    pub fn indicator_visible(&self, index: i32) -> bool {
        self.wrapped(index)
            .and_then(|i| self.with_scene(|s| s.carousel().indicator_visible(i)))
            .unwrap_or(false)
    }

    pub fn indicator_position(&self, index: i32) -> String {
        self.wrapped(index)
            .and_then(|i| {
                self.with_scene(|s| s.carousel().indicator_position(i, s.viewport().width))
            })
            .unwrap_or_default()
    }

    pub fn indicator_transition_delay(&self, index: i32) -> String {
        self.wrapped(index)
            .and_then(|i| self.with_scene(|s| s.carousel().indicator_transition_delay(i)))
            .unwrap_or_default()
    }

    /// Cancel the frame loop, stop observing resize, drop listeners and
    /// release GPU resources. Later calls do nothing.
    pub fn destroy(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.teardown();
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}
