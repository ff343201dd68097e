use carousel_core::{Viewport, MAX_PIXEL_RATIO};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CONFIG_SCRIPT_ID: &str = "carousel-config";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Click listener on the element with `element_id`, if the page has one.
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = document.get_element_by_id(element_id)?;
    Listener::new(&el, "click", move |_| handler())
}

/// Layout viewport in CSS pixels.
pub fn viewport_size() -> Viewport {
    web::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            Viewport::new(width as f32, height as f32)
        })
        .unwrap_or_else(|| Viewport::new(0.0, 0.0))
}

/// Size the canvas to `viewport` in CSS pixels and its backing store to
/// `viewport * devicePixelRatio`, with the ratio capped. Returns the backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) -> (u32, u32) {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO);
    let w_px = ((viewport.width as f64 * dpr) as u32).max(1);
    let h_px = ((viewport.height as f64 * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    (w_px, h_px)
}

/// JSON from `<script id="carousel-config" type="application/json">`, if present.
pub fn read_config_script(document: &web::Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// `ResizeObserver` on one element, disconnected when dropped.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl ResizeWatch {
    pub fn observe(target: &web::Element, on_resize: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        let observer = web::ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(target);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
