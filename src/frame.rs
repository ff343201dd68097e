use crate::scene::SceneManager;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Frames longer than this (tab in background) are clamped.
const MAX_FRAME_DT: Duration = Duration::from_millis(250);

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop driving one scene until cancelled.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(scene: Rc<RefCell<SceneManager>>) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_next = tick.clone();
        let pending_next = pending.clone();
        let mut last_instant = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_next.set(None);
            let now = Instant::now();
            let dt = (now - last_instant).min(MAX_FRAME_DT);
            last_instant = now;
            if let Ok(mut scene) = scene.try_borrow_mut() {
                if scene.is_disposed() {
                    return;
                }
                scene.frame(dt);
            }
            if let Some(cb) = tick_next.borrow().as_ref() {
                pending_next.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            pending.set(request_frame(cb));
        }
        Self { tick, pending }
    }

    /// Cancel the pending frame and release the tick closure.
    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window().and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
}
