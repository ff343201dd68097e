use super::keymap::nav_for_key;
use crate::dom::Listener;
use crate::scene::SceneManager;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use web_sys as web;

/// ArrowLeft / ArrowRight step the carousel while it is mounted.
pub fn wire_arrow_keys(scene: Weak<RefCell<SceneManager>>) -> Option<Listener> {
    let window = web::window()?;
    Listener::new(&window, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if let Some(command) = nav_for_key(&ev.key()) {
            log::debug!("[keys] {:?}", command);
            ev.prevent_default();
            super::dispatch(&scene, command);
        }
    })
}
