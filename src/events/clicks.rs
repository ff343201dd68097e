use super::keymap::{button_id, NavCommand};
use crate::dom::{self, Listener};
use crate::indicators::{self, INDICATOR_CONTAINER_ID};
use crate::scene::SceneManager;
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

/// Optional `#carousel-prev` / `#carousel-next` buttons.
pub fn wire_nav_buttons(document: &web::Document, scene: &Weak<RefCell<SceneManager>>) -> Vec<Listener> {
    [NavCommand::Previous, NavCommand::Next]
        .into_iter()
        .filter_map(|command| {
            let scene = scene.clone();
            dom::add_click_listener(document, button_id(command), move || {
                super::dispatch(&scene, command);
            })
        })
        .collect()
}

/// One delegated listener on the indicator container selects the clicked slide.
pub fn wire_indicator_clicks(
    document: &web::Document,
    scene: Weak<RefCell<SceneManager>>,
) -> Option<Listener> {
    let container = document.get_element_by_id(INDICATOR_CONTAINER_ID)?;
    Listener::new(&container, "click", move |ev: web::Event| {
        let Some(index) = indicators::indicator_from_event(&ev) else {
            return;
        };
        let Some(scene) = scene.upgrade() else {
            return;
        };
        let Ok(mut scene) = scene.try_borrow_mut() else {
            return;
        };
        scene.navigate(|carousel| carousel.select_slide(index));
    })
}
