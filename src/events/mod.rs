use crate::scene::SceneManager;
use std::cell::RefCell;
use std::rc::Weak;

pub mod clicks;
pub mod keyboard;
pub mod keymap;

use keymap::NavCommand;

/// Apply `command` to the scene if it is still alive and not mid-borrow.
pub(crate) fn dispatch(scene: &Weak<RefCell<SceneManager>>, command: NavCommand) {
    let Some(scene) = scene.upgrade() else {
        return;
    };
    let Ok(mut scene) = scene.try_borrow_mut() else {
        return;
    };
    scene.navigate(|carousel| match command {
        NavCommand::Previous => carousel.previous_slide(),
        NavCommand::Next => carousel.next_slide(),
    });
}
