use crate::geometry::panel_rotation;
use crate::tween::{Easing, Tween};
use std::time::Duration;

#[derive(Clone, Debug)]
struct Fade {
    tween: Tween,
    hide_on_complete: bool,
}

/// Per-slide visual state. Only `visible` and `opacity` ever change.
#[derive(Clone, Debug)]
pub struct SlidePanel {
    pub index: usize,
    pub rotation_y: f32,
    pub visible: bool,
    pub opacity: f32,
    fade: Option<Fade>,
}

impl SlidePanel {
    /// Panel 0 starts shown; every other panel starts hidden and transparent.
    pub fn new(index: usize, total: usize) -> Self {
        let front = index == 0;
        Self {
            index,
            rotation_y: panel_rotation(index, total),
            visible: front,
            opacity: if front { 1.0 } else { 0.0 },
            fade: None,
        }
    }

    /// Show now and fade to full opacity. Cancels any pending hide.
    pub fn fade_in(&mut self, duration: Duration) {
        self.visible = true;
        self.fade = Some(Fade {
            tween: Tween::new(self.opacity, 1.0, duration, Easing::CubicInOut),
            hide_on_complete: false,
        });
    }

    /// Fade to zero, then hide once the fade completes.
    pub fn fade_out(&mut self, duration: Duration) {
        self.fade = Some(Fade {
            tween: Tween::new(self.opacity, 0.0, duration, Easing::CubicInOut),
            hide_on_complete: true,
        });
    }

    pub fn tick(&mut self, dt: Duration) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        self.opacity = fade.tween.advance(dt);
        if fade.tween.is_finished() {
            if fade.hide_on_complete {
                self.visible = false;
            }
            self.fade = None;
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    /// Whether the renderer should draw this panel at all.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}
