//! Active-slide state machine.
//!
//! Every operation that changes the active index (manual selection, next,
//! previous, auto-advance) funnels through `go_to`, which always calls
//! `apply_navigation`. Animations are plain tweens advanced by `tick`.

use crate::config::{CarouselConfig, SlideConfig};
use crate::error::Result;
use crate::geometry::{group_rotation_for, panel_model_matrix};
use crate::indicator;
use crate::panel::SlidePanel;
use crate::tween::{Easing, Tween};
use glam::Mat4;
use std::time::Duration;

/// Recurring auto-advance timer measured in frame time.
#[derive(Clone, Debug)]
pub struct AutoAdvance {
    interval: Duration,
    elapsed: Duration,
    enabled: bool,
}

impl AutoAdvance {
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            enabled: enabled && !interval.is_zero(),
        }
    }

    /// Start counting a fresh interval from now.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.enabled = false;
        self.elapsed = Duration::ZERO;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.enabled
    }

    /// Accumulate `dt` and return how many times the timer fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.enabled {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Reduce a possibly negative host-side index onto `[0, count)`.
pub fn wrap_index(index: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.rem_euclid(count as i64) as usize
}

pub struct Carousel {
    slides: Vec<SlideConfig>,
    panels: Vec<SlidePanel>,
    active: usize,
    group_rotation: f32,
    rotation_tween: Option<Tween>,
    autoplay: AutoAdvance,
    fade_duration: Duration,
    rotation_duration: Duration,
}

impl Carousel {
    pub fn new(config: &CarouselConfig) -> Result<Self> {
        config.validate()?;
        let total = config.slides.len();
        let panels = (0..total).map(|i| SlidePanel::new(i, total)).collect();
        Ok(Self {
            slides: config.slides.clone(),
            panels,
            active: 0,
            group_rotation: 0.0,
            rotation_tween: None,
            autoplay: AutoAdvance::new(config.autoplay_interval(), config.autoplay),
            fade_duration: config.fade_duration(),
            rotation_duration: config.rotation_duration(),
        })
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn active_slide(&self) -> usize {
        self.active
    }

    pub fn slides(&self) -> &[SlideConfig] {
        &self.slides
    }

    pub fn panels(&self) -> &[SlidePanel] {
        &self.panels
    }

    /// Current (possibly mid-animation) Y rotation of the carousel group.
    #[inline]
    pub fn group_rotation(&self) -> f32 {
        self.group_rotation
    }

    /// Rotation the group is heading toward for the active slide.
    pub fn target_rotation(&self) -> f32 {
        group_rotation_for(self.active, self.slide_count())
    }

    pub fn autoplay(&self) -> &AutoAdvance {
        &self.autoplay
    }

    /// Jump to `index` and restart the auto-advance timer.
    ///
    /// Out-of-range indices wrap around the ring.
    pub fn select_slide(&mut self, index: usize) {
        let n = self.slide_count();
        if index >= n {
            log::debug!("[nav] index {index} out of range for {n} slides; wrapping");
        }
        self.go_to(index % n);
        self.autoplay.restart();
    }

    pub fn next_slide(&mut self) {
        self.go_to((self.active + 1) % self.slide_count());
        self.autoplay.restart();
    }

    pub fn previous_slide(&mut self) {
        let n = self.slide_count();
        self.go_to((self.active + n - 1) % n);
        self.autoplay.restart();
    }

    /// What the auto-advance timer does on each firing.
    pub fn auto_advance(&mut self) {
        self.go_to((self.active + 1) % self.slide_count());
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    fn go_to(&mut self, index: usize) {
        self.active = index;
        self.apply_navigation();
    }

    /// Retarget every panel fade and the group rotation at the active slide.
    fn apply_navigation(&mut self) {
        let target = self.target_rotation();
        log::debug!("[nav] active={} target_rotation={:.3}", self.active, target);
        for panel in &mut self.panels {
            if panel.index == self.active {
                panel.fade_in(self.fade_duration);
            } else {
                panel.fade_out(self.fade_duration);
            }
        }
        self.rotation_tween = Some(Tween::new(
            self.group_rotation,
            target,
            self.rotation_duration,
            Easing::QuartOut,
        ));
    }

    /// Advance animations by `dt`, then fire the auto-advance timer.
    ///
    /// Returns true when the timer changed the active slide.
    pub fn tick(&mut self, dt: Duration) -> bool {
        for panel in &mut self.panels {
            panel.tick(dt);
        }
        if let Some(tween) = self.rotation_tween.as_mut() {
            self.group_rotation = tween.advance(dt);
            if tween.is_finished() {
                self.rotation_tween = None;
            }
        }
        let fired = self.autoplay.advance(dt);
        for _ in 0..fired {
            self.auto_advance();
        }
        fired > 0
    }

    /// True when no fade or rotation is in flight.
    pub fn is_settled(&self) -> bool {
        self.rotation_tween.is_none() && self.panels.iter().all(|p| !p.is_animating())
    }

    /// World matrix, opacity and index for every panel that should be drawn.
    pub fn draw_list(&self) -> impl Iterator<Item = (usize, Mat4, f32)> + '_ {
        self.panels.iter().filter(|p| p.is_drawn()).map(|p| {
            (
                p.index,
                panel_model_matrix(self.group_rotation, p.rotation_y),
                p.opacity,
            )
        })
    }

    pub fn indicator_distance(&self, index: usize) -> usize {
        indicator::distance(index, self.active, self.slide_count())
    }

    pub fn indicator_visible(&self, index: usize) -> bool {
        indicator::is_visible(index, self.active, self.slide_count())
    }

    pub fn indicator_position(&self, index: usize, viewport_width: f32) -> String {
        indicator::position(index, self.active, self.slide_count(), viewport_width)
    }

    pub fn indicator_transition_delay(&self, index: usize) -> String {
        indicator::transition_delay(index, self.active, self.slide_count())
    }
}
