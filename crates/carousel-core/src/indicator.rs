//! Slide indicator placement. Pure functions of (index, active, count).

use crate::constants::{MOBILE_MAX_WIDTH, SMALL_MOBILE_MAX_WIDTH, TABLET_MAX_WIDTH};

/// Per-band placement constants for indicators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorBand {
    /// Horizontal offset of neighbors from center, in percent.
    pub offset: i32,
    /// Distance from the top, in pixels.
    pub top_px: i32,
    pub active_scale: f32,
    pub nearby_scale: f32,
}

impl IndicatorBand {
    pub fn for_width(width: f32) -> Self {
        let (offset, top_px, active_scale, nearby_scale) = if width < SMALL_MOBILE_MAX_WIDTH {
            (50, 8, 1.1, 0.85)
        } else if width < MOBILE_MAX_WIDTH {
            (60, 10, 1.15, 0.85)
        } else if width < TABLET_MAX_WIDTH {
            (65, 15, 1.2, 0.9)
        } else {
            (70, 20, 1.3, 0.9)
        };
        Self {
            offset,
            top_px,
            active_scale,
            nearby_scale,
        }
    }
}

/// Shortest distance around the ring between `index` and `active`.
pub fn distance(index: usize, active: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let direct = index.abs_diff(active) % count;
    direct.min(count - direct)
}

/// Only the active indicator and its immediate neighbors are shown.
#[inline]
pub fn is_visible(index: usize, active: usize, count: usize) -> bool {
    distance(index, active, count) <= 1
}

fn is_predecessor(index: usize, active: usize, count: usize) -> bool {
    (active > 0 && index == active - 1) || (active == 0 && index + 1 == count)
}

fn is_successor(index: usize, active: usize, count: usize) -> bool {
    index == active + 1 || (active + 1 == count && index == 0)
}

/// Inline CSS placing indicator `index` for a viewport `width` pixels wide.
pub fn position(index: usize, active: usize, count: usize, width: f32) -> String {
    let band = IndicatorBand::for_width(width);
    if distance(index, active, count) == 0 {
        return format!(
            "left: 50%; top: {}px; transform: translateX(-50%) scale({}); z-index: 10; transition-delay: 0s;",
            band.top_px, band.active_scale
        );
    }
    // predecessor wins when both match (two slides)
    let (left, delay) = if is_predecessor(index, active, count) {
        (50 - band.offset, "0.15s")
    } else if is_successor(index, active, count) {
        (50 + band.offset, "0.2s")
    } else {
        (50, "0.1s")
    };
    format!(
        "left: {}%; top: {}px; transform: translateX(-50%) scale({}); z-index: 5; transition-delay: {};",
        left, band.top_px, band.nearby_scale, delay
    )
}

/// Staggered transition delay in seconds, for a ripple effect.
pub fn transition_delay_secs(index: usize, active: usize, count: usize) -> f32 {
    match distance(index, active, count) {
        0 => 0.0,
        1 => 0.15,
        _ => 0.3,
    }
}

/// Same delay formatted as a CSS time (`0s`, `0.15s`, `0.3s`).
pub fn transition_delay(index: usize, active: usize, count: usize) -> String {
    format!("{}s", transition_delay_secs(index, active, count))
}
