use crate::color::Color;

// Shared scene and timing constants used by the carousel front-ends.

// Panel geometry
pub const PANEL_RADIUS: f32 = 18.0; // larger = flatter panels, smaller = more cylindrical
pub const PANEL_HEIGHT: f32 = 15.0; // tall enough to cover the viewport
pub const PANEL_RADIAL_SEGMENTS: u32 = 32;

// Camera
pub const CAMERA_NEAR: f32 = 0.5;
pub const CAMERA_FAR: f32 = 1000.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Viewport width bands (CSS pixels)
pub const SMALL_MOBILE_MAX_WIDTH: f32 = 480.0;
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const TABLET_MAX_WIDTH: f32 = 1024.0;

// Navigation timing
pub const AUTOPLAY_INTERVAL_MS: u64 = 3000;
pub const FADE_DURATION_MS: u64 = 800;
pub const ROTATION_DURATION_MS: u64 = 1500;

// Texture synthesis
pub const TEXTURE_SIZE: u32 = 1024;
pub const MAX_TEXTURE_SIZE: u32 = 8192; // wgpu default max_texture_dimension_2d
pub const DARKEN_FACTOR: f64 = 0.2;
pub const DUAL_SPLIT: f32 = 0.5; // left column share of a two-region panel
pub const TRIPLE_PLACEHOLDER_COLORS: [Color; 3] = [
    Color::rgb(0xFF, 0x33, 0x66), // pink
    Color::rgb(0x33, 0xCC, 0xFF), // sky
    Color::rgb(0x66, 0xFF, 0x33), // lime
];

// Strokes are white; alpha is the stroke opacity
pub const DIVIDER_WIDTH: u32 = 10;
pub const DIVIDER_ALPHA: f32 = 0.3;
pub const BORDER_WIDTH: u32 = 20; // centered on the edge, so half of it lands inside
pub const BORDER_ALPHA: f32 = 0.2;

// Scene background
pub const CLEAR_COLOR: Color = Color::rgb(0, 0, 0);
