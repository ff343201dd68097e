pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod indicator;
pub mod navigation;
pub mod panel;
pub mod texture;
pub mod tween;

pub use camera::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use navigation::*;
pub use panel::*;
pub use texture::*;
pub use tween::*;

// Shaders bundled as string constants
pub static PANEL_WGSL: &str = include_str!("../shaders/panel.wgsl");
