//! Static carousel configuration.
//!
//! Everything here is plain data that can be deserialized from JSON supplied
//! by the host page. Every field has a default so a partial document (or no
//! document at all) yields the stock four-slide carousel.

use crate::color::Color;
use crate::constants::*;
use crate::error::{CarouselError, Result};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

/// How a panel texture is partitioned into image regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelLayout {
    /// One flat fill of the slide color.
    Plain,
    /// Two columns: base color and a darkened variant.
    Dual,
    /// Three equal columns with fixed placeholder colors.
    Triple,
}

impl PanelLayout {
    pub fn region_count(self) -> usize {
        match self {
            PanelLayout::Plain => 0,
            PanelLayout::Dual => 2,
            PanelLayout::Triple => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    pub id: u32,
    pub title: String,
    pub color: Color,
    /// Explicit layout; inferred from the image fields when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PanelLayout>,
    #[serde(default, alias = "primaryImage", skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    #[serde(default, alias = "secondaryImage", skip_serializing_if = "Option::is_none")]
    pub secondary_image: Option<String>,
    #[serde(default, alias = "zone1Image", skip_serializing_if = "Option::is_none")]
    pub zone1_image: Option<String>,
    #[serde(default, alias = "zone2Image", skip_serializing_if = "Option::is_none")]
    pub zone2_image: Option<String>,
    #[serde(default, alias = "zone3Image", skip_serializing_if = "Option::is_none")]
    pub zone3_image: Option<String>,
}

impl SlideConfig {
    pub fn new(id: u32, title: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            title: title.into(),
            color,
            layout: None,
            primary_image: None,
            secondary_image: None,
            zone1_image: None,
            zone2_image: None,
            zone3_image: None,
        }
    }

    pub fn layout(&self) -> PanelLayout {
        if let Some(layout) = self.layout {
            return layout;
        }
        let any_zone =
            self.zone1_image.is_some() || self.zone2_image.is_some() || self.zone3_image.is_some();
        if any_zone {
            PanelLayout::Triple
        } else if self.primary_image.is_some() || self.secondary_image.is_some() {
            PanelLayout::Dual
        } else {
            PanelLayout::Plain
        }
    }

    /// Image path per region, in region order (left to right).
    pub fn region_images(&self) -> SmallVec<[Option<&str>; 3]> {
        match self.layout() {
            PanelLayout::Plain => SmallVec::new(),
            PanelLayout::Dual => smallvec![
                self.primary_image.as_deref(),
                self.secondary_image.as_deref()
            ],
            PanelLayout::Triple => smallvec![
                self.zone1_image.as_deref(),
                self.zone2_image.as_deref(),
                self.zone3_image.as_deref()
            ],
        }
    }

    pub fn has_images(&self) -> bool {
        self.region_images().iter().any(Option::is_some)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            radius: PANEL_RADIUS,
            height: PANEL_HEIGHT,
            radial_segments: PANEL_RADIAL_SEGMENTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub slides: Vec<SlideConfig>,
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
    pub fade_duration_ms: u64,
    pub rotation_duration_ms: u64,
    pub geometry: GeometryConfig,
    pub texture_size: u32,
    pub darken_factor: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slides: default_slides(),
            autoplay: true,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            fade_duration_ms: FADE_DURATION_MS,
            rotation_duration_ms: ROTATION_DURATION_MS,
            geometry: GeometryConfig::default(),
            texture_size: TEXTURE_SIZE,
            darken_factor: DARKEN_FACTOR,
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        if self.texture_size == 0 {
            return Err(CarouselError::ZeroTextureSize);
        }
        if self.texture_size > MAX_TEXTURE_SIZE {
            return Err(CarouselError::TextureTooLarge(self.texture_size));
        }
        if self.geometry.radial_segments == 0 {
            return Err(CarouselError::InvalidGeometry("radial_segments must be at least 1"));
        }
        if !(self.geometry.radius > 0.0 && self.geometry.height > 0.0) {
            return Err(CarouselError::InvalidGeometry("radius and height must be positive"));
        }
        Ok(())
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn rotation_duration(&self) -> Duration {
        Duration::from_millis(self.rotation_duration_ms)
    }
}

/// The stock persona slides: three two-column panels and one three-column.
pub fn default_slides() -> Vec<SlideConfig> {
    let dual = |id: u32, color: Color, primary: &str, secondary: &str| SlideConfig {
        layout: Some(PanelLayout::Dual),
        primary_image: Some(primary.to_string()),
        secondary_image: Some(secondary.to_string()),
        ..SlideConfig::new(id, format!("Persona {}", id + 1), color)
    };
    vec![
        dual(0, Color::rgb(0xFF, 0x33, 0x66), "/images/back1.jpg", "/images/back3.jpg"),
        dual(1, Color::rgb(0x33, 0xCC, 0xFF), "/images/back1.jpg", "/images/zone2.jpeg"),
        dual(2, Color::rgb(0x66, 0xFF, 0x33), "/images/back3.jpg", "/images/back1.jpg"),
        SlideConfig {
            layout: Some(PanelLayout::Triple),
            zone1_image: Some("/images/back3.jpg".to_string()),
            zone2_image: Some("/images/zone2.jpeg".to_string()),
            zone3_image: Some("/images/zone2.jpeg".to_string()),
            ..SlideConfig::new(3, "Persona 4", Color::rgb(0xFF, 0x99, 0x33))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CarouselConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slides.len(), 4);
        assert_eq!(config.slides[3].layout(), PanelLayout::Triple);
    }

    #[test]
    fn layout_is_inferred_from_images() {
        let mut slide = SlideConfig::new(0, "a", Color::rgb(1, 2, 3));
        assert_eq!(slide.layout(), PanelLayout::Plain);
        slide.secondary_image = Some("x.png".into());
        assert_eq!(slide.layout(), PanelLayout::Dual);
        slide.zone2_image = Some("y.png".into());
        assert_eq!(slide.layout(), PanelLayout::Triple);
        slide.layout = Some(PanelLayout::Plain);
        assert!(slide.region_images().is_empty());
    }

    #[test]
    fn empty_slide_list_is_rejected() {
        let err = CarouselConfig::from_json(r#"{"slides": []}"#).unwrap_err();
        assert!(matches!(err, CarouselError::NoSlides));
    }
}
