// Host-side tests for JSON configuration.

use carousel_core::{CarouselConfig, CarouselError, Color, PanelLayout};
use std::time::Duration;

#[test]
fn partial_document_keeps_defaults() {
    let config = CarouselConfig::from_json(r#"{"autoplay": false, "fade_duration_ms": 400}"#).unwrap();
    assert!(!config.autoplay);
    assert_eq!(config.fade_duration(), Duration::from_millis(400));
    assert_eq!(config.rotation_duration(), Duration::from_millis(1500));
    assert_eq!(config.autoplay_interval(), Duration::from_millis(3000));
    assert_eq!(config.slides.len(), 4);
    assert_eq!(config.texture_size, 1024);
}

#[test]
fn slides_accept_camel_case_image_fields() {
    let json = r##"{
        "slides": [
            {"id": 7, "title": "Dual", "color": "#123456", "primaryImage": "/a.png"},
            {"id": 8, "title": "Zones", "color": "#abc", "zone2Image": "/b.png"},
            {"id": 9, "title": "Flat", "color": "ff9933"}
        ]
    }"##;
    let config = CarouselConfig::from_json(json).unwrap();
    let layouts: Vec<PanelLayout> = config.slides.iter().map(|s| s.layout()).collect();
    assert_eq!(layouts, vec![PanelLayout::Dual, PanelLayout::Triple, PanelLayout::Plain]);
    assert_eq!(config.slides[0].region_images().as_slice(), &[Some("/a.png"), None]);
    assert_eq!(config.slides[1].color, Color::rgb(0xAA, 0xBB, 0xCC));
    assert!(!config.slides[2].has_images());
    for slide in &config.slides {
        assert_eq!(slide.region_images().len(), slide.layout().region_count());
    }
}

#[test]
fn explicit_layout_overrides_inference() {
    let json = r##"{"slides": [{"id": 0, "title": "x", "color": "#000000", "layout": "triple"}]}"##;
    let config = CarouselConfig::from_json(json).unwrap();
    assert_eq!(config.slides[0].layout(), PanelLayout::Triple);
    assert_eq!(config.slides[0].region_images().len(), 3);
}

#[test]
fn bad_input_is_reported() {
    let bad_color = r##"{"slides": [{"id": 0, "title": "x", "color": "#12"}]}"##;
    assert!(matches!(
        CarouselConfig::from_json(bad_color),
        Err(CarouselError::Config(_))
    ));
    assert!(matches!(
        CarouselConfig::from_json("{not json"),
        Err(CarouselError::Config(_))
    ));
    assert!(matches!(
        CarouselConfig::from_json(r#"{"texture_size": 0}"#),
        Err(CarouselError::ZeroTextureSize)
    ));
    assert!(matches!(
        CarouselConfig::from_json(r#"{"geometry": {"radial_segments": 0}}"#),
        Err(CarouselError::InvalidGeometry(_))
    ));
}

#[test]
fn config_serializes_colors_as_hex() {
    let json = serde_json::to_string(&CarouselConfig::default()).unwrap();
    assert!(json.contains(r##""color":"#ff3366""##), "{json}");
    let back = CarouselConfig::from_json(&json).unwrap();
    assert_eq!(back, CarouselConfig::default());
}

#[test]
fn texture_size_is_capped_at_the_gpu_limit() {
    for size in [9000, u32::MAX] {
        let config = CarouselConfig {
            texture_size: size,
            ..CarouselConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CarouselError::TextureTooLarge(s)) if s == size
        ));
    }
    assert!(CarouselConfig::from_json(r#"{"texture_size": 8192}"#).is_ok());
    assert!(matches!(
        CarouselConfig::from_json(r#"{"texture_size": 8193}"#),
        Err(CarouselError::TextureTooLarge(8193))
    ));
}
