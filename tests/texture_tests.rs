// Host-side tests for slide texture synthesis.

use carousel_core::{
    fit_within, Color, PanelLayout, Region, RegionImage, SlideCanvas, SlideConfig,
    TRIPLE_PLACEHOLDER_COLORS,
};
use image::{Rgba, RgbaImage};

const PINK: Color = Color::rgb(0xFF, 0x33, 0x66);

fn px(canvas: &SlideCanvas, x: u32, y: u32) -> Rgba<u8> {
    *canvas.image().get_pixel(x, y)
}

fn slide(layout: PanelLayout) -> SlideConfig {
    SlideConfig {
        layout: Some(layout),
        ..SlideConfig::new(0, "test", PINK)
    }
}

#[test]
fn darken_truncates_each_channel() {
    assert_eq!(PINK.darken(0.2).to_string(), "#cc2851");
    assert_eq!(Color::rgb(255, 255, 255).darken(0.0), Color::rgb(255, 255, 255));
    assert_eq!(Color::rgb(255, 255, 255).darken(1.0), Color::rgb(0, 0, 0));
}

#[test]
fn plain_panel_is_a_flat_fill_without_border() {
    let mut canvas = SlideCanvas::for_slide(&slide(PanelLayout::Plain), 32, 0.2).unwrap();
    assert!(canvas.regions().is_empty());
    assert!(canvas.image().pixels().all(|p| *p == PINK.to_rgba()));
    assert!(canvas.take_dirty());
    assert!(!canvas.take_dirty());
}

#[test]
fn dual_panel_splits_base_and_darkened_color() {
    let canvas = SlideCanvas::for_slide(&slide(PanelLayout::Dual), 64, 0.2).unwrap();
    let regions = canvas.regions();
    assert_eq!(regions.as_slice(), &[Region::new(0, 0, 32, 64), Region::new(32, 0, 32, 64)]);
    assert_eq!(px(&canvas, 20, 32), PINK.to_rgba());
    assert_eq!(px(&canvas, 44, 32), Color::rgb(0xCC, 0x28, 0x51).to_rgba());
}

#[test]
fn strokes_lighten_divider_and_border() {
    let canvas = SlideCanvas::for_slide(&slide(PanelLayout::Dual), 64, 0.2).unwrap();
    let base = PINK.to_rgba();
    let divider = px(&canvas, 30, 32);
    let border = px(&canvas, 2, 32);
    assert!(divider[1] > base[1] && divider[2] > base[2], "{divider:?}");
    assert!(border[1] > base[1] && border[2] > base[2], "{border:?}");
    // the divider is more opaque than the border
    assert!(divider[1] > border[1]);
    assert_eq!(divider[3], 255);
}

#[test]
fn triple_panel_uses_fixed_placeholder_colors() {
    let canvas = SlideCanvas::for_slide(&slide(PanelLayout::Triple), 300, 0.2).unwrap();
    let regions = canvas.regions();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[1], Region::new(100, 0, 100, 300));
    for (x, color) in [50, 150, 250].into_iter().zip(TRIPLE_PLACEHOLDER_COLORS) {
        assert_eq!(px(&canvas, x, 150), color.to_rgba());
    }
}

#[test]
fn zero_size_canvas_is_rejected() {
    assert!(SlideCanvas::for_slide(&slide(PanelLayout::Dual), 0, 0.2).is_err());
}

#[test]
fn fit_keeps_aspect_and_centers_slack_axis() {
    let region = Region::new(0, 0, 100, 100);
    let wide = fit_within(200, 100, region);
    assert_eq!((wide.x, wide.y, wide.width, wide.height), (0.0, 25.0, 100.0, 50.0));
    let tall = fit_within(50, 200, Region::new(10, 0, 100, 100));
    assert_eq!((tall.x, tall.y, tall.width, tall.height), (47.5, 0.0, 25.0, 100.0));
    let empty = fit_within(0, 10, region);
    assert_eq!(empty.width, 0.0);
}

#[test]
fn composite_draws_loaded_regions_and_keeps_placeholders() {
    let mut canvas = SlideCanvas::for_slide(&slide(PanelLayout::Dual), 64, 0.2).unwrap();
    canvas.take_dirty();
    let blue = RgbaImage::from_pixel(10, 20, Rgba([0, 0, 255, 255]));
    canvas.composite(&[RegionImage::Decoded(&blue), RegionImage::Placeholder]);

    assert!(canvas.take_dirty());
    assert_eq!(px(&canvas, 20, 32), Rgba([0, 0, 255, 255]));
    assert_eq!(px(&canvas, 44, 32), Color::rgb(0xCC, 0x28, 0x51).to_rgba());
    // strokes are redrawn over the image
    assert_ne!(px(&canvas, 2, 32), Rgba([0, 0, 255, 255]));
    assert_ne!(px(&canvas, 30, 32), Rgba([0, 0, 255, 255]));
}

#[test]
fn composite_with_only_placeholders_changes_nothing() {
    let mut canvas = SlideCanvas::for_slide(&slide(PanelLayout::Triple), 90, 0.2).unwrap();
    let before = canvas.image().clone();
    canvas.take_dirty();
    canvas.composite(&[RegionImage::Placeholder; 3]);
    assert!(!canvas.take_dirty());
    assert_eq!(canvas.image(), &before);
}

#[test]
fn decode_rejects_garbage() {
    assert!(carousel_core::decode_image(b"not an image").is_err());
}

#[test]
fn partial_load_leaves_placeholder_border_alone() {
    let mut canvas = SlideCanvas::for_slide(&slide(PanelLayout::Triple), 300, 0.2).unwrap();
    let zone1_border = px(&canvas, 50, 2);
    let zone3_border = px(&canvas, 250, 297);
    let green = RgbaImage::from_pixel(100, 300, Rgba([0, 255, 0, 255]));
    canvas.composite(&[
        RegionImage::Placeholder,
        RegionImage::Decoded(&green),
        RegionImage::Placeholder,
    ]);

    assert_eq!(px(&canvas, 50, 2), zone1_border);
    assert_eq!(px(&canvas, 250, 297), zone3_border);
    assert_eq!(px(&canvas, 150, 150), Rgba([0, 255, 0, 255]));
    // the loaded region gets its border back over the image
    let top = px(&canvas, 150, 2);
    assert!(top[0] > 0 && top[2] > 0, "{top:?}");
}

#[test]
fn regions_intersect_on_overlap_only() {
    let a = Region::new(0, 0, 100, 10);
    assert_eq!(a.intersect(Region::new(50, 5, 100, 100)), Some(Region::new(50, 5, 50, 5)));
    assert_eq!(a.intersect(Region::new(100, 0, 10, 10)), None);
}

#[test]
fn oversized_canvas_is_rejected() {
    assert!(matches!(
        SlideCanvas::for_slide(&slide(PanelLayout::Dual), u32::MAX, 0.2),
        Err(carousel_core::CarouselError::TextureTooLarge(_))
    ));
}
