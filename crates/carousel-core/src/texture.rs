//! Offscreen RGBA drawing surface for slide textures.
//!
//! A `SlideCanvas` is painted synchronously with placeholder colors when the
//! panel is built, then upgraded in place once region images resolve. The
//! renderer polls `take_dirty` each frame and re-uploads changed pixels.

use crate::color::Color;
use crate::config::{PanelLayout, SlideConfig};
use crate::constants::*;
use crate::error::{CarouselError, Result};
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use smallvec::SmallVec;

const WHITE: Color = Color::rgb(255, 255, 255);

/// Axis-aligned pixel rectangle inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Overlap of two regions, if any.
    pub fn intersect(self, other: Region) -> Option<Region> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x_end = (self.x + self.width).min(other.x + other.width);
        let y_end = (self.y + self.height).min(other.y + other.height);
        (x < x_end && y < y_end).then(|| Region::new(x, y, x_end - x, y_end - y))
    }
}

/// Sub-pixel placement of an image inside a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale an `img_w`×`img_h` image to fill `region` along its tighter axis,
/// preserving aspect ratio, and center it along the other axis.
pub fn fit_within(img_w: u32, img_h: u32, region: Region) -> FitRect {
    let (x, y) = (region.x as f32, region.y as f32);
    let (width, height) = (region.width as f32, region.height as f32);
    if img_w == 0 || img_h == 0 || region.height == 0 {
        return FitRect {
            x,
            y,
            width: 0.0,
            height: 0.0,
        };
    }
    let img_aspect = img_w as f32 / img_h as f32;
    let target_aspect = width / height;
    if img_aspect > target_aspect {
        let draw_height = width / img_aspect;
        FitRect {
            x,
            y: y + (height - draw_height) / 2.0,
            width,
            height: draw_height,
        }
    } else {
        let draw_width = height * img_aspect;
        FitRect {
            x: x + (width - draw_width) / 2.0,
            y,
            width: draw_width,
            height,
        }
    }
}

/// Outcome of loading one region's image.
#[derive(Clone, Copy, Debug)]
pub enum RegionImage<'a> {
    Decoded(&'a RgbaImage),
    /// No path, or the load failed: keep the flat fill.
    Placeholder,
}

/// Decode an encoded image (PNG or JPEG) into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub struct SlideCanvas {
    image: RgbaImage,
    layout: PanelLayout,
    dirty: bool,
}

impl SlideCanvas {
    /// Paint the placeholder texture for `slide`.
    pub fn for_slide(slide: &SlideConfig, size: u32, darken_factor: f64) -> Result<Self> {
        if size == 0 {
            return Err(CarouselError::ZeroTextureSize);
        }
        if size > MAX_TEXTURE_SIZE {
            return Err(CarouselError::TextureTooLarge(size));
        }
        let layout = slide.layout();
        let mut canvas = Self {
            image: RgbaImage::from_pixel(size, size, slide.color.to_rgba()),
            layout,
            dirty: true,
        };
        match layout {
            PanelLayout::Plain => {}
            PanelLayout::Dual => {
                let regions = canvas.regions();
                canvas.fill(regions[0], slide.color);
                canvas.fill(regions[1], slide.color.darken(darken_factor));
            }
            PanelLayout::Triple => {
                for (region, color) in canvas.regions().into_iter().zip(TRIPLE_PLACEHOLDER_COLORS) {
                    canvas.fill(region, color);
                }
            }
        }
        canvas.draw_strokes();
        Ok(canvas)
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Tightly packed RGBA8 rows, top row first.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Image regions left to right, matching `SlideConfig::region_images`.
    pub fn regions(&self) -> SmallVec<[Region; 3]> {
        let size = self.size();
        let column = |x0: u32, x1: u32| Region::new(x0, 0, x1 - x0, size);
        match self.layout {
            PanelLayout::Plain => SmallVec::new(),
            PanelLayout::Dual => {
                let split = (size as f32 * DUAL_SPLIT).round() as u32;
                [column(0, split), column(split, size)].into_iter().collect()
            }
            PanelLayout::Triple => {
                let third = |k: u32| (size as f32 * k as f32 / 3.0).round() as u32;
                [
                    column(0, third(1)),
                    column(third(1), third(2)),
                    column(third(2), size),
                ]
                .into_iter()
                .collect()
            }
        }
    }

    /// Opaque fill of a region.
    pub fn fill(&mut self, region: Region, color: Color) {
        let px = color.to_rgba();
        self.for_each_in(region, |p| *p = px);
        self.dirty = true;
    }

    /// Alpha-blend `color` over a region, like a translucent canvas stroke.
    pub fn blend(&mut self, region: Region, color: Rgba<u8>) {
        self.for_each_in(region, |p| p.blend(&color));
        self.dirty = true;
    }

    fn for_each_in(&mut self, region: Region, mut f: impl FnMut(&mut Rgba<u8>)) {
        let x_end = (region.x + region.width).min(self.image.width());
        let y_end = (region.y + region.height).min(self.image.height());
        for y in region.y..y_end {
            for x in region.x..x_end {
                f(self.image.get_pixel_mut(x, y));
            }
        }
    }

    /// Draw `img` into `region`, fitted and centered, over the current fill.
    pub fn draw_image_fitted(&mut self, img: &RgbaImage, region: Region) {
        let fit = fit_within(img.width(), img.height(), region);
        let width = fit.width.round() as u32;
        let height = fit.height.round() as u32;
        if width == 0 || height == 0 {
            return;
        }
        let scaled = imageops::resize(img, width, height, FilterType::Triangle);
        imageops::overlay(
            &mut self.image,
            &scaled,
            fit.x.round() as i64,
            fit.y.round() as i64,
        );
        self.dirty = true;
    }

    /// Region dividers and the outer border. Plain panels carry neither.
    pub fn draw_strokes(&mut self) {
        if self.layout == PanelLayout::Plain {
            return;
        }
        self.draw_dividers();
        for strip in self.border_strips() {
            self.blend(strip, WHITE.with_alpha(BORDER_ALPHA));
        }
    }

    fn draw_dividers(&mut self) {
        let size = self.size();
        let divider = WHITE.with_alpha(DIVIDER_ALPHA);
        let half = DIVIDER_WIDTH / 2;
        for region in self.regions().iter().skip(1) {
            let x = region.x.saturating_sub(half);
            self.blend(Region::new(x, 0, DIVIDER_WIDTH, size), divider);
        }
    }

    // A stroke centered on the canvas edge only shows its inner half.
    fn border_strips(&self) -> [Region; 4] {
        let size = self.size();
        let inset = (BORDER_WIDTH / 2).min(size / 2);
        let inner = size - 2 * inset;
        [
            Region::new(0, 0, size, inset),
            Region::new(0, size - inset, size, inset),
            Region::new(0, inset, inset, inner),
            Region::new(size - inset, inset, inset, inner),
        ]
    }

    /// Layer resolved region images over the placeholders, then redraw the
    /// dividers and the part of the border covered by new images. Regions
    /// that keep their placeholder keep their first border. `images` is
    /// indexed like `regions()`; extra entries are ignored.
    pub fn composite(&mut self, images: &[RegionImage<'_>]) {
        let regions = self.regions();
        let mut drawn: SmallVec<[Region; 3]> = SmallVec::new();
        for (region, outcome) in regions.iter().zip(images) {
            if let RegionImage::Decoded(img) = outcome {
                self.draw_image_fitted(img, *region);
                drawn.push(*region);
            }
        }
        if !drawn.is_empty() && self.layout != PanelLayout::Plain {
            self.draw_dividers();
            let border = WHITE.with_alpha(BORDER_ALPHA);
            for strip in self.border_strips() {
                for region in &drawn {
                    if let Some(part) = strip.intersect(*region) {
                        self.blend(part, border);
                    }
                }
            }
        }
        log::debug!(
            "[texture] composited {} of {} regions",
            drawn.len(),
            regions.len()
        );
    }

    /// Returns true once after any change, for the renderer to re-upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
