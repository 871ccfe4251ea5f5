use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::{Rect, Rgb8},
    foundation::error::{ReelError, ReelResult},
    layout::compositor::LayoutDescription,
};

/// Placeholder fill for the video band.
pub const VIDEO_PLACEHOLDER: Rgb8 = Rgb8::new(0x52, 0x52, 0x5b);
/// Alpha of the white wash marking text regions.
pub const TEXT_WASH_ALPHA: u8 = 0x33;
/// Largest RGBA buffer a preview may allocate (256 MiB, e.g. 8192x8192).
pub const MAX_RASTER_BYTES: u64 = 256 * 1024 * 1024;

/// Paints a layout into an opaque RGBA image: background, video band placeholder, dividers,
/// then a translucent wash over each text region. No glyphs are drawn.
///
/// Surfaces whose buffer would exceed [`MAX_RASTER_BYTES`] are rejected.
pub fn rasterize(layout: &LayoutDescription) -> ReelResult<image::RgbaImage> {
    let (w, h) = (layout.canvas.width, layout.canvas.height);
    let bytes = u64::from(w)
        .checked_mul(u64::from(h))
        .and_then(|px| px.checked_mul(4))
        .filter(|&b| b <= MAX_RASTER_BYTES);
    if bytes.is_none() {
        return Err(ReelError::validation(format!(
            "preview surface {w}x{h} exceeds the {MAX_RASTER_BYTES}-byte raster limit"
        )));
    }

    let mut img = image::RgbaImage::from_pixel(w, h, opaque(layout.background));

    fill(&mut img, layout.video_band, |_| opaque(VIDEO_PLACEHOLDER));
    for divider in &layout.dividers {
        fill(&mut img, divider.rect, |_| opaque(divider.color));
    }
    for text in &layout.text {
        fill(&mut img, text.region, |dst| over(dst, Rgb8::WHITE, TEXT_WASH_ALPHA));
    }
    Ok(img)
}

/// Rasterizes `layout` and writes it as PNG, creating parent directories.
pub fn save_png(layout: &LayoutDescription, path: &Path) -> ReelResult<()> {
    let img = rasterize(layout)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn opaque(c: Rgb8) -> image::Rgba<u8> {
    image::Rgba([c.r, c.g, c.b, 255])
}

/// Source-over of a flat color onto an opaque destination pixel.
fn over(dst: image::Rgba<u8>, src: Rgb8, alpha: u8) -> image::Rgba<u8> {
    let a = u16::from(alpha);
    let inv = 255 - a;
    let mix = |s: u8, d: u8| {
        mul_div255(u16::from(s), a).saturating_add(mul_div255(u16::from(d), inv))
    };
    image::Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        255,
    ])
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Applies `paint` to the pixels covered by `rect` (edges rounded), clipped to the image.
fn fill(
    img: &mut image::RgbaImage,
    rect: Rect,
    paint: impl Fn(image::Rgba<u8>) -> image::Rgba<u8>,
) {
    let (w, h) = (img.width(), img.height());
    let span = |lo: f64, hi: f64, max: u32| {
        let lo = lo.round().clamp(0.0, f64::from(max)) as u32;
        let hi = hi.round().clamp(0.0, f64::from(max)) as u32;
        lo..hi.max(lo)
    };
    let xs = span(rect.x0, rect.x1, w);
    for y in span(rect.y0, rect.y1, h) {
        for x in xs.clone() {
            let px = img.get_pixel_mut(x, y);
            *px = paint(*px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/raster.rs"]
mod tests;
