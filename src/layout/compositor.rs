use crate::{
    foundation::core::{Canvas, Point, Rect, Rgb8},
    foundation::error::ReelResult,
    foundation::math::{fnv1a64, pct},
    frames::registry::FrameVariantId,
    overlay::{
        fit::{FontSizeClass, auto_fit_placement},
        model::{OverlaySet, TextOverlay, Zone},
    },
};

/// Horizontal padding inside preview text regions, surface pixels.
pub const TEXT_REGION_PADDING_PX: f64 = 16.0;

/// Declarative preview of a reel: what to paint where, in surface pixels.
///
/// This is an approximation of the render service's output and says so through
/// [`LayoutDescription::approximate`]. Painting order is background, video band, dividers,
/// then text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutDescription {
    /// Surface the layout was composed for.
    pub canvas: Canvas,
    /// Frame variant in effect.
    pub frame: FrameVariantId,
    /// Always `true`.
    pub approximate: bool,
    /// Fill outside the band.
    pub background: Rgb8,
    /// Full-width video placeholder.
    pub video_band: Rect,
    /// Zero or two lines.
    pub dividers: Vec<DividerRect>,
    /// Visible overlays only, top first.
    pub text: Vec<TextBox>,
}

/// One divider line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DividerRect {
    /// Painted area.
    pub rect: Rect,
    /// Line color.
    pub color: Rgb8,
}

/// Placed overlay text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBox {
    /// Source zone.
    pub zone: Zone,
    /// Overlay text, untrimmed.
    pub text: String,
    /// Region the text is laid out in (centered, wrapped).
    pub region: Rect,
    /// Center of the text block; the explicit `x`/`y` of the overlay when provided.
    pub anchor: Point,
    /// Preview font size.
    pub font: FontChoice,
}

/// Font size used by a preview text box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontChoice {
    /// Overlay carried an explicit size.
    Explicit {
        /// Override scaled to the surface.
        px: f64,
    },
    /// Representative preview size; the render service picks the real one.
    Representative {
        /// Zone font class.
        class: FontSizeClass,
        /// Class size scaled to the surface.
        px: f64,
    },
}

impl FontChoice {
    /// Size in surface pixels.
    pub fn px(self) -> f64 {
        match self {
            Self::Explicit { px } | Self::Representative { px, .. } => px,
        }
    }
}

impl LayoutDescription {
    /// Text box of `zone`, if visible.
    pub fn text_for(&self, zone: Zone) -> Option<&TextBox> {
        self.text.iter().find(|t| t.zone == zone)
    }

    /// Serialized form; identical inputs produce identical bytes.
    pub fn to_canonical_json(&self) -> ReelResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// FNV-1a over [`Self::to_canonical_json`], for snapshot comparisons.
    pub fn fingerprint(&self) -> ReelResult<u64> {
        Ok(fnv1a64(&self.to_canonical_json()?))
    }
}

/// Layout on the 1080x1920 reel canvas.
pub fn compose_layout(frame: FrameVariantId, overlays: &OverlaySet) -> LayoutDescription {
    compose_layout_on(frame, overlays, Canvas::REEL)
}

/// Layout for a frame given by its wire id. Unknown ids fail; there is no default frame.
pub fn compose_layout_for_id(
    frame_id: &str,
    overlays: &OverlaySet,
    surface: Canvas,
) -> ReelResult<LayoutDescription> {
    let frame = frame_id.parse::<FrameVariantId>()?;
    Ok(compose_layout_on(frame, overlays, surface))
}

/// Layout on an arbitrary preview surface. Percentages scale with the surface; divider
/// offsets, divider thickness and text padding are absolute pixels.
#[tracing::instrument(level = "debug", skip(overlays))]
pub fn compose_layout_on(
    frame: FrameVariantId,
    overlays: &OverlaySet,
    surface: Canvas,
) -> LayoutDescription {
    let geometry = frame.geometry();
    let (w, h) = (surface.width_f64(), surface.height_f64());

    let band_top = pct(h, geometry.video_band_top_pct);
    let band_bottom = pct(h, geometry.video_band_bottom_pct());
    let video_band = Rect::new(0.0, band_top, w, band_bottom);

    let dividers = match geometry.dividers {
        Some(spec) => {
            let above = band_top - spec.offset_px;
            let below = band_bottom + spec.offset_px;
            vec![
                DividerRect {
                    rect: Rect::new(0.0, above, w, above + spec.thickness_px),
                    color: spec.color,
                },
                DividerRect {
                    rect: Rect::new(0.0, below, w, below + spec.thickness_px),
                    color: spec.color,
                },
            ]
        }
        None => Vec::new(),
    };

    let text = overlays
        .iter()
        .filter(|o| o.is_visible())
        .map(|o| text_box(frame, o, surface))
        .collect();

    LayoutDescription {
        canvas: surface,
        frame,
        approximate: true,
        background: geometry.background,
        video_band,
        dividers,
        text,
    }
}

fn text_box(frame: FrameVariantId, overlay: &TextOverlay, surface: Canvas) -> TextBox {
    let (w, h) = (surface.width_f64(), surface.height_f64());
    let placement = auto_fit_placement(overlay.zone, frame, overlay.text.chars().count());
    let zone_h = pct(h, placement.height_percent);

    let x0 = TEXT_REGION_PADDING_PX.min(w * 0.5);
    let x1 = (w - TEXT_REGION_PADDING_PX).max(x0);
    let region = match overlay.zone {
        Zone::Top => Rect::new(x0, 0.0, x1, zone_h),
        Zone::Bottom => Rect::new(x0, h - zone_h, x1, h),
    };

    let (sx, sy) = surface.scale_from_reel();
    let center = region.center();
    let anchor = Point::new(
        overlay.x.map_or(center.x, |x| f64::from(x) * sx),
        overlay.y.map_or(center.y, |y| f64::from(y) * sy),
    );
    let font = match overlay.font_size {
        Some(size) => FontChoice::Explicit {
            px: f64::from(size) * sx,
        },
        None => FontChoice::Representative {
            class: placement.font_size_class,
            px: placement.font_size_class.px_on(surface),
        },
    };

    TextBox {
        zone: overlay.zone,
        text: overlay.text.clone(),
        region,
        anchor,
        font,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compositor.rs"]
mod tests;
