//! Text sizing for overlays.
//!
//! Two estimators live here and neither is authoritative:
//!
//! - [`auto_fit_placement`] is what editor previews use: a zone height and a representative
//!   font class. It never measures text.
//! - [`TextLayoutCalculator`] approximates the render service's fitting loop (shrink from
//!   72px toward 36px until the wrapped block fits) using an average glyph width, so that
//!   callers can warn about crowded zones before rendering.
//!
//! The final font size is decided by the render service.

use crate::{
    foundation::core::{Canvas, Rgb8},
    frames::{
        geometry::{RENDER_TEXT_PADDING, TextZone},
        registry::FrameVariantId,
    },
    overlay::model::{MAX_FONT_SIZE, MIN_FONT_SIZE, Zone},
};

/// Width of the reference editor preview the font classes were tuned against.
const PREVIEW_REFERENCE_WIDTH: f64 = 320.0;

/// Representative preview text size. Not a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSizeClass {
    /// Top zone text.
    Small,
    /// Bottom zone text.
    ExtraSmall,
}

impl FontSizeClass {
    /// Nominal size on the reference preview.
    pub fn reference_px(self) -> f64 {
        match self {
            Self::Small => 14.0,
            Self::ExtraSmall => 12.0,
        }
    }

    /// Nominal size scaled to a surface of the given width.
    pub fn px_on(self, surface: Canvas) -> f64 {
        self.reference_px() * surface.width_f64() / PREVIEW_REFERENCE_WIDTH
    }
}

/// Preview-only zone sizing, see [`auto_fit_placement`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AutoFitPlacement {
    /// Zone being placed.
    pub zone: Zone,
    /// Zone height, percent of canvas height, measured from the zone's canvas edge.
    pub height_percent: f64,
    /// Representative text size.
    pub font_size_class: FontSizeClass,
}

/// Preview placement for a zone when the overlay carries no explicit geometry.
///
/// The text length does not influence the result: previews show a representative size and
/// the render service performs the real auto-sizing.
pub fn auto_fit_placement(zone: Zone, frame: FrameVariantId, text_len: usize) -> AutoFitPlacement {
    let height_percent = match (frame, zone) {
        (FrameVariantId::LowerAnchor, Zone::Top) => 40.0,
        (FrameVariantId::LowerAnchor, Zone::Bottom) => 24.0,
        (FrameVariantId::CenterStrip | FrameVariantId::DividerFrame, _) => 30.0,
    };
    let font_size_class = match zone {
        Zone::Top => FontSizeClass::Small,
        Zone::Bottom => FontSizeClass::ExtraSmall,
    };
    tracing::trace!(%zone, %frame, text_len, height_percent, "auto-fit placement");
    AutoFitPlacement {
        zone,
        height_percent,
        font_size_class,
    }
}

/// Estimated render-service layout of one overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextLayout {
    /// Input text.
    pub text: String,
    /// Zone the text was fitted into.
    pub zone: Zone,
    /// Chosen font size in pixels.
    pub font_size: u32,
    /// Left edge of every line.
    pub x: i32,
    /// Top of the text block, centered in the zone.
    pub y: i32,
    /// Wrapped lines.
    pub lines: Vec<String>,
    /// Pixel advance between lines.
    pub line_height: i32,
    /// Text color.
    pub color: Rgb8,
}

impl TextLayout {
    /// Height of the whole block.
    pub fn total_height(&self) -> i32 {
        self.lines.len() as i32 * self.line_height
    }
}

/// Render-parity text fitter for a canvas width.
#[derive(Clone, Copy, Debug)]
pub struct TextLayoutCalculator {
    max_text_width: i32,
}

impl Default for TextLayoutCalculator {
    fn default() -> Self {
        Self::new(Canvas::REEL.width as i32)
    }
}

impl TextLayoutCalculator {
    /// Decrement between tried font sizes.
    pub const FONT_STEP: u32 = 4;
    /// Padding above and below the text block inside a zone.
    pub const VERTICAL_MARGIN: i32 = 30;
    /// Average glyph advance as a fraction of the font size (bold sans).
    pub const GLYPH_WIDTH_RATIO: f64 = 0.6;
    /// Line height as a multiple of the font size.
    pub const LINE_SPACING: f64 = 1.3;

    /// Calculator for a canvas `reel_width` pixels wide, minus side padding.
    pub fn new(reel_width: i32) -> Self {
        Self {
            max_text_width: reel_width - 2 * RENDER_TEXT_PADDING,
        }
    }

    /// Line width budget in pixels.
    pub fn max_text_width(&self) -> i32 {
        self.max_text_width
    }

    /// Largest font (72 down to 36 in steps of 4) whose wrapped block fits the zone.
    /// Text that does not fit even at 36 stays at 36 and overflows.
    pub fn calculate_layout(&self, text: &str, zone: &TextZone) -> TextLayout {
        let available = zone.height() - 2 * Self::VERTICAL_MARGIN;

        let mut font_size = MAX_FONT_SIZE;
        let mut fitted = None;
        while font_size >= MIN_FONT_SIZE {
            let lines = self.wrap_text(text, font_size);
            if lines.len() as i32 * line_height(font_size) <= available {
                fitted = Some(lines);
                break;
            }
            font_size -= Self::FONT_STEP;
        }
        let lines = match fitted {
            Some(lines) => lines,
            None => {
                font_size = MIN_FONT_SIZE;
                self.wrap_text(text, font_size)
            }
        };

        let line_height = line_height(font_size);
        let total = lines.len() as i32 * line_height;
        TextLayout {
            text: text.to_string(),
            zone: zone.zone,
            font_size,
            x: RENDER_TEXT_PADDING,
            y: zone.center_y() - total.div_euclid(2),
            lines,
            line_height,
            color: Rgb8::WHITE,
        }
    }

    /// Greedy word wrap against an approximate characters-per-line budget.
    pub fn wrap_text(&self, text: &str, font_size: u32) -> Vec<String> {
        let max_chars = self.max_chars_per_line(font_size);

        let mut lines = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;
        for word in text.split_whitespace() {
            let word_len = word.chars().count();
            if current_len + word_len + current.len() > max_chars {
                if !current.is_empty() {
                    lines.push(current.join(" "));
                }
                current = vec![word];
                current_len = word_len;
            } else {
                current.push(word);
                current_len += word_len;
            }
        }
        if !current.is_empty() {
            lines.push(current.join(" "));
        }

        if lines.is_empty() {
            lines.push(text.to_string());
        }
        lines
    }

    /// Characters that fit on one line at `font_size`.
    pub fn max_chars_per_line(&self, font_size: u32) -> usize {
        let avg_char_width = f64::from(font_size) * Self::GLYPH_WIDTH_RATIO;
        (f64::from(self.max_text_width) / avg_char_width) as usize
    }
}

/// Line advance for `font_size`, truncated to whole pixels.
pub fn line_height(font_size: u32) -> i32 {
    (f64::from(font_size) * TextLayoutCalculator::LINE_SPACING) as i32
}

/// True when a text block `[text_y, text_y + text_height]` stays clear of the video band.
pub fn placement_clears_video(
    text_y: i32,
    text_height: i32,
    video_y_start: i32,
    video_y_end: i32,
) -> bool {
    let text_y_end = text_y + text_height;
    text_y_end < video_y_start || text_y > video_y_end
}

/// Estimated render layout of `text` in `zone` of a frame variant.
pub fn calculate_text_for_frame(text: &str, zone: Zone, frame: FrameVariantId) -> TextLayout {
    let geometry = frame.render_geometry();
    TextLayoutCalculator::default().calculate_layout(text, geometry.zone(zone))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/fit.rs"]
mod tests;
