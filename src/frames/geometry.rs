//! Frame geometry in two flavors.
//!
//! [`FrameGeometry`] is the preview approximation: percentages of the canvas height, the
//! same numbers every editor surface uses. [`RenderGeometry`] mirrors the render service's
//! pixel layout on the 1080x1920 canvas and is what text fitting estimates against.
//! The two intentionally disagree by a few percent (the preview band is 35% tall, the
//! rendered band is 608px = 31.7%); only the render service is pixel-exact.

use crate::{
    foundation::core::{Canvas, Rgb8},
    frames::registry::FrameVariantId,
    overlay::Zone,
};

/// Height of the preview video band for every variant, percent of canvas height.
pub const PREVIEW_BAND_HEIGHT_PCT: f64 = 35.0;

/// Preview layout of a frame variant, relative to the canvas height.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameGeometry {
    /// Top edge of the video band.
    pub video_band_top_pct: f64,
    /// Band height, [`PREVIEW_BAND_HEIGHT_PCT`] for every variant.
    pub video_band_height_pct: f64,
    /// Fill outside the band.
    pub background: Rgb8,
    /// Divider lines, `DIVIDER_FRAME` only.
    pub dividers: Option<DividerSpec>,
}

/// Horizontal rules drawn just outside the video band.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DividerSpec {
    /// Gap between the band edge and the line, surface pixels.
    pub offset_px: f64,
    /// Line thickness, surface pixels.
    pub thickness_px: f64,
    /// Line color.
    pub color: Rgb8,
}

impl FrameGeometry {
    /// Preview geometry of `id`.
    pub fn for_variant(id: FrameVariantId) -> Self {
        match id {
            FrameVariantId::CenterStrip => Self {
                video_band_top_pct: 32.5,
                video_band_height_pct: PREVIEW_BAND_HEIGHT_PCT,
                background: Rgb8::BLACK,
                dividers: None,
            },
            FrameVariantId::DividerFrame => Self {
                video_band_top_pct: 32.5,
                video_band_height_pct: PREVIEW_BAND_HEIGHT_PCT,
                background: Rgb8::new(0x2b, 0x2b, 0x2b),
                dividers: Some(DividerSpec {
                    offset_px: 5.0,
                    thickness_px: 2.0,
                    color: Rgb8::WHITE,
                }),
            },
            FrameVariantId::LowerAnchor => Self {
                video_band_top_pct: 43.0,
                video_band_height_pct: PREVIEW_BAND_HEIGHT_PCT,
                background: Rgb8::BLACK,
                dividers: None,
            },
        }
    }

    /// Bottom edge of the video band.
    pub fn video_band_bottom_pct(&self) -> f64 {
        self.video_band_top_pct + self.video_band_height_pct
    }
}

/// Rendered video band width, full canvas width.
pub const RENDER_VIDEO_WIDTH: i32 = 1080;
/// 1080 * 9 / 16 = 607.5, rounded up by the render service.
pub const RENDER_VIDEO_HEIGHT: i32 = 608;
/// Distance between the band edge and a divider line.
pub const RENDER_DIVIDER_GAP: i32 = 10;
/// Rendered divider thickness.
pub const RENDER_DIVIDER_THICKNESS: i32 = 2;
/// Margin kept between a text zone and the video band.
pub const RENDER_ZONE_MARGIN: i32 = 50;
/// Horizontal padding on each side of a text zone.
pub const RENDER_TEXT_PADDING: i32 = 50;

/// Render-service layout of a frame variant in reel-canvas pixels.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderGeometry {
    /// Always [`Canvas::REEL`].
    pub canvas: Canvas,
    /// Fill outside the band.
    pub background: Rgb8,
    /// First row of the video band.
    pub video_top: i32,
    /// Band width.
    pub video_width: i32,
    /// Band height.
    pub video_height: i32,
    /// Divider lines, `DIVIDER_FRAME` only.
    pub dividers: Option<RenderDividers>,
    /// Top zone first, then bottom.
    pub text_zones: [TextZone; 2],
}

/// Divider lines as the render service draws them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderDividers {
    /// Line thickness in pixels.
    pub thickness: i32,
    /// Line color.
    pub color: Rgb8,
    /// Row of the line above the band.
    pub top_y: i32,
    /// Row of the line below the band.
    pub bottom_y: i32,
}

/// Vertical span where overlay text may be placed without touching the video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextZone {
    /// Which zone this span belongs to.
    pub zone: Zone,
    /// First row, inclusive.
    pub y_start: i32,
    /// Exclusive.
    pub y_end: i32,
    /// Widest line the zone accepts.
    pub max_width: i32,
}

impl TextZone {
    /// Span height in pixels.
    pub fn height(&self) -> i32 {
        self.y_end - self.y_start
    }

    /// Middle row, rounded down.
    pub fn center_y(&self) -> i32 {
        (self.y_start + self.y_end).div_euclid(2)
    }
}

impl RenderGeometry {
    /// Render-service geometry of `id`.
    pub fn for_variant(id: FrameVariantId) -> Self {
        let (video_top, background, dividers) = match id {
            // (1920 - 608) / 2
            FrameVariantId::CenterStrip => (656, Rgb8::BLACK, false),
            FrameVariantId::DividerFrame => (656, Rgb8::new(0x2b, 0x2b, 0x2b), true),
            // 180px below center
            FrameVariantId::LowerAnchor => (836, Rgb8::BLACK, false),
        };
        Self::with_video_top(video_top, background, dividers)
    }

    fn with_video_top(video_top: i32, background: Rgb8, dividers: bool) -> Self {
        let canvas = Canvas::REEL;
        let canvas_h = canvas.height as i32;
        let video_bottom = video_top + RENDER_VIDEO_HEIGHT;
        let max_width = canvas.width as i32 - 2 * RENDER_TEXT_PADDING;

        let dividers = dividers.then_some(RenderDividers {
            thickness: RENDER_DIVIDER_THICKNESS,
            color: Rgb8::WHITE,
            top_y: video_top - RENDER_DIVIDER_GAP,
            bottom_y: video_bottom + RENDER_DIVIDER_GAP,
        });

        Self {
            canvas,
            background,
            video_top,
            video_width: RENDER_VIDEO_WIDTH,
            video_height: RENDER_VIDEO_HEIGHT,
            dividers,
            text_zones: [
                TextZone {
                    zone: Zone::Top,
                    y_start: 0,
                    y_end: video_top - RENDER_ZONE_MARGIN,
                    max_width,
                },
                TextZone {
                    zone: Zone::Bottom,
                    y_start: video_bottom + RENDER_ZONE_MARGIN,
                    y_end: canvas_h,
                    max_width,
                },
            ],
        }
    }

    /// First row below the video band.
    pub fn video_bottom(&self) -> i32 {
        self.video_top + self.video_height
    }

    /// Rows above the band.
    pub fn top_black_space(&self) -> i32 {
        self.video_top
    }

    /// Rows below the band.
    pub fn bottom_black_space(&self) -> i32 {
        self.canvas.height as i32 - self.video_bottom()
    }

    /// Text span of `zone`.
    pub fn zone(&self, zone: Zone) -> &TextZone {
        match zone {
            Zone::Top => &self.text_zones[0],
            Zone::Bottom => &self.text_zones[1],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/geometry.rs"]
mod tests;
