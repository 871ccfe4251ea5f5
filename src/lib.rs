//! reelframe models the visual framing of short vertical video reels.
//!
//! A reel is a 1080x1920 canvas with the source video in a horizontal band and up to two
//! text overlays, one above the band and one below it. The crate covers:
//!
//! 1. **Frames**: the fixed registry of frame variants and their geometry, both the
//!    percentage-based preview geometry and the pixel geometry of the render service.
//! 2. **Overlays**: zone-partitioned text overlays (at most one per zone) plus text fitting
//!    estimates.
//! 3. **Layout**: a pure compositor turning a frame and its overlays into a declarative,
//!    approximate [`LayoutDescription`], which [`rasterize`] can paint.
//! 4. **Session**: the edit state machine (`Clean`/`Dirty`/`Saving`, render status) driven
//!    against a [`ReelBackend`], and a cancellable status poller.
//!
//! Everything except the backend client and the poller is synchronous and deterministic.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod api;
mod foundation;
mod frames;
mod layout;
mod overlay;
mod poll;
mod preview;
mod session;

pub use api::client::{HttpReelBackend, ReelBackend};
pub use api::config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT, ENV_API_TOKEN, ENV_API_URL, ENV_TIMEOUT_SECS,
};
pub use api::wire::{FrameConfigResponse, ReelEditData, ReelEditRequest, RenderJobResponse};
pub use foundation::core::{Canvas, Point, Rect, Rgb8};
pub use foundation::error::{ErrorClass, ReelError, ReelResult};
pub use frames::geometry::{
    DividerSpec, FrameGeometry, PREVIEW_BAND_HEIGHT_PCT, RENDER_DIVIDER_GAP,
    RENDER_DIVIDER_THICKNESS, RENDER_TEXT_PADDING, RENDER_VIDEO_HEIGHT, RENDER_VIDEO_WIDTH,
    RENDER_ZONE_MARGIN, RenderDividers, RenderGeometry, TextZone,
};
pub use frames::registry::{
    FrameVariant, FrameVariantId, geometry_for, list_variants, render_geometry_for, variant_for,
};
pub use layout::compositor::{
    DividerRect, FontChoice, LayoutDescription, TEXT_REGION_PADDING_PX, TextBox, compose_layout,
    compose_layout_for_id, compose_layout_on,
};
pub use overlay::fit::{
    AutoFitPlacement, FontSizeClass, TextLayout, TextLayoutCalculator, auto_fit_placement,
    calculate_text_for_frame, line_height, placement_clears_video,
};
pub use overlay::model::{
    MAX_FONT_SIZE, MAX_OVERLAY_CHARS, MIN_FONT_SIZE, OverlaySet, TextOverlay, Zone,
    check_text_len,
};
pub use poll::poller::{
    ANALYTICS_INTERVAL, PollConfig, PollHandle, VIDEO_LIST_INTERVAL, spawn_poll,
};
pub use preview::raster::{
    MAX_RASTER_BYTES, TEXT_WASH_ALPHA, VIDEO_PLACEHOLDER, rasterize, save_png,
};
pub use session::edit::EditSession;
pub use session::state::{CompositingFlags, ReelEditState, RenderStatus, SaveStatus};
