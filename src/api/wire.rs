//! JSON shapes exchanged with the reel backend.
//!
//! Response types keep `frame_type` and `text_overlays` loosely typed so that a bad record
//! surfaces as a precise validation error ([`ReelError::UnknownFrameVariant`],
//! [`ReelError::ZoneOccupied`], ...) when it is turned into an edit state, instead of a
//! generic deserialization failure. Required fields are still required.

use crate::{
    foundation::error::{ReelError, ReelResult},
    frames::registry::FrameVariantId,
    overlay::model::TextOverlay,
};

/// `GET /api/reels/{reel_id}` and `PATCH` response.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReelEditData {
    /// Reel id.
    pub reel_id: u64,
    /// Source video.
    pub video_id: u64,
    /// Source chunk within the video.
    pub chunk_id: u64,
    /// 1-based position among the video's reels.
    pub reel_number: u32,
    /// Rendered file, relative to the backend's storage root.
    pub file_path: String,
    /// Seconds.
    pub duration: f64,

    /// Frame variant wire id, validated by [`Self::frame_variant`].
    pub frame_type: String,
    /// Saved overlays; `null` means none.
    pub text_overlays: Option<Vec<TextOverlay>>,
    /// Drop shadow under the video band.
    pub has_shadow: bool,
    /// `0.0..=1.0`.
    pub shadow_intensity: f64,
    /// Dark wash over the video.
    pub has_overlay: bool,
    /// `0.0..=1.0`.
    pub overlay_opacity: f64,
    /// Set once the reel has been saved from an editor.
    pub is_edited: bool,

    /// Upload metadata, not edited here.
    #[serde(default)]
    pub title: Option<String>,
    /// Upload metadata, not edited here.
    #[serde(default)]
    pub caption: Option<String>,
    /// Upload metadata, not edited here.
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    /// Backend-assigned score.
    #[serde(default)]
    pub quality_score: Option<f64>,

    /// Published already.
    pub is_uploaded: bool,
    /// Published post, when uploaded.
    #[serde(default)]
    pub instagram_url: Option<String>,

    /// Backend timestamp, passed through as text.
    pub created_at: String,
    /// Backend timestamp, passed through as text.
    pub updated_at: String,
}

/// `PATCH /api/reels/{reel_id}` body. Absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReelEditRequest {
    /// New frame variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<FrameVariantId>,
    /// Full replacement overlay list, visible overlays only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlays: Option<Vec<TextOverlay>>,
    /// See [`ReelEditData::has_shadow`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_shadow: Option<bool>,
    /// See [`ReelEditData::shadow_intensity`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_intensity: Option<f64>,
    /// See [`ReelEditData::has_overlay`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_overlay: Option<bool>,
    /// See [`ReelEditData::overlay_opacity`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
}

/// `POST /api/reels/{reel_id}/render` response. Completion is observed by polling.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderJobResponse {
    /// Backend job handle.
    pub job_id: String,
    /// Reel being rendered.
    pub reel_id: u64,
    /// Backend job status, e.g. `queued`.
    pub status: String,
    /// Human-readable acknowledgement.
    pub message: String,
}

/// Element of `GET /api/reels/frames/list`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameConfigResponse {
    /// Frame variant wire id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Thumbnail URL, when the backend has one.
    #[serde(default)]
    pub preview_image: Option<String>,
}

impl FrameConfigResponse {
    /// The registry id this entry refers to; ids the client does not know are rejected.
    pub fn variant_id(&self) -> ReelResult<FrameVariantId> {
        self.id.parse()
    }
}

impl ReelEditData {
    /// Parsed `frame_type`; unknown ids fail.
    pub fn frame_variant(&self) -> ReelResult<FrameVariantId> {
        self.frame_type.parse()
    }

    /// Display label used by editors, e.g. `Reel #3 · 31s`.
    pub fn label(&self) -> String {
        format!("Reel #{} · {}s", self.reel_number, self.duration.round() as i64)
    }
}

pub(crate) fn ensure_unit_interval(name: &str, value: f64) -> ReelResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ReelError::validation(format!(
            "{name} must be within 0.0..=1.0, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/api/wire.rs"]
mod tests;
