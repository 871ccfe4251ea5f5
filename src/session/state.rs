use crate::{
    api::wire::{ReelEditData, ReelEditRequest, ensure_unit_interval},
    foundation::error::ReelResult,
    frames::registry::FrameVariantId,
    overlay::model::{OverlaySet, TextOverlay, Zone},
};

/// Shadow/overlay settings forwarded to the render service as-is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositingFlags {
    /// Drop shadow under the video band.
    pub has_shadow: bool,
    /// `0.0..=1.0`.
    pub shadow_intensity: f64,
    /// Dark wash over the video.
    pub has_overlay: bool,
    /// `0.0..=1.0`.
    pub overlay_opacity: f64,
}

impl Default for CompositingFlags {
    fn default() -> Self {
        Self {
            has_shadow: true,
            shadow_intensity: 0.3,
            has_overlay: false,
            overlay_opacity: 0.1,
        }
    }
}

impl CompositingFlags {
    /// Both intensities within `0.0..=1.0`.
    pub fn validate(&self) -> ReelResult<()> {
        ensure_unit_interval("shadow_intensity", self.shadow_intensity)?;
        ensure_unit_interval("overlay_opacity", self.overlay_opacity)
    }
}

/// Working copy of one reel's visual configuration.
///
/// Every mutator reports whether it changed anything so the session can tell real edits
/// from no-ops. Failed mutators leave the state untouched.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReelEditState {
    /// Selected frame variant.
    pub frame: FrameVariantId,
    /// At most one overlay per zone.
    pub overlays: OverlaySet,
    /// Shadow and wash settings.
    pub compositing: CompositingFlags,
}

impl ReelEditState {
    /// No overlays, default compositing.
    pub fn new(frame: FrameVariantId) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// Validates a backend record at the boundary: known frame, one overlay per zone,
    /// bounded text, compositing values in range.
    pub fn from_record(data: &ReelEditData) -> ReelResult<Self> {
        let frame = data.frame_variant()?;
        let overlays = OverlaySet::try_from(data.text_overlays.clone().unwrap_or_default())?;
        let compositing = CompositingFlags {
            has_shadow: data.has_shadow,
            shadow_intensity: data.shadow_intensity,
            has_overlay: data.has_overlay,
            overlay_opacity: data.overlay_opacity,
        };
        compositing.validate()?;
        Ok(Self {
            frame,
            overlays,
            compositing,
        })
    }

    /// Switches the frame; overlays are kept.
    pub fn select_frame(&mut self, frame: FrameVariantId) -> bool {
        if self.frame == frame {
            return false;
        }
        self.frame = frame;
        true
    }

    /// Fails with `ZoneOccupied` when the zone already holds an overlay (even an empty one).
    pub fn add_overlay(&mut self, zone: Zone, text: impl Into<String>) -> ReelResult<()> {
        self.overlays.insert(TextOverlay::new(zone, text))
    }

    /// Fails with `ZoneEmpty` when nothing occupies the zone.
    pub fn update_overlay_text(&mut self, zone: Zone, text: impl Into<String>) -> ReelResult<bool> {
        self.overlays.set_text(zone, text)
    }

    /// Removing an empty zone is a no-op, not an error.
    pub fn remove_overlay(&mut self, zone: Zone) -> bool {
        self.overlays.remove(zone).is_some()
    }

    /// Replaces all compositing flags after validating them.
    pub fn set_compositing(&mut self, flags: CompositingFlags) -> ReelResult<bool> {
        flags.validate()?;
        if self.compositing == flags {
            return Ok(false);
        }
        self.compositing = flags;
        Ok(true)
    }

    /// Full `PATCH` payload. Blank overlays are dropped here, not when typed, so the zone
    /// stays occupied in the editor while the user is still writing.
    pub fn to_edit_request(&self) -> ReelResult<ReelEditRequest> {
        self.compositing.validate()?;
        let overlays = self.overlays.visible();
        for o in &overlays {
            o.validate()?;
        }
        Ok(ReelEditRequest {
            frame_type: Some(self.frame),
            text_overlays: Some(overlays),
            has_shadow: Some(self.compositing.has_shadow),
            shadow_intensity: Some(self.compositing.shadow_intensity),
            has_overlay: Some(self.compositing.has_overlay),
            overlay_opacity: Some(self.compositing.overlay_opacity),
        })
    }
}

/// Persistence side of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SaveStatus {
    /// Working state equals the saved snapshot.
    Clean,
    /// Unsaved edits.
    Dirty,
    /// A save is in flight.
    Saving,
}

/// Render side of the session, independent of [`SaveStatus`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RenderStatus {
    /// No render requested yet.
    Idle,
    /// Render request in flight.
    Rendering,
    /// The backend queued the render.
    Complete {
        /// Backend job handle.
        job_id: String,
        /// Backend acknowledgement.
        message: String,
    },
    /// The render request failed.
    Failed {
        /// Error text.
        message: String,
    },
}

impl RenderStatus {
    /// A render request is in flight.
    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::Rendering)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
