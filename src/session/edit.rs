use crate::{
    api::{
        client::ReelBackend,
        wire::{ReelEditData, ReelEditRequest, RenderJobResponse},
    },
    foundation::error::{ReelError, ReelResult},
    frames::registry::FrameVariantId,
    layout::compositor::{LayoutDescription, compose_layout},
    overlay::model::Zone,
    session::state::{CompositingFlags, ReelEditState, RenderStatus, SaveStatus},
};

/// Editing session for one reel.
///
/// Holds the working state next to the last snapshot the backend accepted; the session is
/// `Dirty` exactly when the two differ. Saving and rendering are split into `begin_*` /
/// `finish_*` phases so the in-flight status is observable, with [`EditSession::save`] and
/// [`EditSession::render`] driving both phases against a [`ReelBackend`].
#[derive(Clone, Debug)]
pub struct EditSession {
    reel_id: u64,
    record: Option<ReelEditData>,
    state: ReelEditState,
    saved: ReelEditState,
    in_flight: Option<ReelEditState>,
    save_status: SaveStatus,
    render_status: RenderStatus,
    last_error: Option<String>,
}

impl EditSession {
    /// A clean session whose saved snapshot is `state`.
    pub fn new(reel_id: u64, state: ReelEditState) -> Self {
        Self {
            reel_id,
            record: None,
            saved: state.clone(),
            state,
            in_flight: None,
            save_status: SaveStatus::Clean,
            render_status: RenderStatus::Idle,
            last_error: None,
        }
    }

    /// Clean session from a backend record, validated via [`ReelEditState::from_record`].
    pub fn from_record(data: ReelEditData) -> ReelResult<Self> {
        let state = ReelEditState::from_record(&data)?;
        let mut session = Self::new(data.reel_id, state);
        session.record = Some(data);
        Ok(session)
    }

    /// Fetches `reel_id` and opens a session on it.
    #[tracing::instrument(level = "debug", skip(backend))]
    pub async fn load<B: ReelBackend>(backend: &B, reel_id: u64) -> ReelResult<Self> {
        let data = backend.get_reel(reel_id).await?;
        let session = Self::from_record(data)?;
        tracing::debug!(frame = %session.state.frame, overlays = session.state.overlays.len(), "reel loaded");
        Ok(session)
    }

    /// Reel being edited.
    pub fn reel_id(&self) -> u64 {
        self.reel_id
    }

    /// Last record returned by the backend, if the session came from one.
    pub fn record(&self) -> Option<&ReelEditData> {
        self.record.as_ref()
    }

    /// Working state.
    pub fn state(&self) -> &ReelEditState {
        &self.state
    }

    /// Snapshot the backend last accepted.
    pub fn saved_state(&self) -> &ReelEditState {
        &self.saved
    }

    /// Persistence status.
    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    /// Render status.
    pub fn render_status(&self) -> &RenderStatus {
        &self.render_status
    }

    /// Message of the most recent failed save or render; cleared when the next one starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Working state differs from the saved snapshot.
    pub fn is_dirty(&self) -> bool {
        self.state != self.saved
    }

    /// Preview layout of the working state.
    pub fn layout(&self) -> LayoutDescription {
        compose_layout(self.state.frame, &self.state.overlays)
    }

    /// Edit operations mirror [`ReelEditState`] and update the save status.
    pub fn select_frame(&mut self, frame: FrameVariantId) -> bool {
        let changed = self.state.select_frame(frame);
        self.after_edit(changed)
    }

    /// See [`ReelEditState::add_overlay`].
    pub fn add_overlay(&mut self, zone: Zone, text: impl Into<String>) -> ReelResult<()> {
        self.state.add_overlay(zone, text)?;
        self.after_edit(true);
        Ok(())
    }

    /// See [`ReelEditState::update_overlay_text`].
    pub fn update_overlay_text(&mut self, zone: Zone, text: impl Into<String>) -> ReelResult<bool> {
        let changed = self.state.update_overlay_text(zone, text)?;
        Ok(self.after_edit(changed))
    }

    /// See [`ReelEditState::remove_overlay`].
    pub fn remove_overlay(&mut self, zone: Zone) -> bool {
        let changed = self.state.remove_overlay(zone);
        self.after_edit(changed)
    }

    /// See [`ReelEditState::set_compositing`].
    pub fn set_compositing(&mut self, flags: CompositingFlags) -> ReelResult<bool> {
        let changed = self.state.set_compositing(flags)?;
        Ok(self.after_edit(changed))
    }

    /// Restores the last-saved snapshot.
    pub fn discard_changes(&mut self) -> ReelResult<()> {
        if self.save_status == SaveStatus::Saving {
            return Err(ReelError::transition("cannot discard changes while saving"));
        }
        self.state = self.saved.clone();
        self.save_status = SaveStatus::Clean;
        Ok(())
    }

    fn after_edit(&mut self, changed: bool) -> bool {
        if changed && self.save_status != SaveStatus::Saving {
            self.save_status = if self.is_dirty() {
                SaveStatus::Dirty
            } else {
                SaveStatus::Clean
            };
            tracing::debug!(reel_id = self.reel_id, status = ?self.save_status, "state edited");
        }
        changed
    }

    /// `Dirty -> Saving`. Returns the payload to send.
    pub fn begin_save(&mut self) -> ReelResult<ReelEditRequest> {
        match self.save_status {
            SaveStatus::Saving => return Err(ReelError::transition("save already in flight")),
            SaveStatus::Clean => return Err(ReelError::transition("nothing to save")),
            SaveStatus::Dirty => {}
        }
        let request = self.state.to_edit_request()?;
        self.in_flight = Some(self.state.clone());
        self.save_status = SaveStatus::Saving;
        self.last_error = None;
        tracing::debug!(reel_id = self.reel_id, "save started");
        Ok(request)
    }

    /// Applies the backend's answer to the save started by [`Self::begin_save`].
    pub fn finish_save(&mut self, outcome: ReelResult<ReelEditData>) -> ReelResult<()> {
        if self.save_status != SaveStatus::Saving {
            return Err(ReelError::transition("no save in flight"));
        }
        let sent = self.in_flight.take();
        match (outcome, sent) {
            (Ok(data), Some(sent)) => {
                self.saved = sent;
                self.record = Some(data);
                self.save_status = if self.is_dirty() {
                    SaveStatus::Dirty
                } else {
                    SaveStatus::Clean
                };
                tracing::debug!(reel_id = self.reel_id, status = ?self.save_status, "save finished");
                Ok(())
            }
            (Ok(_), None) => {
                self.save_status = SaveStatus::Dirty;
                Err(ReelError::transition("save finished without a pending snapshot"))
            }
            (Err(err), _) => {
                self.save_status = SaveStatus::Dirty;
                self.last_error = Some(err.to_string());
                tracing::warn!(reel_id = self.reel_id, error = %err, "save failed");
                Err(err)
            }
        }
    }

    /// `Idle|Complete|Failed -> Rendering`. Only the saved configuration can be rendered.
    pub fn begin_render(&mut self) -> ReelResult<()> {
        if self.render_status.is_rendering() {
            return Err(ReelError::RenderAlreadyInProgress);
        }
        if self.save_status != SaveStatus::Clean {
            return Err(ReelError::transition(format!(
                "cannot render while {:?}",
                self.save_status
            )));
        }
        self.render_status = RenderStatus::Rendering;
        self.last_error = None;
        tracing::debug!(reel_id = self.reel_id, "render started");
        Ok(())
    }

    /// Applies the backend's answer to the render started by [`Self::begin_render`].
    pub fn finish_render(
        &mut self,
        outcome: ReelResult<RenderJobResponse>,
    ) -> ReelResult<RenderJobResponse> {
        if !self.render_status.is_rendering() {
            return Err(ReelError::transition("no render in flight"));
        }
        match outcome {
            Ok(job) => {
                self.render_status = RenderStatus::Complete {
                    job_id: job.job_id.clone(),
                    message: job.message.clone(),
                };
                tracing::debug!(reel_id = self.reel_id, job_id = %job.job_id, "render queued");
                Ok(job)
            }
            Err(err) => {
                self.render_status = RenderStatus::Failed {
                    message: err.to_string(),
                };
                self.last_error = Some(err.to_string());
                tracing::warn!(reel_id = self.reel_id, error = %err, "render failed");
                Err(err)
            }
        }
    }

    /// Sends the working state to the backend. No automatic retry.
    #[tracing::instrument(level = "debug", skip_all, fields(reel_id = self.reel_id))]
    pub async fn save<B: ReelBackend>(&mut self, backend: &B) -> ReelResult<()> {
        let request = self.begin_save()?;
        let outcome = backend.update_reel(self.reel_id, &request).await;
        self.finish_save(outcome)
    }

    /// Saves first when dirty, then requests a render. A failed save stops here.
    #[tracing::instrument(level = "debug", skip_all, fields(reel_id = self.reel_id))]
    pub async fn render<B: ReelBackend>(&mut self, backend: &B) -> ReelResult<RenderJobResponse> {
        if self.render_status.is_rendering() {
            return Err(ReelError::RenderAlreadyInProgress);
        }
        if self.save_status == SaveStatus::Dirty {
            self.save(backend).await?;
        }
        self.begin_render()?;
        let outcome = backend.request_render(self.reel_id).await;
        self.finish_render(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/edit.rs"]
mod tests;
