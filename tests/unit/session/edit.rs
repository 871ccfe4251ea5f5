use std::sync::Mutex;

use super::*;

fn record(reel_id: u64) -> ReelEditData {
    ReelEditData {
        reel_id,
        video_id: 1,
        chunk_id: 1,
        reel_number: 1,
        file_path: "reels/1.mp4".to_string(),
        duration: 30.0,
        frame_type: "CENTER_STRIP".to_string(),
        text_overlays: None,
        has_shadow: true,
        shadow_intensity: 0.3,
        has_overlay: false,
        overlay_opacity: 0.1,
        is_edited: false,
        title: None,
        caption: None,
        hashtags: None,
        quality_score: None,
        is_uploaded: false,
        instagram_url: None,
        created_at: "2024-01-01T00:00:00".to_string(),
        updated_at: "2024-01-01T00:00:00".to_string(),
    }
}

#[derive(Default)]
struct FakeBackend {
    fail_update: bool,
    fail_render: bool,
    updates: Mutex<Vec<ReelEditRequest>>,
    renders: Mutex<u32>,
}

impl ReelBackend for FakeBackend {
    async fn get_reel(&self, reel_id: u64) -> ReelResult<ReelEditData> {
        if reel_id == 404 {
            return Err(ReelError::ReelNotFound(reel_id));
        }
        Ok(record(reel_id))
    }

    async fn update_reel(
        &self,
        reel_id: u64,
        request: &ReelEditRequest,
    ) -> ReelResult<ReelEditData> {
        self.updates.lock().unwrap().push(request.clone());
        if self.fail_update {
            return Err(ReelError::Backend {
                status: 500,
                detail: "database unavailable".to_string(),
            });
        }
        let mut data = record(reel_id);
        data.is_edited = true;
        if let Some(frame) = request.frame_type {
            data.frame_type = frame.to_string();
        }
        data.text_overlays = request.text_overlays.clone();
        Ok(data)
    }

    async fn request_render(&self, reel_id: u64) -> ReelResult<RenderJobResponse> {
        *self.renders.lock().unwrap() += 1;
        if self.fail_render {
            return Err(ReelError::transport("connection reset"));
        }
        Ok(RenderJobResponse {
            job_id: "job-1".to_string(),
            reel_id,
            status: "queued".to_string(),
            message: "Render job queued".to_string(),
        })
    }
}

fn clean_session() -> EditSession {
    EditSession::from_record(record(9)).unwrap()
}

#[test]
fn edits_mark_dirty_and_reverting_marks_clean() {
    let mut session = clean_session();
    assert_eq!(session.save_status(), SaveStatus::Clean);

    assert!(session.select_frame(FrameVariantId::DividerFrame));
    assert_eq!(session.save_status(), SaveStatus::Dirty);

    assert!(session.select_frame(FrameVariantId::CenterStrip));
    assert_eq!(session.save_status(), SaveStatus::Clean);
}

#[test]
fn no_op_edits_do_not_dirty() {
    let mut session = clean_session();
    assert!(!session.select_frame(FrameVariantId::CenterStrip));
    assert!(!session.remove_overlay(Zone::Top));
    assert_eq!(session.save_status(), SaveStatus::Clean);
}

#[test]
fn failed_add_leaves_status_untouched() {
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();
    session.save_status = SaveStatus::Clean;
    session.saved = session.state.clone();

    assert!(session.add_overlay(Zone::Top, "again").is_err());
    assert_eq!(session.save_status(), SaveStatus::Clean);
}

#[test]
fn saving_twice_is_rejected() {
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();
    session.begin_save().unwrap();
    assert_eq!(session.save_status(), SaveStatus::Saving);

    let err = session.begin_save().unwrap_err();
    assert!(matches!(err, ReelError::InvalidTransition(_)));
}

#[test]
fn clean_session_has_nothing_to_save() {
    let mut session = clean_session();
    assert!(matches!(
        session.begin_save(),
        Err(ReelError::InvalidTransition(_))
    ));
}

#[test]
fn edits_during_save_keep_session_dirty() {
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();
    session.begin_save().unwrap();

    session.add_overlay(Zone::Bottom, "Link in bio").unwrap();
    assert_eq!(session.save_status(), SaveStatus::Saving);

    session.finish_save(Ok(record(9))).unwrap();
    assert_eq!(session.save_status(), SaveStatus::Dirty);
    assert!(session.saved_state().overlays.is_occupied(Zone::Top));
    assert!(!session.saved_state().overlays.is_occupied(Zone::Bottom));
}

#[test]
fn discard_restores_saved_snapshot() {
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();
    session.discard_changes().unwrap();
    assert_eq!(session.save_status(), SaveStatus::Clean);
    assert!(session.state().overlays.is_empty());
}

#[test]
fn render_requires_clean_state() {
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();
    assert!(matches!(
        session.begin_render(),
        Err(ReelError::InvalidTransition(_))
    ));
}

#[test]
fn second_render_while_rendering_is_rejected() {
    let mut session = clean_session();
    session.begin_render().unwrap();
    assert!(matches!(
        session.begin_render(),
        Err(ReelError::RenderAlreadyInProgress)
    ));

    // Edits are still allowed mid-render.
    session.add_overlay(Zone::Bottom, "Swipe up").unwrap();
    assert_eq!(session.save_status(), SaveStatus::Dirty);
}

#[tokio::test]
async fn save_success_returns_to_clean() {
    let backend = FakeBackend::default();
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "").unwrap();
    session.add_overlay(Zone::Bottom, "Follow").unwrap();

    session.save(&backend).await.unwrap();
    assert_eq!(session.save_status(), SaveStatus::Clean);
    assert!(session.record().unwrap().is_edited);

    let updates = backend.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].text_overlays.as_ref().unwrap().len(), 1);
}

#[tokio::test]
async fn save_failure_returns_to_dirty_with_error() {
    let backend = FakeBackend {
        fail_update: true,
        ..FakeBackend::default()
    };
    let mut session = clean_session();
    session.select_frame(FrameVariantId::LowerAnchor);

    let err = session.save(&backend).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session.save_status(), SaveStatus::Dirty);
    assert!(session.last_error().unwrap().contains("database unavailable"));
}

#[tokio::test]
async fn render_saves_dirty_state_first() {
    let backend = FakeBackend::default();
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();

    let job = session.render(&backend).await.unwrap();
    assert_eq!(job.job_id, "job-1");
    assert_eq!(backend.updates.lock().unwrap().len(), 1);
    assert_eq!(*backend.renders.lock().unwrap(), 1);
    assert_eq!(session.save_status(), SaveStatus::Clean);
    assert!(matches!(
        session.render_status(),
        RenderStatus::Complete { job_id, .. } if job_id == "job-1"
    ));
}

#[tokio::test]
async fn failed_save_stops_render() {
    let backend = FakeBackend {
        fail_update: true,
        ..FakeBackend::default()
    };
    let mut session = clean_session();
    session.add_overlay(Zone::Top, "SALE").unwrap();

    let err = session.render(&backend).await.unwrap_err();
    assert!(matches!(err, ReelError::Backend { status: 500, .. }));
    assert_eq!(*backend.renders.lock().unwrap(), 0);
    assert_eq!(session.render_status(), &RenderStatus::Idle);
    assert_eq!(session.save_status(), SaveStatus::Dirty);
}

#[tokio::test]
async fn render_failure_is_reported() {
    let backend = FakeBackend {
        fail_render: true,
        ..FakeBackend::default()
    };
    let mut session = clean_session();

    assert!(session.render(&backend).await.is_err());
    assert!(matches!(session.render_status(), RenderStatus::Failed { .. }));
    assert!(session.begin_render().is_ok());
}

#[tokio::test]
async fn load_propagates_not_found() {
    let backend = FakeBackend::default();
    let err = EditSession::load(&backend, 404).await.unwrap_err();
    assert!(matches!(err, ReelError::ReelNotFound(404)));
    assert!(!err.is_retryable());

    let session = EditSession::load(&backend, 5).await.unwrap();
    assert_eq!(session.reel_id(), 5);
    assert_eq!(session.state().frame, FrameVariantId::CenterStrip);
}
