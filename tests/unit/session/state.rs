use super::*;
use crate::foundation::error::ReelError;

fn record(frame_type: &str, overlays: Option<Vec<TextOverlay>>) -> ReelEditData {
    ReelEditData {
        reel_id: 7,
        video_id: 1,
        chunk_id: 2,
        reel_number: 3,
        file_path: "reels/7.mp4".to_string(),
        duration: 31.4,
        frame_type: frame_type.to_string(),
        text_overlays: overlays,
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

#[test]
fn lower_anchor_scenario_rejects_third_overlay() {
    let mut state = ReelEditState::new(FrameVariantId::LowerAnchor);
    state.add_overlay(Zone::Top, "SALE").unwrap();
    state.add_overlay(Zone::Bottom, "Link in bio").unwrap();
    let before = state.clone();

    let err = state.add_overlay(Zone::Bottom, "Swipe up").unwrap_err();
    assert!(matches!(err, ReelError::ZoneOccupied(Zone::Bottom)));
    assert_eq!(state, before);
    assert_eq!(state.overlays.len(), 2);
}

#[test]
fn removing_absent_zone_is_a_no_op() {
    let mut state = ReelEditState::new(FrameVariantId::CenterStrip);
    let before = state.clone();
    assert!(!state.remove_overlay(Zone::Top));
    assert_eq!(state, before);
}

#[test]
fn empty_top_overlay_stays_in_state_but_not_in_payload() {
    let mut state = ReelEditState::new(FrameVariantId::CenterStrip);
    state.add_overlay(Zone::Top, "").unwrap();
    state.add_overlay(Zone::Bottom, "Follow for more").unwrap();
    assert!(state.overlays.is_occupied(Zone::Top));

    let request = state.to_edit_request().unwrap();
    let sent = request.text_overlays.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].zone, Zone::Bottom);
    assert_eq!(request.frame_type, Some(FrameVariantId::CenterStrip));
    assert_eq!(request.shadow_intensity, Some(0.3));
}

#[test]
fn selecting_the_same_frame_reports_no_change() {
    let mut state = ReelEditState::new(FrameVariantId::DividerFrame);
    assert!(!state.select_frame(FrameVariantId::DividerFrame));
    assert!(state.select_frame(FrameVariantId::LowerAnchor));
    assert_eq!(state.frame, FrameVariantId::LowerAnchor);
}

#[test]
fn updating_an_empty_zone_fails() {
    let mut state = ReelEditState::default();
    let err = state.update_overlay_text(Zone::Top, "x").unwrap_err();
    assert!(matches!(err, ReelError::ZoneEmpty(Zone::Top)));
}

#[test]
fn compositing_values_must_be_unit_interval() {
    let mut state = ReelEditState::default();
    let bad = CompositingFlags {
        shadow_intensity: 1.5,
        ..CompositingFlags::default()
    };
    assert!(state.set_compositing(bad).is_err());
    assert_eq!(state.compositing, CompositingFlags::default());
    assert!(!state.set_compositing(CompositingFlags::default()).unwrap());
}

#[test]
fn record_with_duplicate_zones_is_rejected() {
    let data = record(
        "CENTER_STRIP",
        Some(vec![
            TextOverlay::new(Zone::Top, "a"),
            TextOverlay::new(Zone::Top, "b"),
        ]),
    );
    assert!(matches!(
        ReelEditState::from_record(&data),
        Err(ReelError::ZoneOccupied(Zone::Top))
    ));
}

#[test]
fn record_with_unknown_frame_is_rejected() {
    let data = record("POLAROID", None);
    assert!(matches!(
        ReelEditState::from_record(&data),
        Err(ReelError::UnknownFrameVariant(id)) if id == "POLAROID"
    ));
}

#[test]
fn record_loads_into_state() {
    let data = record(
        "LOWER_ANCHOR",
        Some(vec![TextOverlay::new(Zone::Bottom, "Link in bio")]),
    );
    let state = ReelEditState::from_record(&data).unwrap();
    assert_eq!(state.frame, FrameVariantId::LowerAnchor);
    assert_eq!(
        state.overlays.get(Zone::Bottom).map(|o| o.text.as_str()),
        Some("Link in bio")
    );
    assert!(state.compositing.has_shadow);
}
