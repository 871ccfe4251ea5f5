use super::*;
use crate::overlay::Zone;

fn sample_record_json() -> serde_json::Value {
    serde_json::json!({
        "reel_id": 42,
        "video_id": 7,
        "chunk_id": 3,
        "reel_number": 2,
        "file_path": "storage/7/reel_2.mp4",
        "duration": 31.4,
        "frame_type": "LOWER_ANCHOR",
        "text_overlays": [{"text": "SALE", "zone": "top"}],
        "has_shadow": true,
        "shadow_intensity": 0.3,
        "has_overlay": false,
        "overlay_opacity": 0.1,
        "is_edited": false,
        "is_uploaded": false,
        "created_at": "2026-10-01T12:00:00",
        "updated_at": "2026-10-01T12:00:00"
    })
}

#[test]
fn record_parses_with_optional_metadata_absent() {
    let data: ReelEditData = serde_json::from_value(sample_record_json()).unwrap();
    assert_eq!(data.reel_id, 42);
    assert_eq!(data.frame_variant().unwrap(), FrameVariantId::LowerAnchor);
    assert_eq!(data.text_overlays.as_ref().unwrap()[0].zone, Zone::Top);
    assert!(data.title.is_none());
    assert!(data.hashtags.is_none());
    assert_eq!(data.label(), "Reel #2 · 31s");
}

#[test]
fn missing_required_field_is_rejected() {
    let mut v = sample_record_json();
    v.as_object_mut().unwrap().remove("shadow_intensity");
    let err = serde_json::from_value::<ReelEditData>(v).unwrap_err();
    assert!(err.to_string().contains("shadow_intensity"));
}

#[test]
fn null_overlays_are_accepted() {
    let mut v = sample_record_json();
    v["text_overlays"] = serde_json::Value::Null;
    let data: ReelEditData = serde_json::from_value(v).unwrap();
    assert!(data.text_overlays.is_none());
}

#[test]
fn unknown_frame_type_surfaces_on_access() {
    let mut v = sample_record_json();
    v["frame_type"] = "POLAROID".into();
    let data: ReelEditData = serde_json::from_value(v).unwrap();
    assert!(matches!(
        data.frame_variant(),
        Err(ReelError::UnknownFrameVariant(s)) if s == "POLAROID"
    ));
}

#[test]
fn edit_request_serializes_only_present_fields() {
    let req = ReelEditRequest {
        frame_type: Some(FrameVariantId::DividerFrame),
        has_shadow: Some(false),
        ..ReelEditRequest::default()
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"frame_type": "DIVIDER_FRAME", "has_shadow": false})
    );
}

#[test]
fn frame_list_entries_must_be_known() {
    let known = FrameConfigResponse {
        id: "CENTER_STRIP".into(),
        name: "Center Strip".into(),
        description: String::new(),
        preview_image: None,
    };
    assert_eq!(known.variant_id().unwrap(), FrameVariantId::CenterStrip);
    let unknown = FrameConfigResponse {
        id: "GRID".into(),
        ..known
    };
    assert!(unknown.variant_id().is_err());
}

#[test]
fn unit_interval_bounds_are_inclusive() {
    assert!(ensure_unit_interval("x", 0.0).is_ok());
    assert!(ensure_unit_interval("x", 1.0).is_ok());
    assert!(ensure_unit_interval("x", 1.01).is_err());
    assert!(ensure_unit_interval("x", f64::NAN).is_err());
}
