use super::*;

fn zone(y_start: i32, y_end: i32) -> TextZone {
    TextZone {
        zone: Zone::Top,
        y_start,
        y_end,
        max_width: 980,
    }
}

#[test]
fn symmetric_frames_use_thirty_percent_zones() {
    for frame in [FrameVariantId::CenterStrip, FrameVariantId::DividerFrame] {
        for z in Zone::ALL {
            assert_eq!(auto_fit_placement(z, frame, 10).height_percent, 30.0);
        }
    }
}

#[test]
fn lower_anchor_zones_are_asymmetric() {
    let top = auto_fit_placement(Zone::Top, FrameVariantId::LowerAnchor, 4);
    let bottom = auto_fit_placement(Zone::Bottom, FrameVariantId::LowerAnchor, 4);
    assert_eq!(top.height_percent, 40.0);
    assert_eq!(bottom.height_percent, 24.0);
}

#[test]
fn font_class_depends_on_zone_not_length() {
    let short = auto_fit_placement(Zone::Top, FrameVariantId::CenterStrip, 1);
    let long = auto_fit_placement(Zone::Top, FrameVariantId::CenterStrip, 200);
    assert_eq!(short.font_size_class, long.font_size_class);
    assert_eq!(short.font_size_class, FontSizeClass::Small);
    assert_eq!(
        auto_fit_placement(Zone::Bottom, FrameVariantId::CenterStrip, 1).font_size_class,
        FontSizeClass::ExtraSmall
    );
}

#[test]
fn font_class_scales_with_surface_width() {
    let preview = Canvas::new(320, 569).unwrap();
    assert_eq!(FontSizeClass::Small.px_on(preview), 14.0);
    assert_eq!(FontSizeClass::ExtraSmall.px_on(Canvas::new(640, 1138).unwrap()), 24.0);
}

#[test]
fn short_text_uses_max_font_size() {
    let layout = TextLayoutCalculator::default().calculate_layout("Short text", &zone(0, 600));
    assert_eq!(layout.font_size, 72);
    assert_eq!(layout.lines, vec!["Short text".to_string()]);
}

#[test]
fn word_wrap_breaks_at_word_boundaries() {
    let calc = TextLayoutCalculator::default();
    assert_eq!(calc.max_chars_per_line(72), 22);
    let lines = calc.wrap_text("This is a test caption for the reel", 72);
    assert_eq!(
        lines,
        vec!["This is a test caption".to_string(), "for the reel".to_string()]
    );
}

#[test]
fn overlong_text_bottoms_out_at_min_font() {
    let text = vec!["word"; 100].join(" ");
    let layout = TextLayoutCalculator::default().calculate_layout(&text, &zone(0, 200));
    assert_eq!(layout.font_size, 36);
    assert!(layout.total_height() > 200);
}

#[test]
fn medium_text_shrinks_until_it_fits() {
    let text = vec!["caption"; 30].join(" ");
    let z = zone(0, 400);
    let layout = TextLayoutCalculator::default().calculate_layout(&text, &z);
    assert!(layout.font_size < 72);
    assert!(layout.font_size >= 36);
    assert!(layout.total_height() <= z.height() - 60);
}

#[test]
fn block_is_centered_in_zone() {
    let layout = TextLayoutCalculator::default().calculate_layout("Centered", &zone(100, 500));
    assert_eq!(layout.line_height, 93);
    assert_eq!(layout.y, 300 - 46);
    assert_eq!(layout.x, 50);
}

#[test]
fn line_height_truncates() {
    assert_eq!(line_height(72), 93);
    assert_eq!(line_height(36), 46);
}

#[test]
fn empty_text_is_one_empty_line() {
    let calc = TextLayoutCalculator::default();
    assert_eq!(calc.wrap_text("", 72), vec![String::new()]);
}

#[test]
fn center_strip_top_text_sits_above_video() {
    let layout = calculate_text_for_frame("Top caption", Zone::Top, FrameVariantId::CenterStrip);
    assert_eq!(layout.zone, Zone::Top);
    assert!(layout.y < 656);
    assert!(placement_clears_video(layout.y, layout.total_height(), 656, 1264));
}

#[test]
fn lower_anchor_top_zone_has_room_for_large_text() {
    let layout = calculate_text_for_frame(
        "Large top caption with more space",
        Zone::Top,
        FrameVariantId::LowerAnchor,
    );
    assert!(layout.font_size >= 60);
}

#[test]
fn overlap_detection() {
    assert!(placement_clears_video(0, 100, 656, 1264));
    assert!(placement_clears_video(1300, 100, 656, 1264));
    assert!(!placement_clears_video(600, 100, 656, 1264));
    assert!(!placement_clears_video(1200, 100, 656, 1264));
}
