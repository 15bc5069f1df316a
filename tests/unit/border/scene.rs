use super::*;

fn scene(w: f64, h: f64) -> BorderScene {
    BorderScene::synthesize(Size::new(w, h), &BorderConfig::default())
}

#[test]
fn identical_sizes_give_identical_scenes() {
    let a = scene(320.0, 180.5);
    let b = scene(320.0, 180.5);
    assert_eq!(a, b);
    for (pa, pb) in a.paths_in_paint_order().zip(b.paths_in_paint_order()) {
        assert_eq!(pa.path.elements(), pb.path.elements());
    }
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.to_svg(), b.to_svg());
}

#[test]
fn different_sizes_give_different_geometry() {
    assert_ne!(scene(320.0, 180.0).fingerprint(), scene(320.5, 180.0).fingerprint());
}

#[test]
fn minimum_size_boundary() {
    assert!(scene(47.5, 200.0).is_empty());
    assert!(scene(200.0, 47.5).is_empty());
    assert!(!scene(48.0, 48.0).is_empty());

    let empty = scene(10.0, 10.0);
    assert_eq!(empty.paths_in_paint_order().count(), 0);
    assert!(!empty.to_svg().contains("<path"));
}

#[test]
fn offset_group_paints_before_main() {
    let s = scene(300.0, 200.0);
    let roles: Vec<_> = s.groups().iter().map(|g| g.role).collect();
    assert_eq!(roles, vec![OutlineRole::Offset, OutlineRole::Main]);

    let cfg = BorderConfig::default();
    let colors: Vec<_> = s.paths_in_paint_order().map(|p| p.color).collect();
    assert_eq!(
        colors,
        vec![cfg.offset.color, cfg.offset.color, cfg.main.color, cfg.main.color]
    );
    let offset = s.group(OutlineRole::Offset).unwrap();
    let main = s.group(OutlineRole::Main).unwrap();
    assert!(offset.outline.rect.x0 > main.outline.rect.x0);
    assert!(offset.outline.rect.y0 > main.outline.rect.y0);
}

#[test]
fn svg_carries_stroke_attributes() {
    let svg = scene(240.0, 120.0).to_svg();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("viewBox=\"0 0 240 120\""));
    assert!(svg.contains("preserveAspectRatio=\"none\""));
    assert!(svg.contains("overflow=\"visible\""));
    assert_eq!(svg.matches("<path ").count(), 4);
    assert_eq!(svg.matches("vector-effect=\"non-scaling-stroke\"").count(), 4);
    assert_eq!(svg.matches("stroke-dasharray=\"9 4\"").count(), 1);

    // Offset strokes come first in document order.
    let offset_at = svg.find("stroke=\"#252525\"").unwrap();
    let main_at = svg.find("stroke=\"#1f1f1f\"").unwrap();
    assert!(offset_at < main_at);
}

#[test]
fn bleed_region_grows_every_edge() {
    let s = scene(100.0, 60.0);
    assert_eq!(s.bleed_region(), Rect::new(-24.0, -24.0, 124.0, 84.0));
}

#[test]
fn number_formatting_is_compact() {
    assert_eq!(num(10.0), "10");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(1.23456), "1.235");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(-2.25), "-2.25");
}
