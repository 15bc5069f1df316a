use super::*;
use kurbo::{PathEl, Shape};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn layout_below_minimum_is_none() {
    let cfg = BorderConfig::default();
    assert!(layout_outlines(Size::new(47.5, 300.0), &cfg).is_none());
    assert!(layout_outlines(Size::new(300.0, 47.5), &cfg).is_none());
    assert!(layout_outlines(Size::new(48.0, 48.0), &cfg).is_some());
    assert!(layout_outlines(Size::new(f64::NAN, 300.0), &cfg).is_none());
}

#[test]
fn layout_matches_documented_geometry() {
    let cfg = BorderConfig::default();
    let layout = layout_outlines(Size::new(200.0, 100.0), &cfg).unwrap();

    let main = layout.main;
    assert!(approx(main.rect.x0, 11.2));
    assert!(approx(main.rect.y0, 11.2));
    assert!(approx(main.rect.width(), 177.6));
    assert!(approx(main.rect.height(), 77.6));
    // 77.6 * 0.14 is below the floor.
    assert!(approx(main.radius, 19.0));

    let offset = layout.offset;
    assert!(approx(offset.rect.x0, 16.4));
    assert!(approx(offset.rect.y0, 16.8));
    assert!(approx(offset.rect.width(), 176.8));
    assert!(approx(offset.rect.height(), 76.8));
    assert!(approx(offset.radius, 20.1));
}

#[test]
fn layout_radius_caps_on_large_regions() {
    let cfg = BorderConfig::default();
    let layout = layout_outlines(Size::new(1000.0, 800.0), &cfg).unwrap();
    assert!(approx(layout.main.radius, 30.0));
    assert!(approx(layout.offset.radius, 31.1));
}

#[test]
fn layout_extents_have_floors() {
    let cfg = BorderConfig::default();
    // 48 - 22.4 = 25.6 stays above the floor; shrink the inset to force it.
    let cfg = BorderConfig { inset: 20.0, ..cfg };
    let layout = layout_outlines(Size::new(48.0, 48.0), &cfg).unwrap();
    assert!(approx(layout.main.rect.width(), 16.0));
    assert!(approx(layout.offset.rect.width(), 15.2));

    let cfg = BorderConfig {
        offset_shrink: 10.0,
        ..cfg
    };
    let layout = layout_outlines(Size::new(48.0, 48.0), &cfg).unwrap();
    assert!(approx(layout.offset.rect.width(), 14.0));
}

#[test]
fn rounded_rect_uses_quadratic_corners_and_closes() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 100.0, 60.0), 10.0);
    let els = path.elements();
    assert_eq!(els.len(), 10);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(10.0, 0.0)));
    assert_eq!(
        els[2],
        PathEl::QuadTo(Point::new(100.0, 0.0), Point::new(100.0, 10.0))
    );
    assert_eq!(els[9], PathEl::ClosePath);
    assert_eq!(
        els.iter()
            .filter(|e| matches!(e, PathEl::QuadTo(..)))
            .count(),
        4
    );
}

#[test]
fn rounded_rect_radius_clamps_to_half_the_short_side() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 40.0, 20.0), 50.0);
    assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(10.0, 0.0)));

    let square = rounded_rect_path(Rect::new(0.0, 0.0, 40.0, 20.0), -5.0);
    assert_eq!(square.elements()[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
    assert!(approx(square.bounding_box().area(), 800.0));
}

#[test]
fn samples_are_evenly_spaced_with_outward_normals() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 100.0, 50.0), 0.0);
    let (samples, perimeter) = sample_outline(&path, 4.0);
    assert!((perimeter - 300.0).abs() < 1e-6);
    assert_eq!(samples.len(), 75);

    for pair in samples.windows(2) {
        assert!((pair[1].s - pair[0].s - 4.0).abs() < 1e-9);
    }

    // Middle of the top edge points up, middle of the right edge points right.
    let top = samples
        .iter()
        .find(|s| approx(s.point.y, 0.0) && (s.point.x - 50.0).abs() < 2.5)
        .unwrap();
    assert!((top.normal - Vec2::new(0.0, -1.0)).hypot() < 1e-6);
    let right = samples
        .iter()
        .find(|s| (s.point.x - 100.0).abs() < 1e-6 && (s.point.y - 25.0).abs() < 2.5)
        .unwrap();
    assert!((right.normal - Vec2::new(1.0, 0.0)).hypot() < 1e-6);
}

#[test]
fn sampling_keeps_a_minimum_count_and_handles_empty_paths() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 4.0, 4.0), 1.0);
    let (samples, _) = sample_outline(&path, 100.0);
    assert_eq!(samples.len(), 8);

    let (samples, perimeter) = sample_outline(&BezPath::new(), 4.0);
    assert!(samples.is_empty());
    assert_eq!(perimeter, 0.0);
}
