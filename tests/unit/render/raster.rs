use super::*;
use crate::config::model::BorderConfig;
use kurbo::Vec2;

fn ink() -> Rgba8 {
    Rgba8::opaque(0x12, 0x12, 0x12)
}

#[test]
fn surface_rejects_backing_sizes_it_cannot_hold() {
    let mut s = PixmapSurface::new();
    assert!(!s.configure(Size::new(70_000.0, 10.0), (70_000, 10), 1.0));
    assert!(s.backing_size().is_none());
    assert!(!s.configure(Size::new(0.0, 10.0), (0, 10), 1.0));

    assert!(s.configure(Size::new(64.0, 32.0), (128, 64), 2.0));
    assert_eq!(s.backing_size(), Some((128, 64)));
    assert_eq!(s.device_pixel_ratio(), 2.0);
}

#[test]
fn ellipses_land_in_device_pixels() {
    let mut s = PixmapSurface::new();
    assert!(s.configure(Size::new(40.0, 40.0), (80, 80), 2.0));
    s.clear();
    s.fill_ellipse(
        &Ellipse::new((10.0, 10.0), Vec2::new(4.0, 4.0), 0.0),
        ink(),
        1.0,
    );
    let frame = s.frame();
    assert_eq!((frame.width, frame.height), (80, 80));
    // Centre (10, 10) in CSS pixels is (20, 20) on the backing store.
    assert_eq!(frame.pixel(20, 20).unwrap()[3], 255);
    assert_eq!(frame.pixel(60, 60).unwrap()[3], 0);
}

#[test]
fn clear_wipes_previous_draws() {
    let mut s = PixmapSurface::new();
    assert!(s.configure(Size::new(20.0, 20.0), (20, 20), 1.0));
    s.fill_ellipse(&Ellipse::new((10.0, 10.0), Vec2::new(5.0, 5.0), 0.0), ink(), 0.5);
    assert!(s.frame().coverage() > 0);
    s.clear();
    assert_eq!(s.frame().coverage(), 0);
}

#[test]
fn unconfigured_surface_ignores_draws() {
    let mut s = PixmapSurface::new();
    s.clear();
    s.fill_ellipse(&Ellipse::new((1.0, 1.0), Vec2::new(1.0, 1.0), 0.0), ink(), 1.0);
    assert_eq!(s.frame(), FrameRGBA::transparent(1, 1));
}

#[test]
fn border_raster_covers_the_bleed_region() {
    let scene = BorderScene::synthesize(Size::new(200.0, 120.0), &BorderConfig::default());
    let frame = rasterize_border(&scene, 1.0).unwrap();
    assert_eq!((frame.width, frame.height), (248, 168));
    assert!(frame.coverage() > 500);
    // Centre of the card stays clear.
    assert_eq!(frame.pixel(124, 84).unwrap()[3], 0);

    let hi = rasterize_border(&scene, 2.0).unwrap();
    assert_eq!((hi.width, hi.height), (496, 336));
}

#[test]
fn border_raster_is_deterministic() {
    let cfg = BorderConfig::default();
    let a = rasterize_border(&BorderScene::synthesize(Size::new(180.0, 90.0), &cfg), 1.0).unwrap();
    let b = rasterize_border(&BorderScene::synthesize(Size::new(180.0, 90.0), &cfg), 1.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_scene_rasterizes_transparent() {
    let scene = BorderScene::synthesize(Size::new(40.0, 40.0), &BorderConfig::default());
    let frame = rasterize_border(&scene, 1.0).unwrap();
    assert_eq!(frame.coverage(), 0);
}

#[test]
fn invalid_scale_is_a_render_error() {
    let scene = BorderScene::synthesize(Size::new(100.0, 100.0), &BorderConfig::default());
    let err = rasterize_border(&scene, 0.0).unwrap_err();
    assert!(matches!(err, InklineError::Render(_)));
    assert!(rasterize_border(&scene, 1000.0).is_err());
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    };
    frame.unpremultiply();
    assert_eq!(frame.data, vec![128, 64, 0, 128, 0, 0, 0, 0]);
    assert!(!frame.premultiplied);
}
