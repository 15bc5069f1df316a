use super::*;

fn particle() -> InkParticle {
    InkParticle {
        seq: 0,
        position: Point::new(10.0, 20.0),
        velocity: Vec2::new(0.5, -0.25),
        radius: 2.0,
        alpha: 0.1,
        decay: 0.01,
        growth: 0.02,
        stretch_x: 1.5,
        stretch_y: 0.5,
        rotation: 0.3,
    }
}

#[test]
fn advance_scales_every_rate_by_ratio() {
    let mut p = particle();
    p.advance(2.0);
    assert!((p.position.x - 11.0).abs() < 1e-12);
    assert!((p.position.y - 19.5).abs() < 1e-12);
    assert!((p.radius - 2.04).abs() < 1e-12);
    assert!((p.alpha - 0.08).abs() < 1e-12);
}

#[test]
fn retired_exactly_at_zero_alpha() {
    let mut p = particle();
    p.alpha = 0.0;
    assert!(p.is_retired());
    p.alpha = 1e-9;
    assert!(!p.is_retired());
    p.alpha = -0.01;
    assert!(p.is_retired());
}

#[test]
fn ellipse_uses_independent_stretch_and_rotation() {
    use kurbo::Shape;

    let e = particle().ellipse();
    assert_eq!(e.center(), Point::new(10.0, 20.0));
    assert!((e.area() - std::f64::consts::PI * 3.0).abs() < 1e-9);

    let mut flat = particle();
    flat.rotation = 0.0;
    let bbox = flat.ellipse().bounding_box();
    assert!((bbox.width() - 6.0).abs() < 1e-9);
    assert!((bbox.height() - 2.0).abs() < 1e-9);

    let mut upright = particle();
    upright.rotation = std::f64::consts::FRAC_PI_2;
    let bbox = upright.ellipse().bounding_box();
    assert!((bbox.width() - 2.0).abs() < 1e-9);
    assert!((bbox.height() - 6.0).abs() < 1e-9);
}
