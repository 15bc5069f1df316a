use super::*;

#[test]
fn quantizes_to_half_units() {
    assert_eq!(quantize(100.24, 0.5), 100.0);
    assert_eq!(quantize(100.26, 0.5), 100.5);
    assert_eq!(quantize(100.75, 0.5), 101.0);
    assert_eq!(quantize(-3.0, 0.5), 0.0);
    assert_eq!(quantize(f64::NAN, 0.5), 0.0);
    assert_eq!(quantize(7.3, 0.0), 7.3);
}

#[test]
fn update_reports_only_quantized_changes() {
    let mut t = SizeTracker::new(0.5);
    assert_eq!(t.update(Size::new(200.1, 100.0)), Some(Size::new(200.0, 100.0)));
    // Sub-quantum jitter is absorbed.
    assert_eq!(t.update(Size::new(200.2, 99.9)), None);
    assert_eq!(t.update(Size::new(200.3, 100.0)), Some(Size::new(200.5, 100.0)));
    assert_eq!(t.current(), Some(Size::new(200.5, 100.0)));
}

#[test]
fn pending_frame_is_latest_wins() {
    let mut t = SizeTracker::new(0.5);
    assert_eq!(t.replace_pending(FrameToken(1)), None);
    assert_eq!(t.replace_pending(FrameToken(2)), Some(FrameToken(1)));

    assert!(!t.fire(FrameToken(1)));
    assert!(t.fire(FrameToken(2)));
    assert!(!t.fire(FrameToken(2)));
    assert_eq!(t.pending(), None);
}

#[test]
fn reset_forgets_size_and_frame() {
    let mut t = SizeTracker::new(0.5);
    t.update(Size::new(80.0, 80.0));
    t.replace_pending(FrameToken(9));
    t.reset();
    assert_eq!(t.current(), None);
    assert_eq!(t.take_pending(), None);
    assert!(t.update(Size::new(80.0, 80.0)).is_some());
}
