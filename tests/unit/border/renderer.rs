use super::*;

#[derive(Default)]
struct FakeElement {
    size: Size,
    next_token: u64,
    requested: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
    observe_calls: Vec<bool>,
}

impl FakeElement {
    fn sized(w: f64, h: f64) -> Self {
        Self {
            size: Size::new(w, h),
            ..Self::default()
        }
    }
}

impl BorderHost for FakeElement {
    fn measure(&self) -> Size {
        self.size
    }

    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        let t = FrameToken(self.next_token);
        self.requested.push(t);
        t
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.cancelled.push(token);
    }

    fn observe(&mut self, observing: bool) {
        self.observe_calls.push(observing);
    }
}

fn mounted(w: f64, h: f64) -> BorderRenderer<FakeElement> {
    let mut r = BorderRenderer::new(BorderConfig::default(), FakeElement::sized(w, h));
    r.mount();
    r
}

#[test]
fn mount_measures_immediately_and_observes() {
    let r = mounted(300.0, 200.0);
    assert!(r.is_observing());
    assert_eq!(r.host().observe_calls, vec![true]);
    assert_eq!(r.size(), Some(Size::new(300.0, 200.0)));
    assert!(!r.scene().unwrap().is_empty());
    assert_eq!(r.recompute_count(), 1);
    assert!(r.host().requested.is_empty());
}

#[test]
fn zero_size_is_not_laid_out_but_small_size_is() {
    let r = mounted(0.0, 120.0);
    assert!(!r.is_laid_out());
    assert!(r.render_svg().is_none());

    let r = mounted(30.0, 30.0);
    assert!(r.is_laid_out());
    assert!(r.scene().unwrap().is_empty());
}

#[test]
fn notifications_coalesce_into_one_frame() {
    let mut r = mounted(300.0, 200.0);
    r.host_mut().size = Size::new(310.0, 200.0);
    r.on_resize_notification();
    r.on_resize_notification();
    r.on_resize_notification();

    assert_eq!(r.host().requested.len(), 3);
    assert_eq!(r.host().cancelled, vec![FrameToken(1), FrameToken(2)]);
    assert_eq!(r.pending_frame(), Some(FrameToken(3)));

    // Superseded frames do nothing even if delivered.
    assert!(!r.on_frame(FrameToken(1)));
    assert!(r.on_frame(FrameToken(3)));
    assert_eq!(r.recompute_count(), 2);
    assert_eq!(r.size(), Some(Size::new(310.0, 200.0)));
    assert_eq!(r.pending_frame(), None);
}

#[test]
fn sub_quantum_resize_keeps_the_scene() {
    let mut r = mounted(300.0, 200.0);
    let before = r.scene().unwrap().fingerprint();
    r.host_mut().size = Size::new(300.2, 199.9);
    r.on_resize_notification();
    assert!(!r.on_frame(FrameToken(1)));
    assert_eq!(r.recompute_count(), 1);
    assert_eq!(r.scene().unwrap().fingerprint(), before);
}

#[test]
fn resize_replaces_the_scene_wholesale() {
    let mut r = mounted(300.0, 200.0);
    r.host_mut().size = Size::new(40.0, 200.0);
    r.on_resize_notification();
    assert!(r.on_frame(FrameToken(1)));
    assert!(r.scene().unwrap().is_empty());

    r.host_mut().size = Size::new(300.0, 200.0);
    r.on_resize_notification();
    assert!(r.on_frame(FrameToken(2)));
    let fresh = mounted(300.0, 200.0);
    assert_eq!(r.scene(), fresh.scene());
}

#[test]
fn teardown_disconnects_and_discards_pending_work() {
    let mut r = mounted(300.0, 200.0);
    r.host_mut().size = Size::new(500.0, 200.0);
    r.on_resize_notification();
    r.teardown();

    assert_eq!(r.host().observe_calls, vec![true, false]);
    assert_eq!(r.host().cancelled, vec![FrameToken(1)]);
    assert!(r.scene().is_none());
    assert!(!r.on_frame(FrameToken(1)));
    assert_eq!(r.recompute_count(), 1);

    // Late notifications after teardown are ignored.
    r.on_resize_notification();
    assert_eq!(r.host().requested.len(), 1);

    r.teardown();
    assert_eq!(r.host().observe_calls, vec![true, false]);
}
