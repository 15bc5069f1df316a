use super::*;

#[test]
fn predicate_is_exactly_fine_and_hover_and_not_reduced() {
    for fine_pointer in [false, true] {
        for hover in [false, true] {
            for reduced_motion in [false, true] {
                let env = EnvironmentSignals {
                    fine_pointer,
                    hover,
                    reduced_motion,
                };
                assert_eq!(
                    env.should_enable(),
                    fine_pointer && hover && !reduced_motion
                );
            }
        }
    }
}

#[test]
fn set_reports_changes_only() {
    let mut env = EnvironmentSignals::desktop();
    assert!(!env.set(EnvSignal::Hover, true));
    assert!(env.set(EnvSignal::ReducedMotion, true));
    assert!(env.get(EnvSignal::ReducedMotion));
    assert!(!env.should_enable());
    assert!(env.set(EnvSignal::ReducedMotion, false));
    assert!(env.should_enable());
}

#[test]
fn pointer_kinds_classify_like_the_browser_strings() {
    assert!(PointerKind::from_pointer_type("mouse").is_fine());
    assert!(PointerKind::from_pointer_type("pen").is_fine());
    assert!(PointerKind::from_pointer_type("").is_fine());
    assert!(!PointerKind::from_pointer_type("touch").is_fine());
    assert!(!PointerKind::from_pointer_type("trackball").is_fine());
}
