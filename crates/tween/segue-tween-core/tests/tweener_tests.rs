use std::cell::RefCell;
use std::rc::Rc;

use segue_tween_core::{
    Behavior, Config, Lerper, PropertyKind, TargetId, TweenError, Tweener,
};
use segue_test_fixtures::{approx, SharedSprite, SpriteWorld};

const T1: TargetId = TargetId(1);
const T2: TargetId = TargetId(2);

fn setup_two() -> (Tweener, SharedSprite, SharedSprite) {
    let mut world = SpriteWorld::new();
    let a = world.spawn(T1);
    let b = world.spawn(T2);
    (Tweener::new(Box::new(world)), a, b)
}

/// it should let a completion callback create a tween through a clone,
/// going live only at the next tick boundary
#[test]
fn reentrant_create_from_completion() {
    let (tweener, sprite, _) = setup_two();
    let handle = tweener.tween(T1, &[("x", 10.0)], 1.0, 0.0).unwrap();
    {
        let inner = tweener.clone();
        handle.on_complete(move || {
            inner.tween(T1, &[("y", 5.0)], 1.0, 0.0).unwrap();
        });
    }
    tweener.tick(0.0);
    tweener.tick(1.0);
    // The follow-up is live but has not advanced yet.
    assert_eq!(tweener.len(), 1);
    assert_eq!(sprite.borrow().y, 0.0);
    tweener.tick(0.5);
    assert!(approx(sprite.borrow().y, 2.5, 1e-4));
}

/// it should let a callback cancel a sibling without disturbing the tick
#[test]
fn reentrant_cancel_of_sibling() {
    let (tweener, _a, _b) = setup_two();
    let first = tweener.tween(T1, &[("x", 10.0)], 4.0, 0.0).unwrap();
    let _second = tweener.tween(T2, &[("x", 10.0)], 4.0, 0.0).unwrap();
    {
        let victim = tweener.tween(T2, &[("y", 10.0)], 4.0, 0.0).unwrap();
        first.on_update(move || victim.cancel());
    }
    tweener.tick(0.0);
    assert_eq!(tweener.len(), 3);
    tweener.tick(1.0);
    assert_eq!(tweener.len(), 2);
    assert_eq!(tweener.target_len(T2), 1);
}

/// it should cancel everything at once without completions
#[test]
fn bulk_cancel() {
    let (tweener, a, b) = setup_two();
    let fired = Rc::new(RefCell::new(0));
    for target in [T1, T2] {
        let handle = tweener.tween(target, &[("x", 10.0)], 2.0, 0.0).unwrap();
        let f = fired.clone();
        handle.on_complete(move || *f.borrow_mut() += 1);
    }
    tweener.tick(0.0);
    tweener.cancel();
    tweener.tick(1.0);
    assert!(tweener.is_empty());
    assert_eq!(*fired.borrow(), 0);
    assert!(approx(a.borrow().x, 5.0, 1e-4));
    assert!(approx(b.borrow().x, 5.0, 1e-4));
}

/// it should finish everything at once with completions on bulk
/// cancel_and_complete
#[test]
fn bulk_cancel_and_complete() {
    let (tweener, a, b) = setup_two();
    let fired = Rc::new(RefCell::new(0));
    for target in [T1, T2] {
        let handle = tweener.tween(target, &[("x", 10.0)], 2.0, 0.0).unwrap();
        let f = fired.clone();
        handle.on_complete(move || *f.borrow_mut() += 1);
    }
    tweener.tick(0.0);
    tweener.cancel_and_complete();
    tweener.tick(0.1);
    assert!(tweener.is_empty());
    assert_eq!(*fired.borrow(), 2);
    assert_eq!(a.borrow().x, 10.0);
    assert_eq!(b.borrow().x, 10.0);
}

/// it should pause and resume the whole live set
#[test]
fn bulk_pause_resume() {
    let (tweener, a, b) = setup_two();
    tweener.tween(T1, &[("x", 10.0)], 1.0, 0.0).unwrap();
    tweener.tween(T2, &[("x", 10.0)], 1.0, 0.0).unwrap();
    tweener.tick(0.0);
    tweener.pause();
    tweener.tick(1.0);
    assert_eq!(a.borrow().x, 0.0);
    assert_eq!(b.borrow().x, 0.0);
    tweener.pause_toggle();
    tweener.tick(0.5);
    assert!(approx(a.borrow().x, 5.0, 1e-4));
    assert!(approx(b.borrow().x, 5.0, 1e-4));
}

/// it should scope bulk operations to the named targets only
#[test]
fn target_scoped_operations() {
    let (tweener, a, b) = setup_two();
    tweener.tween(T1, &[("x", 10.0)], 2.0, 0.0).unwrap();
    tweener.tween(T2, &[("x", 10.0)], 2.0, 0.0).unwrap();
    tweener.tick(0.0);
    assert_eq!(tweener.target_len(T1), 1);
    assert_eq!(tweener.target_len(T2), 1);

    tweener.target_pause(&[T2]);
    tweener.tick(1.0);
    assert!(approx(a.borrow().x, 5.0, 1e-4));
    assert_eq!(b.borrow().x, 0.0);
    tweener.target_resume(&[T2]);

    tweener.target_cancel(&[T1]);
    tweener.tick(0.5);
    assert_eq!(tweener.target_len(T1), 0);
    assert_eq!(tweener.target_len(T2), 1);

    tweener.target_cancel_and_complete(&[T2]);
    tweener.tick(0.1);
    assert_eq!(b.borrow().x, 10.0);
    assert!(tweener.is_empty());
}

/// it should treat a target with no live tweens as a silent no-op
#[test]
fn absent_target_is_noop() {
    let (tweener, _a, _b) = setup_two();
    tweener.tween(T1, &[("x", 10.0)], 1.0, 0.0).unwrap();
    tweener.tick(0.0);
    let ghost = TargetId(99);
    tweener.target_cancel(&[ghost]);
    tweener.target_pause(&[ghost]);
    tweener.target_pause_toggle(&[ghost]);
    tweener.tick(0.0);
    assert_eq!(tweener.len(), 1);
    assert_eq!(tweener.target_len(ghost), 0);
}

/// it should surface resolver failures synchronously at creation
#[test]
fn creation_errors() {
    let (tweener, _a, _b) = setup_two();

    let err = tweener.tween(T1, &[("warp", 1.0)], 1.0, 0.0).unwrap_err();
    assert!(matches!(err, TweenError::PropertyNotFound { .. }), "{err}");

    let err = tweener
        .tween(TargetId(42), &[("x", 1.0)], 1.0, 0.0)
        .unwrap_err();
    assert!(matches!(err, TweenError::PropertyNotFound { .. }), "{err}");

    let err = tweener.tween(T1, &[("visible", 1.0)], 1.0, 0.0).unwrap_err();
    assert!(matches!(err, TweenError::NotNumeric { .. }), "{err}");

    let err = tweener.tween(T1, &[("area", 1.0)], 1.0, 0.0).unwrap_err();
    assert!(matches!(err, TweenError::MissingCapability { .. }), "{err}");

    // Nothing was staged by the failed attempts.
    tweener.tick(0.0);
    assert!(tweener.is_empty());
}

/// it should refuse a custom kind until a lerper is registered for it
#[test]
fn custom_kind_needs_registration() {
    let (tweener, sprite, _) = setup_two();

    let err = tweener.tween(T1, &[("glow", 1.0)], 1.0, 0.0).unwrap_err();
    assert_eq!(
        err,
        TweenError::NoLerper {
            kind: PropertyKind::Custom("glow"),
        }
    );

    struct Snap;
    impl Lerper for Snap {
        fn initialize(&mut self, _from: f32, _to: f32, _behavior: Behavior) {}
        fn interpolate(&self, t: f32, _behavior: Behavior) -> f32 {
            if t >= 1.0 {
                1.0
            } else {
                0.0
            }
        }
    }
    tweener.register_lerper(PropertyKind::Custom("glow"), || Box::new(Snap));

    tweener.tween(T1, &[("glow", 1.0)], 1.0, 0.0).unwrap();
    tweener.tick(0.0);
    tweener.tick(0.5);
    assert_eq!(sprite.borrow().glow, 0.0);
    tweener.tick(0.5);
    assert_eq!(sprite.borrow().glow, 1.0);
}

/// it should honor configured capacities and round-trip through serde
#[test]
fn config_is_serializable() {
    let config = Config {
        initial_tweens: 8,
        initial_targets: 4,
        queue_capacity: 2,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.initial_tweens, 8);
    assert_eq!(back.initial_targets, 4);
    assert_eq!(back.queue_capacity, 2);

    let mut world = SpriteWorld::new();
    let sprite = world.spawn(T1);
    let tweener = Tweener::with_config(back, Box::new(world));
    tweener.tween(T1, &[("x", 10.0)], 1.0, 0.0).unwrap();
    tweener.tick(0.0);
    tweener.tick(1.0);
    assert_eq!(sprite.borrow().x, 10.0);
}
