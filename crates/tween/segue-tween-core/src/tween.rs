//! Tween state machine: one animation instance advancing its bindings.
//!
//! A `Tween` owns timing state, behavior flags, callbacks, and an ordered
//! set of property bindings. The owning `Tweener` drives it through
//! `begin_step`/`advance_step` each tick; callers configure and control it
//! through the cloneable [`TweenHandle`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use crate::access::{Access, PropertyAccessor};
use crate::behavior::{Behavior, RotationUnit};
use crate::error::TweenError;
use crate::ids::{TargetId, TweenId};
use crate::lerp::Lerper;
use crate::tweener::TweenerCore;

pub(crate) type Callback = Box<dyn FnMut()>;
pub(crate) type Easer = Box<dyn Fn(f32) -> f32>;

/// One property paired with its captured endpoints and lerper.
pub(crate) struct Binding {
    pub(crate) accessor: Box<dyn PropertyAccessor>,
    pub(crate) lerper: Box<dyn Lerper>,
    pub(crate) start: f32,
    pub(crate) end: f32,
}

/// Which of a tween's callback slots to fire.
#[derive(Copy, Clone, Debug)]
pub(crate) enum CallbackSlot {
    Begin,
    Update,
    Complete,
}

/// One animation instance. Owned by the `Tweener`; configured through
/// [`TweenHandle`].
pub struct Tween {
    pub(crate) id: TweenId,
    pub(crate) target: TargetId,
    duration: f32,
    delay: f32,
    time: f32,
    repeat_count: i32,
    behavior: Behavior,
    paused: bool,
    first_update: bool,
    ease: Option<Easer>,
    on_begin: Option<Callback>,
    on_update: Option<Callback>,
    on_complete: Option<Callback>,
    bindings: Vec<Binding>,
    /// Property name -> index into `bindings` (which stays in insertion
    /// order through every mutation).
    index: HashMap<String, usize>,
}

impl Tween {
    pub(crate) fn new(id: TweenId, target: TargetId, duration: f32, delay: f32) -> Self {
        Self {
            id,
            target,
            duration,
            delay,
            time: 0.0,
            repeat_count: 0,
            behavior: Behavior::empty(),
            paused: false,
            first_update: true,
            ease: None,
            on_begin: None,
            on_update: None,
            on_complete: None,
            bindings: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn add_binding(
        &mut self,
        name: &str,
        accessor: Box<dyn PropertyAccessor>,
        lerper: Box<dyn Lerper>,
        start: f32,
        end: f32,
    ) {
        self.index.insert(name.to_string(), self.bindings.len());
        self.bindings.push(Binding {
            accessor,
            lerper,
            start,
            end,
        });
    }

    /// Time left before the tween ends or repeats.
    pub fn time_remaining(&self) -> f32 {
        self.duration - self.time
    }

    /// Raw progress clamped to [0,1]: 0 = not started, 1 = completed.
    pub fn completion(&self) -> f32 {
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    pub fn looping(&self) -> bool {
        self.repeat_count != 0
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn pause_toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Pre-advance phase: deferred lerper initialization, pause/delay
    /// gating, and begin detection. Returns (proceed, fire_begin).
    pub(crate) fn begin_step(&mut self, elapsed: f32) -> (bool, bool) {
        if self.first_update {
            self.first_update = false;
            // Deferred so From/configuration can land after construction
            // but before the first evaluation.
            for binding in &mut self.bindings {
                binding
                    .lerper
                    .initialize(binding.start, binding.end, self.behavior);
            }
        }

        if self.paused {
            return (false, false);
        }

        if self.delay > 0.0 {
            // Delay consumes the whole tick; no interpolation happens.
            self.delay -= elapsed;
            return (false, false);
        }

        (true, self.time == 0.0)
    }

    /// Advance the cursor, run the completion/repeat/reflect transitions,
    /// and interpolate every binding. Returns (fire_complete, finished).
    pub(crate) fn advance_step(&mut self, elapsed: f32) -> (bool, bool) {
        self.time += elapsed;
        let mut t = self.time / self.duration;
        let mut fire_complete = false;
        let mut finished = false;

        if self.time >= self.duration {
            if self.repeat_count > 0 {
                self.repeat_count -= 1;
                self.time = 0.0;
                t = 0.0;
            } else if self.repeat_count < 0 {
                // Infinite repeat: the completion callback fires each cycle.
                fire_complete = true;
                self.time = 0.0;
                t = 0.0;
            } else {
                self.time = self.duration;
                t = 1.0;
                finished = true;
                fire_complete = true;
            }

            // Cursor back at zero means we just looped; reflect flips
            // direction for the next cycle.
            if self.time == 0.0 && self.behavior.contains(Behavior::REFLECT) {
                self.reverse();
            }
        }

        if let Some(ease) = &self.ease {
            // Not clamped: overshoot curves are allowed.
            t = ease(t);
        }

        for binding in &mut self.bindings {
            let value = binding.lerper.interpolate(t, self.behavior);
            binding.accessor.set(value);
        }

        (fire_complete, finished)
    }

    /// Swap every binding's endpoints and rebuild its working range.
    pub(crate) fn reverse(&mut self) {
        for binding in &mut self.bindings {
            std::mem::swap(&mut binding.start, &mut binding.end);
            binding
                .lerper
                .initialize(binding.start, binding.end, self.behavior);
        }
    }

    /// Force the cursor to the end and suppress further update callbacks;
    /// the next advance takes the normal finish path.
    pub(crate) fn force_completion(&mut self) {
        self.time = self.duration;
        self.on_update = None;
    }

    pub(crate) fn take_callback(&mut self, slot: CallbackSlot) -> Option<Callback> {
        match slot {
            CallbackSlot::Begin => self.on_begin.take(),
            CallbackSlot::Update => self.on_update.take(),
            CallbackSlot::Complete => self.on_complete.take(),
        }
    }

    /// Put a taken callback back unless the slot was refilled while it ran
    /// (a replacement installed by the callback wins).
    pub(crate) fn restore_callback(&mut self, slot: CallbackSlot, callback: Callback) {
        let slot = match slot {
            CallbackSlot::Begin => &mut self.on_begin,
            CallbackSlot::Update => &mut self.on_update,
            CallbackSlot::Complete => &mut self.on_complete,
        };
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

/// Caller-facing handle to one tween. Cloning is cheap; every clone refers
/// to the same underlying tween. Configuration methods are fluent and may
/// be chained before the tween's first tick (or at any point after).
#[derive(Clone)]
pub struct TweenHandle {
    pub(crate) tween: Rc<RefCell<Tween>>,
    pub(crate) core: Weak<TweenerCore>,
}

impl TweenHandle {
    /// Set the easing function applied to raw progress each tick.
    /// The result is not clamped, so overshoot curves work as expected.
    pub fn ease(&self, ease: impl Fn(f32) -> f32 + 'static) -> &Self {
        self.tween.borrow_mut().ease = Some(Box::new(ease));
        self
    }

    /// Called once when the tween starts ticking, after any delay. Fires
    /// again at the start of every repeat cycle.
    pub fn on_begin(&self, callback: impl FnMut() + 'static) -> &Self {
        self.tween.borrow_mut().on_begin = Some(Box::new(callback));
        self
    }

    /// Called every tick after the bound values have been written.
    pub fn on_update(&self, callback: impl FnMut() + 'static) -> &Self {
        self.tween.borrow_mut().on_update = Some(Box::new(callback));
        self
    }

    /// Called when the tween finishes. With infinite repeat it fires at the
    /// end of every cycle instead.
    pub fn on_complete(&self, callback: impl FnMut() + 'static) -> &Self {
        self.tween.borrow_mut().on_complete = Some(Box::new(callback));
        self
    }

    /// Repeat `times` more cycles after the current one; negative repeats
    /// forever.
    pub fn repeat(&self, times: i32) -> &Self {
        self.tween.borrow_mut().repeat_count = times;
        self
    }

    /// Reverse direction every repeat cycle. Needs repeating to be enabled
    /// to have any effect.
    pub fn reflect(&self) -> &Self {
        self.tween.borrow_mut().behavior |= Behavior::REFLECT;
        self
    }

    /// Interpolate bound values as angles along the shortest arc.
    pub fn rotation(&self, unit: RotationUnit) -> &Self {
        let flag = match unit {
            RotationUnit::Degrees => Behavior::ROTATION_DEGREES,
            RotationUnit::Radians => Behavior::ROTATION_RADIANS,
        };
        self.tween.borrow_mut().behavior |= flag;
        self
    }

    /// Round interpolated values to the nearest integer.
    pub fn round(&self) -> &Self {
        self.tween.borrow_mut().behavior |= Behavior::ROUND;
        self
    }

    /// Interpolate bound values as packed 24-bit RGB colors.
    pub fn hex_color(&self) -> &Self {
        self.tween.borrow_mut().behavior |= Behavior::HEX_COLOR;
        self
    }

    /// Swap the start and end values of every binding.
    pub fn reverse(&self) -> &Self {
        self.tween.borrow_mut().reverse();
        self
    }

    /// Apply starting values before tweening. A name that is already bound
    /// has its recorded start overwritten (the goal stays); an unbound name
    /// is written straight through a freshly resolved accessor without
    /// creating a binding.
    pub fn from(&self, values: &[(&str, f32)]) -> Result<&Self, TweenError> {
        let core = self.core.upgrade().ok_or(TweenError::ManagerGone)?;
        let mut tween = self.tween.borrow_mut();
        let target = tween.target;
        let behavior = tween.behavior;
        for (name, value) in values {
            let bound = tween.index.get(*name).copied();
            if let Some(idx) = bound {
                let binding = &mut tween.bindings[idx];
                binding.start = *value;
                binding.lerper.initialize(*value, binding.end, behavior);
            } else {
                let mut accessor =
                    core.resolver
                        .borrow_mut()
                        .resolve(target, name, Access::Write)?;
                accessor.set(*value);
            }
        }
        Ok(self)
    }

    /// Stop ticking; the delay stops counting down too.
    pub fn pause(&self) {
        self.tween.borrow_mut().pause();
    }

    pub fn resume(&self) {
        self.tween.borrow_mut().resume();
    }

    pub fn pause_toggle(&self) {
        self.tween.borrow_mut().pause_toggle();
    }

    /// Remove the tween from its manager without firing the completion
    /// callback. The removal lands at the next tick boundary.
    pub fn cancel(&self) {
        if let Some(core) = self.core.upgrade() {
            core.queue.borrow_mut().stage_remove(self.tween.clone());
        }
    }

    /// Force the tween to its final value and remove it. The completion
    /// callback still fires through the normal finish path; further update
    /// callbacks are suppressed.
    pub fn cancel_and_complete(&self) {
        self.tween.borrow_mut().force_completion();
        self.cancel();
    }

    pub fn paused(&self) -> bool {
        self.tween.borrow().paused()
    }

    pub fn time_remaining(&self) -> f32 {
        self.tween.borrow().time_remaining()
    }

    pub fn completion(&self) -> f32 {
        self.tween.borrow().completion()
    }

    pub fn looping(&self) -> bool {
        self.tween.borrow().looping()
    }

    pub fn id(&self) -> TweenId {
        self.tween.borrow().id
    }

    pub fn target(&self) -> TargetId {
        self.tween.borrow().target
    }
}

impl std::fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tween = self.tween.borrow();
        f.debug_struct("TweenHandle")
            .field("id", &tween.id)
            .field("target", &tween.target)
            .finish()
    }
}
