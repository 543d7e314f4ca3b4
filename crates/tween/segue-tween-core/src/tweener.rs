//! Tween manager: creation, the tick loop, and the two-phase mutation
//! queue that makes callback-driven add/cancel safe mid-tick.
//!
//! The `Tweener` is a cheap-to-clone handle over shared state, so callbacks
//! may capture a clone and create or cancel tweens reentrantly. Structural
//! changes stage into a queue and land at the next tick boundary; the tick
//! itself iterates a snapshot, so the live set never shifts underfoot.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::access::{Access, PropertyKind, PropertyResolver};
use crate::config::Config;
use crate::error::TweenResult;
use crate::ids::{IdAllocator, TargetId};
use crate::lerp::{Lerper, LerperRegistry};
use crate::tween::{Callback, CallbackSlot, Tween, TweenHandle};

type TweenCell = Rc<RefCell<Tween>>;

/// Live tweens plus a per-target index for filtered bulk operations.
struct LiveSet {
    all: Vec<TweenCell>,
    by_target: HashMap<TargetId, Vec<TweenCell>>,
}

impl LiveSet {
    fn with_capacity(tweens: usize, targets: usize) -> Self {
        Self {
            all: Vec::with_capacity(tweens),
            by_target: HashMap::with_capacity(targets),
        }
    }

    fn insert(&mut self, tween: TweenCell) {
        let target = tween.borrow().target;
        self.by_target
            .entry(target)
            .or_default()
            .push(tween.clone());
        self.all.push(tween);
    }

    fn remove(&mut self, tween: &TweenCell) {
        self.all.retain(|t| !Rc::ptr_eq(t, tween));
        let target = tween.borrow().target;
        if let Some(bucket) = self.by_target.get_mut(&target) {
            bucket.retain(|t| !Rc::ptr_eq(t, tween));
            if bucket.is_empty() {
                self.by_target.remove(&target);
            }
        }
    }
}

/// Structural changes staged during a tick. Adds apply before removes, so a
/// tween added and cancelled in the same tick never goes live.
pub(crate) struct MutationQueue {
    pending_add: Vec<TweenCell>,
    pending_remove: Vec<TweenCell>,
}

impl MutationQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            pending_add: Vec::with_capacity(capacity),
            pending_remove: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn stage_add(&mut self, tween: TweenCell) {
        self.pending_add.push(tween);
    }

    pub(crate) fn stage_remove(&mut self, tween: TweenCell) {
        self.pending_remove.push(tween);
    }
}

/// Shared state behind every `Tweener` clone and `TweenHandle`. Each
/// concern sits behind its own cell so reentrant callbacks never overlap
/// a borrow held by the tick loop.
pub(crate) struct TweenerCore {
    live: RefCell<LiveSet>,
    pub(crate) queue: RefCell<MutationQueue>,
    lerpers: RefCell<LerperRegistry>,
    pub(crate) resolver: RefCell<Box<dyn PropertyResolver>>,
    ids: RefCell<IdAllocator>,
}

/// The tween manager. Clone it freely; clones share the same live set.
#[derive(Clone)]
pub struct Tweener {
    core: Rc<TweenerCore>,
}

impl Tweener {
    pub fn new(resolver: Box<dyn PropertyResolver>) -> Self {
        Self::with_config(Config::default(), resolver)
    }

    pub fn with_config(config: Config, resolver: Box<dyn PropertyResolver>) -> Self {
        Self {
            core: Rc::new(TweenerCore {
                live: RefCell::new(LiveSet::with_capacity(
                    config.initial_tweens,
                    config.initial_targets,
                )),
                queue: RefCell::new(MutationQueue::with_capacity(config.queue_capacity)),
                lerpers: RefCell::new(LerperRegistry::with_numeric_defaults()),
                resolver: RefCell::new(resolver),
                ids: RefCell::new(IdAllocator::default()),
            }),
        }
    }

    /// Register a lerper constructor for a property kind, replacing any
    /// previous registration.
    pub fn register_lerper<F>(&self, kind: PropertyKind, factory: F)
    where
        F: Fn() -> Box<dyn Lerper> + 'static,
    {
        self.core.lerpers.borrow_mut().register(kind, factory);
    }

    /// Create a tween driving the named properties of `target` to the given
    /// goal values. The tween goes live at the next tick boundary; configure
    /// it through the returned handle before then.
    pub fn tween(
        &self,
        target: TargetId,
        goals: &[(&str, f32)],
        duration: f32,
        delay: f32,
    ) -> TweenResult<TweenHandle> {
        let id = self.core.ids.borrow_mut().alloc_tween();
        let mut tween = Tween::new(id, target, duration, delay);

        for (name, goal) in goals {
            let accessor =
                self.core
                    .resolver
                    .borrow_mut()
                    .resolve(target, name, Access::ReadWrite)?;
            let lerper = self.core.lerpers.borrow().create(accessor.kind())?;
            let start = accessor.get();
            tween.add_binding(name, accessor, lerper, start, *goal);
        }

        log::debug!(
            "staged tween {:?} on {:?} ({} bindings, {duration}s)",
            id,
            target,
            goals.len()
        );

        let cell = Rc::new(RefCell::new(tween));
        self.core.queue.borrow_mut().stage_add(cell.clone());
        Ok(TweenHandle {
            tween: cell,
            core: Rc::downgrade(&self.core),
        })
    }

    /// Create a tween with no bindings, useful purely for its delay,
    /// duration, and callbacks.
    pub fn timer(&self, duration: f32, delay: f32) -> TweenHandle {
        let id = self.core.ids.borrow_mut().alloc_tween();
        let cell = Rc::new(RefCell::new(Tween::new(
            id,
            TargetId::DETACHED,
            duration,
            delay,
        )));
        self.core.queue.borrow_mut().stage_add(cell.clone());
        TweenHandle {
            tween: cell,
            core: Rc::downgrade(&self.core),
        }
    }

    /// Advance every live tween by `elapsed` seconds, then apply staged
    /// adds and removes.
    pub fn tick(&self, elapsed: f32) {
        let snapshot: Vec<TweenCell> = self.core.live.borrow().all.clone();
        for cell in &snapshot {
            let finished = self.advance_one(cell, elapsed);
            if finished {
                self.core.queue.borrow_mut().stage_remove(cell.clone());
            }
        }
        self.apply_queued();
    }

    /// Drive one tween through a tick. Callbacks run with the tween borrow
    /// released, so they may touch the tween or the manager freely.
    fn advance_one(&self, cell: &TweenCell, elapsed: f32) -> bool {
        let (proceed, fire_begin) = cell.borrow_mut().begin_step(elapsed);
        if !proceed {
            return false;
        }
        if fire_begin {
            Self::fire(cell, CallbackSlot::Begin);
        }

        let (fire_complete, finished) = cell.borrow_mut().advance_step(elapsed);
        Self::fire(cell, CallbackSlot::Update);
        if fire_complete {
            Self::fire(cell, CallbackSlot::Complete);
        }
        finished
    }

    /// Take-call-restore: the callback is moved out before running so it
    /// can re-borrow the tween; a replacement it installs is kept.
    fn fire(cell: &TweenCell, slot: CallbackSlot) {
        let taken: Option<Callback> = cell.borrow_mut().take_callback(slot);
        if let Some(mut callback) = taken {
            callback();
            cell.borrow_mut().restore_callback(slot, callback);
        }
    }

    /// Apply staged mutations, adds first so a same-tick add-then-cancel
    /// resolves to the tween never going live.
    fn apply_queued(&self) {
        loop {
            let (adds, removes) = {
                let mut queue = self.core.queue.borrow_mut();
                if queue.pending_add.is_empty() && queue.pending_remove.is_empty() {
                    break;
                }
                (
                    std::mem::take(&mut queue.pending_add),
                    std::mem::take(&mut queue.pending_remove),
                )
            };

            let mut live = self.core.live.borrow_mut();
            for tween in adds {
                live.insert(tween);
            }
            for tween in &removes {
                live.remove(tween);
            }
        }
        log::debug!("live tweens: {}", self.core.live.borrow().all.len());
    }

    fn snapshot(&self) -> Vec<TweenCell> {
        self.core.live.borrow().all.clone()
    }

    fn tweens_for(&self, targets: &[TargetId]) -> Vec<TweenCell> {
        let live = self.core.live.borrow();
        let mut out = Vec::new();
        for target in targets {
            if let Some(bucket) = live.by_target.get(target) {
                out.extend(bucket.iter().cloned());
            }
        }
        out
    }

    /// Cancel every live tween without firing completion callbacks.
    pub fn cancel(&self) {
        let snapshot = self.snapshot();
        let mut queue = self.core.queue.borrow_mut();
        for cell in snapshot {
            queue.stage_remove(cell);
        }
    }

    /// Force every live tween to its final value and cancel it; completion
    /// callbacks fire on the next tick.
    pub fn cancel_and_complete(&self) {
        let snapshot = self.snapshot();
        let mut queue = self.core.queue.borrow_mut();
        for cell in snapshot {
            cell.borrow_mut().force_completion();
            queue.stage_remove(cell);
        }
    }

    pub fn pause(&self) {
        for cell in self.snapshot() {
            cell.borrow_mut().pause();
        }
    }

    pub fn resume(&self) {
        for cell in self.snapshot() {
            cell.borrow_mut().resume();
        }
    }

    pub fn pause_toggle(&self) {
        for cell in self.snapshot() {
            cell.borrow_mut().pause_toggle();
        }
    }

    /// Cancel every live tween on the given targets. Targets with no live
    /// tweens are skipped silently.
    pub fn target_cancel(&self, targets: &[TargetId]) {
        let cells = self.tweens_for(targets);
        let mut queue = self.core.queue.borrow_mut();
        for cell in cells {
            queue.stage_remove(cell);
        }
    }

    pub fn target_cancel_and_complete(&self, targets: &[TargetId]) {
        let cells = self.tweens_for(targets);
        let mut queue = self.core.queue.borrow_mut();
        for cell in cells {
            cell.borrow_mut().force_completion();
            queue.stage_remove(cell);
        }
    }

    pub fn target_pause(&self, targets: &[TargetId]) {
        for cell in self.tweens_for(targets) {
            cell.borrow_mut().pause();
        }
    }

    pub fn target_resume(&self, targets: &[TargetId]) {
        for cell in self.tweens_for(targets) {
            cell.borrow_mut().resume();
        }
    }

    pub fn target_pause_toggle(&self, targets: &[TargetId]) {
        for cell in self.tweens_for(targets) {
            cell.borrow_mut().pause_toggle();
        }
    }

    /// Number of live tweens. Staged adds are not counted until the next
    /// tick boundary.
    pub fn len(&self) -> usize {
        self.core.live.borrow().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live tweens attached to `target`.
    pub fn target_len(&self, target: TargetId) -> usize {
        self.core
            .live
            .borrow()
            .by_target
            .get(&target)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Tweener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tweener")
            .field("live", &self.core.live.borrow().all.len())
            .finish()
    }
}
