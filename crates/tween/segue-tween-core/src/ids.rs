//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Opaque identity of a tween target.
///
/// The core never dereferences this; it is only hashed and compared when the
/// manager groups tweens by target. Hosts decide what the bits mean (entity
/// index, interned pointer, whatever is stable for the target's lifetime).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl TargetId {
    /// Shared identity used by timers, which have no real target.
    pub const DETACHED: TargetId = TargetId(u64::MAX);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TweenId(pub u32);

/// Monotonic allocator for TweenId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_tween: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_tween(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween = self.next_tween.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_tween(), TweenId(0));
        assert_eq!(alloc.alloc_tween(), TweenId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_tween(), TweenId(0));
    }
}
