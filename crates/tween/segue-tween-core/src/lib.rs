//! Segue Tween Core (engine-agnostic)
//!
//! A tween runtime: the `Tweener` manager owns a set of live tweens, each of
//! which advances numeric properties on an opaque target from a captured
//! start value to a goal value over a duration, under an optional easing
//! curve, with looping, reflection, and type-specific interpolation
//! (shortest-path rotation, packed-RGB color blending).
//!
//! Hosts supply two collaborators: a [`PropertyResolver`] that turns
//! (target, property name) into a fixed get/set accessor, and easing
//! functions (`fn(f32) -> f32`). Everything else lives here.

pub mod access;
pub mod behavior;
pub mod config;
pub mod error;
pub mod ids;
pub mod lerp;
pub mod tween;
pub mod tweener;

// Re-exports for consumers (adapters)
pub use access::{Access, FnAccessor, PropertyAccessor, PropertyKind, PropertyResolver};
pub use behavior::{Behavior, RotationUnit};
pub use config::Config;
pub use error::{TweenError, TweenResult};
pub use ids::{IdAllocator, TargetId, TweenId};
pub use lerp::{Lerper, LerperRegistry, NumericLerper};
pub use tween::TweenHandle;
pub use tweener::Tweener;
