//! Error types raised at tween creation time.
//!
//! Everything here is a configuration error surfaced synchronously by
//! `Tweener::tween` or `TweenHandle::from`. Once a tween is validly
//! constructed, every subsequent tick is total.

use thiserror::Error;

use crate::access::PropertyKind;
use crate::ids::TargetId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// The resolver knows no property of this name on the target.
    #[error("property '{property}' not found on target {target:?}")]
    PropertyNotFound { target: TargetId, property: String },

    /// The property exists but lacks a required get or set capability.
    #[error("property '{property}' on target {target:?} has no {capability} accessor")]
    MissingCapability {
        target: TargetId,
        property: String,
        capability: &'static str,
    },

    /// The property's declared type cannot be tweened numerically.
    #[error("property '{property}' must be numeric to tween (found {kind:?})")]
    NotNumeric {
        property: String,
        kind: PropertyKind,
    },

    /// No lerper constructor registered for the declared kind.
    #[error("no lerper registered for {kind:?}")]
    NoLerper { kind: PropertyKind },

    /// A handle operation needed the manager after it was dropped.
    #[error("tweener has been dropped")]
    ManagerGone,
}

pub type TweenResult<T> = Result<T, TweenError>;
