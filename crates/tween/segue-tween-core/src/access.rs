//! Property accessor capability and its resolver.
//!
//! A resolver turns (target, property name) into a fixed get/set pair once
//! at binding-creation time; no name lookup happens on the tick path.
//! Resolution failure (unknown name, missing capability, non-numeric type)
//! is a configuration error raised at creation, not at tick time.

use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::ids::TargetId;

/// Declared value type of a property. The lerper registry is keyed by this.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    I16,
    I32,
    I64,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Caller-defined value type served by a registered custom lerper.
    Custom(&'static str),
}

impl PropertyKind {
    /// The standard numeric kinds, pre-registered with the numeric lerper.
    pub const NUMERIC: [PropertyKind; 8] = [
        PropertyKind::I16,
        PropertyKind::I32,
        PropertyKind::I64,
        PropertyKind::U16,
        PropertyKind::U32,
        PropertyKind::U64,
        PropertyKind::F32,
        PropertyKind::F64,
    ];

    #[inline]
    pub fn is_numeric(self) -> bool {
        !matches!(self, PropertyKind::Custom(_))
    }
}

/// Which capabilities a resolution must provide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

/// Resolved get/set capability over one property of one target.
///
/// `set` receives the interpolated scalar and converts it to the declared
/// type itself; integral kinds truncate per standard numeric conversion.
pub trait PropertyAccessor {
    fn kind(&self) -> PropertyKind;
    fn get(&self) -> f32;
    fn set(&mut self, value: f32);
}

/// Collaborator that resolves property names on opaque targets.
/// Hosts implement this and hand it to [`crate::Tweener`] at construction.
pub trait PropertyResolver {
    fn resolve(
        &mut self,
        target: TargetId,
        property: &str,
        access: Access,
    ) -> Result<Box<dyn PropertyAccessor>, TweenError>;
}

/// Accessor built from a get/set closure pair, for hosts that keep state
/// behind `Rc<RefCell<..>>` or similar.
pub struct FnAccessor {
    kind: PropertyKind,
    get: Box<dyn Fn() -> f32>,
    set: Box<dyn FnMut(f32)>,
}

impl FnAccessor {
    pub fn new(
        kind: PropertyKind,
        get: impl Fn() -> f32 + 'static,
        set: impl FnMut(f32) + 'static,
    ) -> Self {
        Self {
            kind,
            get: Box::new(get),
            set: Box::new(set),
        }
    }
}

impl PropertyAccessor for FnAccessor {
    fn kind(&self) -> PropertyKind {
        self.kind
    }

    fn get(&self) -> f32 {
        (self.get)()
    }

    fn set(&mut self, value: f32) {
        (self.set)(value)
    }
}
