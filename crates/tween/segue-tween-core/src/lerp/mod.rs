//! Interpolation strategies and the type-keyed registry.
//!
//! The numeric lerper covers all standard integer and floating-point kinds;
//! callers extend the registry with constructors for custom kinds.

pub mod numeric;

use hashbrown::HashMap;

use crate::access::PropertyKind;
use crate::behavior::Behavior;
use crate::error::TweenError;

pub use numeric::NumericLerper;

/// Interpolation strategy for one binding.
///
/// `initialize` fixes the working range from the captured endpoints; it runs
/// on the tween's first advance and again whenever the endpoints change
/// (From/Reverse). `interpolate` is then a pure function of `t`.
pub trait Lerper {
    fn initialize(&mut self, from: f32, to: f32, behavior: Behavior);
    fn interpolate(&self, t: f32, behavior: Behavior) -> f32;
}

/// Factory table mapping a property kind to its lerper constructor.
/// Queried once per binding at tween creation, never on the tick path.
pub struct LerperRegistry {
    factories: HashMap<PropertyKind, Box<dyn Fn() -> Box<dyn Lerper>>>,
}

impl LerperRegistry {
    /// Registry with [`NumericLerper`] pre-registered for every standard
    /// numeric kind.
    pub fn with_numeric_defaults() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        for kind in PropertyKind::NUMERIC {
            reg.register(kind, || Box::new(NumericLerper::default()) as Box<dyn Lerper>);
        }
        reg
    }

    pub fn register<F>(&mut self, kind: PropertyKind, factory: F)
    where
        F: Fn() -> Box<dyn Lerper> + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Construct a lerper for `kind`; an unregistered kind fails the
    /// creation call that asked for it.
    pub fn create(&self, kind: PropertyKind) -> Result<Box<dyn Lerper>, TweenError> {
        self.factories
            .get(&kind)
            .map(|factory| factory())
            .ok_or(TweenError::NoLerper { kind })
    }
}

impl Default for LerperRegistry {
    fn default() -> Self {
        Self::with_numeric_defaults()
    }
}
