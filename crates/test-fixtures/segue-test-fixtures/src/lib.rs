//! Shared fixtures for segue-tween tests: a small sprite world with a
//! property resolver, plus easing curves and float helpers.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use segue_tween_core::{
    Access, FnAccessor, PropertyAccessor, PropertyKind, PropertyResolver, TargetId, TweenError,
};

/// Loose tolerance for comparing interpolated floats.
pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Quadratic ease-in-out, the usual smoothstep-like curve.
pub fn ease_quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Back-out easing, overshoots past 1 before settling.
pub fn ease_back_out(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// A tweenable test object covering every property kind the tests need.
#[derive(Debug, Default, Clone)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    /// Facing angle in degrees.
    pub angle: f32,
    /// Facing angle in radians, for the radians rotation tests.
    pub heading: f32,
    pub frame: i32,
    /// Packed 24-bit RGB tint.
    pub tint: u32,
    /// Declared with a custom kind, so it only tweens once a lerper for
    /// `Custom("glow")` is registered.
    pub glow: f32,
    pub visible: bool,
}

pub type SharedSprite = Rc<RefCell<Sprite>>;

/// Resolver over a set of shared sprites keyed by target id.
///
/// Property table:
/// - `x`, `y`, `angle`, `heading`: F32, read-write
/// - `frame`: I32, read-write
/// - `tint`: U32, read-write
/// - `glow`: Custom("glow"), read-write
/// - `area`: F32, read-only (x * y)
/// - `visible`: not numeric, always refused
#[derive(Default)]
pub struct SpriteWorld {
    sprites: HashMap<TargetId, SharedSprite>,
}

impl SpriteWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, id: TargetId) -> SharedSprite {
        let sprite: SharedSprite = Rc::new(RefCell::new(Sprite::default()));
        self.sprites.insert(id, sprite.clone());
        sprite
    }

    pub fn sprite(&self, id: TargetId) -> Option<SharedSprite> {
        self.sprites.get(&id).cloned()
    }
}

impl PropertyResolver for SpriteWorld {
    fn resolve(
        &mut self,
        target: TargetId,
        property: &str,
        access: Access,
    ) -> Result<Box<dyn PropertyAccessor>, TweenError> {
        let sprite = self
            .sprites
            .get(&target)
            .cloned()
            .ok_or_else(|| TweenError::PropertyNotFound {
                target,
                property: property.to_string(),
            })?;

        macro_rules! f32_field {
            ($field:ident) => {{
                let get = {
                    let s = sprite.clone();
                    move || s.borrow().$field
                };
                let set = {
                    let s = sprite.clone();
                    move |v: f32| s.borrow_mut().$field = v
                };
                Ok(Box::new(FnAccessor::new(PropertyKind::F32, get, set))
                    as Box<dyn PropertyAccessor>)
            }};
        }

        match property {
            "x" => f32_field!(x),
            "y" => f32_field!(y),
            "angle" => f32_field!(angle),
            "heading" => f32_field!(heading),
            "frame" => {
                let get = {
                    let s = sprite.clone();
                    move || s.borrow().frame as f32
                };
                let set = {
                    let s = sprite.clone();
                    move |v: f32| s.borrow_mut().frame = v as i32
                };
                Ok(Box::new(FnAccessor::new(PropertyKind::I32, get, set)))
            }
            "tint" => {
                let get = {
                    let s = sprite.clone();
                    move || s.borrow().tint as f32
                };
                let set = {
                    let s = sprite.clone();
                    move |v: f32| s.borrow_mut().tint = v as u32
                };
                Ok(Box::new(FnAccessor::new(PropertyKind::U32, get, set)))
            }
            "glow" => {
                let get = {
                    let s = sprite.clone();
                    move || s.borrow().glow
                };
                let set = {
                    let s = sprite.clone();
                    move |v: f32| s.borrow_mut().glow = v
                };
                Ok(Box::new(FnAccessor::new(
                    PropertyKind::Custom("glow"),
                    get,
                    set,
                )))
            }
            "area" => {
                if matches!(access, Access::Write | Access::ReadWrite) {
                    return Err(TweenError::MissingCapability {
                        target,
                        property: property.to_string(),
                        capability: "write",
                    });
                }
                let get = {
                    let s = sprite.clone();
                    move || {
                        let s = s.borrow();
                        s.x * s.y
                    }
                };
                Ok(Box::new(FnAccessor::new(PropertyKind::F32, get, |_| {})))
            }
            "visible" => Err(TweenError::NotNumeric {
                property: property.to_string(),
                kind: PropertyKind::Custom("bool"),
            }),
            _ => Err(TweenError::PropertyNotFound {
                target,
                property: property.to_string(),
            }),
        }
    }
}
