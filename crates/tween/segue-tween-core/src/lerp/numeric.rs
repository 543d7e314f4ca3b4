//! Numeric lerper: linear blend with optional shortest-path rotation,
//! rounding, and packed-RGB channel interpolation.

use super::Lerper;
use crate::behavior::Behavior;

const DEG_PER_RAD: f32 = 180.0 / std::f32::consts::PI;
const RAD_PER_DEG: f32 = std::f32::consts::PI / 180.0;

/// Default strategy for all standard numeric property kinds.
///
/// Holds the captured `from` and the derived `range`; with a rotation flag
/// the pair is kept in degrees and the range pre-adjusted at initialize time
/// so the sweep never exceeds 180°.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericLerper {
    from: f32,
    range: f32,
}

impl Lerper for NumericLerper {
    fn initialize(&mut self, from: f32, to: f32, behavior: Behavior) {
        self.from = from;
        self.range = to - from;

        if behavior.rotation() {
            // Work in degrees; interpolate converts back.
            if behavior.radians() {
                self.from *= DEG_PER_RAD;
                self.range *= DEG_PER_RAD;
            }
            self.from = self.from.rem_euclid(360.0);

            let delta = self.range;
            let arc = delta.abs();
            self.range = if arc >= 180.0 {
                (360.0 - arc) * if delta > 0.0 { -1.0 } else { 1.0 }
            } else {
                delta
            };
        }
    }

    fn interpolate(&self, t: f32, behavior: Behavior) -> f32 {
        if behavior.contains(Behavior::HEX_COLOR) {
            return lerp_packed_rgb(self.from, self.range, t);
        }

        let mut value = self.from + self.range * t;
        if behavior.rotation() {
            value = value.rem_euclid(360.0);
            if behavior.radians() {
                value *= RAD_PER_DEG;
            }
        }
        if behavior.contains(Behavior::ROUND) {
            value = value.round();
        }
        value
    }
}

/// Channel-wise interpolation of packed 24-bit RGB values.
/// Channels blend independently in normalized [0,1] space, then repack.
fn lerp_packed_rgb(from: f32, range: f32, t: f32) -> f32 {
    let a = (from as i64).clamp(0, 0xFF_FFFF) as u32;
    let b = ((from + range) as i64).clamp(0, 0xFF_FFFF) as u32;
    let r = lerp_channel(a >> 16 & 0xFF, b >> 16 & 0xFF, t);
    let g = lerp_channel(a >> 8 & 0xFF, b >> 8 & 0xFF, t);
    let bl = lerp_channel(a & 0xFF, b & 0xFF, t);
    ((r << 16) | (g << 8) | bl) as f32
}

#[inline]
fn lerp_channel(a: u32, b: u32, t: f32) -> u32 {
    let an = a as f32 / 255.0;
    let bn = b as f32 / 255.0;
    (((an + (bn - an) * t) * 255.0).round() as i64).clamp(0, 255) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(from: f32, to: f32, behavior: Behavior) -> NumericLerper {
        let mut lerper = NumericLerper::default();
        lerper.initialize(from, to, behavior);
        lerper
    }

    #[test]
    fn plain_linear_midpoint() {
        let lerper = init(2.0, 6.0, Behavior::empty());
        assert_eq!(lerper.interpolate(0.5, Behavior::empty()), 4.0);
    }

    #[test]
    fn negative_angle_normalizes_before_wrap() {
        // -10 deg is normalized to 350; sweeping to 10 crosses zero.
        let flags = Behavior::ROTATION_DEGREES;
        let lerper = init(-10.0, 10.0, flags);
        let mid = lerper.interpolate(0.5, flags);
        assert!(mid.abs() < 1e-3 || (mid - 360.0).abs() < 1e-3, "mid={mid}");
    }

    #[test]
    fn exact_half_turn_stays_half_turn() {
        let flags = Behavior::ROTATION_DEGREES;
        let lerper = init(0.0, 180.0, flags);
        let end = lerper.interpolate(1.0, flags);
        assert!((end - 180.0).abs() < 1e-3, "end={end}");
    }
}
