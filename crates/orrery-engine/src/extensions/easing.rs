// extensions/easing.rs
//
// Easing curves applied inside a keyframe segment.
// Each curve is defined once as its "in" form; out and in-out are derived.

use std::f32::consts::PI;
use glam::Vec3;

/// Shape of the easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingCurve {
    #[default]
    Linear,
    Quad,
    Cubic,
    Quart,
    Sine,
    Expo,
    /// Pulls back before moving forward.
    Back,
    Bounce,
    Elastic,
}

/// Which end of the segment the curve is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingMode {
    #[default]
    In,
    Out,
    InOut,
}

/// An easing function: a curve plus the mode it runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Easing {
    pub curve: EasingCurve,
    pub mode: EasingMode,
}

impl Easing {
    pub const LINEAR: Easing = Easing::new(EasingCurve::Linear, EasingMode::In);

    pub const fn new(curve: EasingCurve, mode: EasingMode) -> Self {
        Self { curve, mode }
    }

    pub const fn ease_in(curve: EasingCurve) -> Self {
        Self::new(curve, EasingMode::In)
    }

    pub const fn ease_out(curve: EasingCurve) -> Self {
        Self::new(curve, EasingMode::Out)
    }

    pub const fn ease_in_out(curve: EasingCurve) -> Self {
        Self::new(curve, EasingMode::InOut)
    }

    /// Map normalized time `t` in [0, 1] through the curve.
    /// Back and Elastic may leave [0, 1] in the middle of the range.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.mode {
            EasingMode::In => curve_in(self.curve, t),
            EasingMode::Out => 1.0 - curve_in(self.curve, 1.0 - t),
            EasingMode::InOut => {
                if t < 0.5 {
                    curve_in(self.curve, t * 2.0) * 0.5
                } else {
                    1.0 - curve_in(self.curve, (1.0 - t) * 2.0) * 0.5
                }
            }
        }
    }
}

fn curve_in(curve: EasingCurve, t: f32) -> f32 {
    match curve {
        EasingCurve::Linear => t,
        EasingCurve::Quad => t * t,
        EasingCurve::Cubic => t * t * t,
        EasingCurve::Quart => t * t * t * t,
        EasingCurve::Sine => 1.0 - (t * PI / 2.0).cos(),
        EasingCurve::Expo => {
            if t <= 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
        }
        EasingCurve::Back => {
            const OVERSHOOT: f32 = 1.70158;
            t * t * ((OVERSHOOT + 1.0) * t - OVERSHOOT)
        }
        EasingCurve::Bounce => 1.0 - bounce_out(1.0 - t),
        EasingCurve::Elastic => {
            if t <= 0.0 || t >= 1.0 {
                t
            } else {
                let period = (2.0 * PI) / 3.0;
                -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * period).sin()
            }
        }
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingCurve; 9] = [
        EasingCurve::Linear,
        EasingCurve::Quad,
        EasingCurve::Cubic,
        EasingCurve::Quart,
        EasingCurve::Sine,
        EasingCurve::Expo,
        EasingCurve::Back,
        EasingCurve::Bounce,
        EasingCurve::Elastic,
    ];

    #[test]
    fn every_curve_hits_both_endpoints() {
        for curve in CURVES {
            for mode in [EasingMode::In, EasingMode::Out, EasingMode::InOut] {
                let e = Easing::new(curve, mode);
                assert!(e.apply(0.0).abs() < 1e-3, "{curve:?} {mode:?} at 0");
                assert!((e.apply(1.0) - 1.0).abs() < 1e-3, "{curve:?} {mode:?} at 1");
            }
        }
    }

    #[test]
    fn out_mode_front_loads_motion() {
        let mid = Easing::ease_out(EasingCurve::Quad).apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
        let mid = Easing::ease_in(EasingCurve::Quad).apply(0.5);
        assert!(mid < 0.5);
    }

    #[test]
    fn in_out_is_symmetric_about_midpoint() {
        let e = Easing::ease_in_out(EasingCurve::Cubic);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn back_in_dips_below_zero() {
        assert!(Easing::ease_in(EasingCurve::Back).apply(0.2) < 0.0);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let v = ease_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 0.5, Easing::LINEAR);
        assert!((v - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!((ease(100.0, 200.0, 0.5, Easing::LINEAR) - 150.0).abs() < 0.001);
    }
}
