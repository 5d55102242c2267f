//! Easing curves and interpolation between values.

pub mod functions;
pub mod interpolator;

use serde::{Deserialize, Serialize};

use crate::math::{Location, Vec3};

pub use functions::{generate, lerp_f32, lerp_f64, lerp_vec3};
pub use interpolator::Interpolator;

/// Easing curve mapping normalized progress in [0, 1] to [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply the curve to `t`.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
        }
    }
}

impl From<&str> for Easing {
    fn from(s: &str) -> Self {
        match s {
            "ease_in" => Self::EaseIn,
            "ease_out" => Self::EaseOut,
            "ease_in_out" => Self::EaseInOut,
            _ => Self::Linear,
        }
    }
}

/// Values that can be blended component-wise.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp_f64(*self, *other, t)
    }
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp_f32(*self, *other, t)
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp_vec3(*self, *other, t)
    }
}

impl Lerp for Location {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Location {
            position: lerp_vec3(self.position, other.position, t),
            yaw: lerp_f32(self.yaw, other.yaw, t),
            pitch: lerp_f32(self.pitch, other.pitch, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_fix_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{}", easing.name());
            assert_eq!(easing.apply(1.0), 1.0, "{}", easing.name());
        }
    }

    #[test]
    fn ease_in_out_is_continuous_at_half() {
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        let below = Easing::EaseInOut.apply(0.5 - 1e-9);
        assert!((below - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unknown_names_fall_back_to_linear() {
        assert_eq!(Easing::from("bounce"), Easing::Linear);
        assert_eq!(Easing::from(Easing::EaseOut.name()), Easing::EaseOut);
    }
}
