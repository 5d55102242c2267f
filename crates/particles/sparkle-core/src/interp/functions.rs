//! Interpolation helpers:
//! - scalar and vector lerp
//! - eased sequence generation between two values

use crate::error::{FxError, Result};
use crate::math::Vec3;

use super::{Easing, Lerp};

/// Linear interpolation of scalars. Exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f64) -> f32 {
    lerp_f64(a as f64, b as f64, t) as f32
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    Vec3::new(
        lerp_f64(a.x, b.x, t),
        lerp_f64(a.y, b.y, t),
        lerp_f64(a.z, b.z, t),
    )
}

/// `steps + 1` values from `start` to `end`, the i-th at eased progress `i / steps`.
///
/// The first value equals `start` and the last equals `end`. Zero steps is
/// rejected.
pub fn generate<T: Lerp>(start: &T, end: &T, steps: u32, easing: Easing) -> Result<Vec<T>> {
    if steps == 0 {
        return Err(FxError::degenerate("interpolation needs at least one step"));
    }
    let mut out = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = easing.apply(i as f64 / steps as f64);
        out.push(start.lerp(end, t));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp_f64(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp_f64(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp_f64(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn generate_rejects_zero_steps() {
        assert!(matches!(
            generate(&0.0, &1.0, 0, Easing::Linear),
            Err(FxError::DegenerateInput { .. })
        ));
    }
}
