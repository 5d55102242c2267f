use crate::error::Result;

use super::{generate, Easing, Lerp};

/// Fluent front end for [`generate`].
///
/// ```
/// use sparkle_core::interp::{Easing, Interpolator};
///
/// let values = Interpolator::between(0.0_f64, 10.0)
///     .over(4)
///     .ease(Easing::EaseIn)
///     .build()
///     .unwrap();
/// assert_eq!(values.len(), 5);
/// assert_eq!(values[4], 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Interpolator<T> {
    start: T,
    end: T,
    steps: u32,
    easing: Easing,
}

impl<T: Lerp> Interpolator<T> {
    /// Default: 20 steps, linear.
    pub fn between(start: T, end: T) -> Self {
        Self {
            start,
            end,
            steps: 20,
            easing: Easing::Linear,
        }
    }

    pub fn over(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn build(&self) -> Result<Vec<T>> {
        generate(&self.start, &self.end, self.steps, self.easing)
    }
}
