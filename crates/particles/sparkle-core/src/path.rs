//! Base-position trajectories.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interp::{generate, Easing};
use crate::math::Location;

/// Where an animation's frames are anchored over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticlePath {
    /// No trajectory; animations anchor at their origin instead.
    #[default]
    Static,
    /// Eased move between two locations.
    Between {
        start: Location,
        end: Location,
        #[serde(default)]
        easing: Easing,
    },
}

impl ParticlePath {
    pub fn none() -> Self {
        Self::Static
    }

    /// Linear move from `start` to `end`.
    pub fn between(start: Location, end: Location) -> Self {
        Self::Between {
            start,
            end,
            easing: Easing::Linear,
        }
    }

    /// Same endpoints with another curve. The static path stays static.
    pub fn ease(&self, easing: Easing) -> Self {
        match self {
            Self::Static => Self::Static,
            Self::Between { start, end, .. } => Self::Between {
                start: *start,
                end: *end,
                easing,
            },
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static)
    }

    /// `steps + 1` base positions; empty for the static path.
    pub fn generate_frames(&self, steps: u32) -> Result<Vec<Location>> {
        match self {
            Self::Static => Ok(Vec::new()),
            Self::Between { start, end, easing } => generate(start, end, steps, *easing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_path_has_no_frames() {
        assert!(ParticlePath::none().generate_frames(10).unwrap().is_empty());
        assert!(ParticlePath::none().ease(Easing::EaseIn).is_static());
    }

    #[test]
    fn between_path_spans_both_ends() {
        let a = Location::new(0.0, 0.0, 0.0).with_rotation(0.0, 10.0);
        let b = Location::new(10.0, 5.0, -5.0).with_rotation(90.0, 30.0);
        let frames = ParticlePath::between(a, b)
            .ease(Easing::EaseOut)
            .generate_frames(10)
            .unwrap();
        assert_eq!(frames.len(), 11);
        assert_eq!(frames[0], a);
        assert_eq!(frames[10], b);
        assert!(frames[5].position.x > 5.0);
        assert!(frames[5].yaw > 45.0);
    }

    #[test]
    fn ease_does_not_mutate_the_original() {
        let path = ParticlePath::between(Location::default(), Location::new(1.0, 0.0, 0.0));
        let eased = path.ease(Easing::EaseIn);
        assert_ne!(path, eased);
        assert!(matches!(
            path,
            ParticlePath::Between {
                easing: Easing::Linear,
                ..
            }
        ));
    }
}
