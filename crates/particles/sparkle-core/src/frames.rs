//! Frame generation: point-count normalization, morph and chain clouds,
//! and the lockstep pairing of clouds with base positions.

use crate::error::{FxError, Result};
use crate::interp::{lerp_vec3, Easing};
use crate::math::{Location, Vec3};

/// Resample `points` to exactly `target` entries by nearest-lower index.
///
/// An empty input yields `target` zero offsets; an input already of the
/// right size is returned unchanged.
pub fn normalize_point_count(points: &[Vec3], target: usize) -> Vec<Vec3> {
    if points.is_empty() {
        return vec![Vec3::ZERO; target];
    }
    if points.len() == target {
        return points.to_vec();
    }
    (0..target)
        .map(|i| points[i * points.len() / target])
        .collect()
}

#[inline]
fn blend(a: &[Vec3], b: &[Vec3], t: f64) -> Vec<Vec3> {
    a.iter().zip(b).map(|(p, q)| lerp_vec3(*p, *q, t)).collect()
}

/// `steps + 1` clouds morphing `from` into `to`, both resampled to the
/// larger point count.
pub fn morph_frames(from: &[Vec3], to: &[Vec3], steps: u32, easing: Easing) -> Result<Vec<Vec<Vec3>>> {
    if steps == 0 {
        return Err(FxError::degenerate("morph needs at least one step"));
    }
    let target = from.len().max(to.len());
    let a = normalize_point_count(from, target);
    let b = normalize_point_count(to, target);
    Ok((0..=steps)
        .map(|step| blend(&a, &b, easing.apply(step as f64 / steps as f64)))
        .collect())
}

/// Clouds visiting every sample in order.
///
/// Transition `i` (sample `i` to `i + 1`) lasts `transitions[i]` steps when
/// given, otherwise `duration / (n - 1)`; never less than one. Each
/// transition contributes its steps without the endpoint, and the final
/// sample closes the list. A single sample repeats `duration + 1` times.
pub fn chain_frames(
    samples: &[Vec<Vec3>],
    transitions: &[Option<u32>],
    duration: u32,
    easing: Easing,
) -> Result<Vec<Vec<Vec3>>> {
    match samples {
        [] => Err(FxError::degenerate("chain needs at least one shape")),
        [only] => Ok(vec![only.clone(); duration as usize + 1]),
        _ => {
            let target = samples.iter().map(Vec::len).max().unwrap_or(0);
            let normalized: Vec<Vec<Vec3>> = samples
                .iter()
                .map(|s| normalize_point_count(s, target))
                .collect();
            let fallback = (duration / (samples.len() as u32 - 1)).max(1);

            let mut frames = Vec::new();
            for (i, pair) in normalized.windows(2).enumerate() {
                let steps = match transitions.get(i).copied().flatten() {
                    Some(0) => {
                        log::warn!("zero-tick transition {i} normalized to one step");
                        1
                    }
                    Some(steps) => steps,
                    None => fallback,
                };
                for step in 0..steps {
                    let t = easing.apply(step as f64 / steps as f64);
                    frames.push(blend(&pair[0], &pair[1], t));
                }
            }
            if let Some(last) = normalized.last() {
                frames.push(last.clone());
            }
            Ok(frames)
        }
    }
}

/// Points to draw for frame `cycle_index` of a pass of `frame_count` frames
/// when revealing progressively. The last frame of a pass always draws all.
pub fn progressive_count(total: usize, cycle_index: usize, frame_count: usize) -> usize {
    if frame_count <= 1 || cycle_index + 1 >= frame_count {
        return total;
    }
    let progress = cycle_index as f64 / (frame_count - 1) as f64;
    ((total as f64 * progress).ceil() as usize).min(total)
}

/// Offsets of an animation: one fixed cloud or one cloud per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Clouds {
    Fixed(Vec<Vec3>),
    PerFrame(Vec<Vec<Vec3>>),
}

/// One renderable frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub base: Location,
    pub points: &'a [Vec3],
}

/// Clouds paired index-for-index with base positions. Its length is the
/// shorter of the two lists.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    clouds: Clouds,
    bases: Vec<Location>,
}

impl FrameSet {
    pub fn fixed(points: Vec<Vec3>, bases: Vec<Location>) -> Self {
        Self {
            clouds: Clouds::Fixed(points),
            bases,
        }
    }

    pub fn per_frame(clouds: Vec<Vec<Vec3>>, bases: Vec<Location>) -> Self {
        Self {
            clouds: Clouds::PerFrame(clouds),
            bases,
        }
    }

    pub fn len(&self) -> usize {
        match &self.clouds {
            Clouds::Fixed(_) => self.bases.len(),
            Clouds::PerFrame(clouds) => clouds.len().min(self.bases.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clouds(&self) -> &Clouds {
        &self.clouds
    }

    pub fn bases(&self) -> &[Location] {
        &self.bases
    }

    pub fn frame(&self, index: usize) -> Option<Frame<'_>> {
        if index >= self.len() {
            return None;
        }
        let points = match &self.clouds {
            Clouds::Fixed(points) => points.as_slice(),
            Clouds::PerFrame(clouds) => clouds[index].as_slice(),
        };
        Some(Frame {
            base: self.bases[index],
            points,
        })
    }

    /// Reverse both lists in place.
    pub fn reverse(&mut self) {
        self.bases.reverse();
        if let Clouds::PerFrame(clouds) = &mut self.clouds {
            clouds.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn normalize_same_size_is_identity() {
        let p = pts(5);
        assert_eq!(normalize_point_count(&p, 5), p);
    }

    #[test]
    fn normalize_down_and_up() {
        let down = normalize_point_count(&pts(6), 3);
        assert_eq!(down.iter().map(|p| p.x).collect::<Vec<_>>(), vec![0.0, 2.0, 4.0]);
        let up = normalize_point_count(&pts(2), 4);
        assert_eq!(up.iter().map(|p| p.x).collect::<Vec<_>>(), vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(normalize_point_count(&[], 3), vec![Vec3::ZERO; 3]);
    }

    #[test]
    fn progressive_reveal() {
        assert_eq!(progressive_count(20, 0, 41), 0);
        assert_eq!(progressive_count(20, 20, 41), 10);
        assert_eq!(progressive_count(20, 40, 41), 20);
        assert_eq!(progressive_count(20, 1, 41), 1);
        assert_eq!(progressive_count(7, 0, 1), 7);
    }

    #[test]
    fn frame_set_runs_in_lockstep() {
        let set = FrameSet::per_frame(vec![pts(1); 5], vec![Location::default(); 3]);
        assert_eq!(set.len(), 3);
        assert!(set.frame(3).is_none());
        let fixed = FrameSet::fixed(pts(4), vec![Location::default(); 2]);
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed.frame(1).map(|f| f.points.len()), Some(4));
    }
}
