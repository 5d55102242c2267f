//! Frame cursor shared by every animation kind: index, loop wrap,
//! direction reversal and progressive-reveal parity.

use crate::config::PlaybackConfig;
use crate::frames::{progressive_count, Frame, FrameSet};

/// Position of the frame about to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index into the current (possibly reversed) frame list.
    pub index: usize,
    /// Index in original playback order; drives the progressive reveal.
    pub cycle_index: usize,
    pub frame_count: usize,
}

#[derive(Debug, Clone)]
pub struct Playback {
    frames: FrameSet,
    index: usize,
    looping: bool,
    reverse: bool,
    progressive: bool,
    reversed: bool,
}

impl Playback {
    pub fn new(frames: FrameSet, config: &PlaybackConfig) -> Self {
        Self {
            frames,
            index: 0,
            looping: config.looping,
            reverse: config.reverse,
            progressive: config.progressive_draw,
            reversed: false,
        }
    }

    /// Back to the first frame in original orientation.
    pub fn rewind(&mut self) {
        if self.reversed {
            self.swap();
        }
        self.index = 0;
    }

    /// Claim the next frame. At the end of the list a looping playback
    /// wraps (reversing first when configured) and a one-shot returns `None`.
    pub fn advance(&mut self) -> Option<Cursor> {
        let frame_count = self.frames.len();
        if frame_count == 0 {
            return None;
        }
        if self.index >= frame_count {
            if !self.looping {
                return None;
            }
            self.index = 0;
            if self.reverse {
                self.swap();
            }
        }
        let index = self.index;
        self.index += 1;
        let cycle_index = if self.reversed {
            frame_count - 1 - index
        } else {
            index
        };
        Some(Cursor {
            index,
            cycle_index,
            frame_count,
        })
    }

    pub fn frame(&self, cursor: &Cursor) -> Option<Frame<'_>> {
        self.frames.frame(cursor.index)
    }

    /// How many of `total` points to draw at `cursor`.
    pub fn visible(&self, cursor: &Cursor, total: usize) -> usize {
        if self.progressive {
            progressive_count(total, cursor.cycle_index, cursor.frame_count)
        } else {
            total
        }
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the next frame to draw.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn is_progressive(&self) -> bool {
        self.progressive
    }

    fn swap(&mut self) {
        self.frames.reverse();
        self.reversed = !self.reversed;
    }
}
