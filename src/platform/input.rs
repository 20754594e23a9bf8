//! Input providers
//!
//! A source only reports which controls are held this frame. Edge detection
//! happens in the simulation's `EdgeDetector`.

use std::collections::VecDeque;

use crate::sim::Controls;

/// Anything that can say which controls are held right now
pub trait InputSource {
    fn poll(&mut self) -> Controls;
}

/// Plays back a fixed list of frames, then reports nothing held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Controls>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Controls>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `count` frames of the same controls
    pub fn hold(mut self, controls: Controls, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(controls, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Controls {
        self.frames.pop_front().unwrap_or_default()
    }
}
