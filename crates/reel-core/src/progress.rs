//! Continuous pinned-region progress to discrete section targets.

use crate::sections::{LAST_SECTION, SECTION_COUNT};

/// Smallest progress change that counts as movement.
pub const DIRECTION_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    #[default]
    Still,
    Down,
}

impl ScrollDirection {
    pub fn sign(self) -> i8 {
        match self {
            ScrollDirection::Up => -1,
            ScrollDirection::Still => 0,
            ScrollDirection::Down => 1,
        }
    }
}

/// Section index for a progress value in `[0, 1]`.
pub fn map_progress(progress: f32) -> usize {
    let p = sanitize_progress(progress);
    ((p * SECTION_COUNT as f32).floor() as usize).min(LAST_SECTION)
}

/// The single adjacent step from `current` toward `target`, if any.
pub fn step_toward(current: usize, target: usize) -> Option<usize> {
    match target.cmp(&current) {
        std::cmp::Ordering::Greater => Some(current + 1),
        std::cmp::Ordering::Less => Some(current - 1),
        std::cmp::Ordering::Equal => None,
    }
}

pub(crate) fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    pub progress: f32,
    pub target: usize,
    pub direction: ScrollDirection,
}

/// Remembers the previous sample to derive a direction with hysteresis.
#[derive(Debug, Clone, Default)]
pub struct ProgressMapper {
    last_progress: f32,
    direction: ScrollDirection,
}

impl ProgressMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, progress: f32) -> ProgressSample {
        let progress = sanitize_progress(progress);
        let delta = progress - self.last_progress;
        if delta.abs() > DIRECTION_EPSILON {
            self.direction = if delta > 0.0 {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            };
        }
        self.last_progress = progress;
        ProgressSample {
            progress,
            target: map_progress(progress),
            direction: self.direction,
        }
    }

    pub fn last_progress(&self) -> f32 {
        self.last_progress
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_progress_to_sections() {
        assert_eq!(map_progress(0.0), 0);
        assert_eq!(map_progress(0.35), 3);
        assert_eq!(map_progress(0.99), 9);
        assert_eq!(map_progress(1.0), 9);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(map_progress(-0.5), 0);
        assert_eq!(map_progress(3.0), 9);
        assert_eq!(map_progress(f32::NAN), 0);
    }

    #[test]
    fn direction_ignores_jitter() {
        let mut mapper = ProgressMapper::new();
        assert_eq!(mapper.sample(0.2).direction, ScrollDirection::Down);
        assert_eq!(mapper.sample(0.2005).direction, ScrollDirection::Down);
        assert_eq!(mapper.sample(0.1).direction, ScrollDirection::Up);
        assert_eq!(mapper.sample(0.1).direction.sign(), -1);
        assert_eq!(mapper.last_progress(), 0.1);
    }

    #[test]
    fn steps_are_adjacent() {
        assert_eq!(step_toward(2, 7), Some(3));
        assert_eq!(step_toward(5, 0), Some(4));
        assert_eq!(step_toward(4, 4), None);
    }
}
