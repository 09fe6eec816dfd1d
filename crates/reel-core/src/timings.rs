//! Tunable durations and amounts for section transitions and the epilogue.
//!
//! Durations are whole milliseconds so the tracks built from them line up
//! exactly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTimings {
    #[serde(default = "default_base_duration_ms")]
    pub base_duration_ms: u64,
    #[serde(default = "default_parallax_pct")]
    pub parallax_pct: f32,
    #[serde(default = "default_outgoing_fraction")]
    pub outgoing_fraction: f32,
    #[serde(default = "default_word_stagger_in_ms")]
    pub word_stagger_in_ms: u64,
    #[serde(default = "default_word_stagger_out_ms")]
    pub word_stagger_out_ms: u64,
    #[serde(default = "default_text_cue_delay_ms")]
    pub text_cue_delay_ms: u64,
    #[serde(default = "default_list_dim_opacity")]
    pub list_dim_opacity: f32,
    #[serde(default = "default_list_fade_ms")]
    pub list_fade_ms: u64,
    #[serde(default = "default_navigate_scroll_ms")]
    pub navigate_scroll_ms: u64,
    #[serde(default = "default_snap_scroll_ms")]
    pub snap_scroll_ms: u64,
    #[serde(default = "default_epilogue_smoothing_ms")]
    pub epilogue_smoothing_ms: u64,
    #[serde(default = "default_epilogue_base_offset_px")]
    pub epilogue_base_offset_px: f32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        TransitionTimings {
            base_duration_ms: default_base_duration_ms(),
            parallax_pct: default_parallax_pct(),
            outgoing_fraction: default_outgoing_fraction(),
            word_stagger_in_ms: default_word_stagger_in_ms(),
            word_stagger_out_ms: default_word_stagger_out_ms(),
            text_cue_delay_ms: default_text_cue_delay_ms(),
            list_dim_opacity: default_list_dim_opacity(),
            list_fade_ms: default_list_fade_ms(),
            navigate_scroll_ms: default_navigate_scroll_ms(),
            snap_scroll_ms: default_snap_scroll_ms(),
            epilogue_smoothing_ms: default_epilogue_smoothing_ms(),
            epilogue_base_offset_px: default_epilogue_base_offset_px(),
        }
    }
}

impl TransitionTimings {
    /// Replace non-finite values with defaults and clamp the rest into
    /// usable ranges.
    pub fn sanitized(self) -> Self {
        let fallback = TransitionTimings::default();
        let pick = |value: f32, default: f32, min: f32, max: f32| {
            if value.is_finite() {
                value.clamp(min, max)
            } else {
                default
            }
        };
        TransitionTimings {
            base_duration_ms: self.base_duration_ms.clamp(50, 5_000),
            parallax_pct: pick(self.parallax_pct, fallback.parallax_pct, 0.0, 50.0),
            outgoing_fraction: pick(self.outgoing_fraction, fallback.outgoing_fraction, 0.1, 1.0),
            word_stagger_in_ms: self.word_stagger_in_ms.min(500),
            word_stagger_out_ms: self.word_stagger_out_ms.min(500),
            text_cue_delay_ms: self.text_cue_delay_ms.min(5_000),
            list_dim_opacity: pick(self.list_dim_opacity, fallback.list_dim_opacity, 0.0, 1.0),
            list_fade_ms: self.list_fade_ms.min(5_000),
            navigate_scroll_ms: self.navigate_scroll_ms.min(10_000),
            snap_scroll_ms: self.snap_scroll_ms.min(10_000),
            epilogue_smoothing_ms: self.epilogue_smoothing_ms.min(2_000),
            epilogue_base_offset_px: pick(
                self.epilogue_base_offset_px,
                fallback.epilogue_base_offset_px,
                0.0,
                10_000.0,
            ),
        }
    }

    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_duration_ms)
    }

    /// Fraction of `base`, rounded to the millisecond.
    pub fn of_base(&self, fraction: f32) -> Duration {
        let fraction = if fraction.is_finite() { fraction.max(0.0) } else { 0.0 };
        Duration::from_millis((self.base_duration_ms as f32 * fraction).round() as u64)
    }

    /// The previous background fades over the second half of the base
    /// duration, so it always ends exactly when the base duration does.
    pub fn gate_delay(&self) -> Duration {
        self.base() / 2
    }

    /// Fade of the previous background; its end releases the transition
    /// lock. Staggered incoming words may still be settling after it, and
    /// the lock does not wait for them.
    pub fn gate_fade(&self) -> Duration {
        self.base().saturating_sub(self.gate_delay())
    }

    pub fn text_cue_delay(&self) -> Duration {
        Duration::from_millis(self.text_cue_delay_ms)
    }

    pub fn word_stagger_in(&self) -> Duration {
        Duration::from_millis(self.word_stagger_in_ms)
    }

    pub fn word_stagger_out(&self) -> Duration {
        Duration::from_millis(self.word_stagger_out_ms)
    }

    pub fn list_fade(&self) -> Duration {
        Duration::from_millis(self.list_fade_ms)
    }

    pub fn navigate_scroll(&self) -> Duration {
        Duration::from_millis(self.navigate_scroll_ms)
    }

    pub fn snap_scroll(&self) -> Duration {
        Duration::from_millis(self.snap_scroll_ms)
    }

    pub fn epilogue_smoothing(&self) -> Duration {
        Duration::from_millis(self.epilogue_smoothing_ms)
    }
}

fn default_base_duration_ms() -> u64 {
    640
}

fn default_parallax_pct() -> f32 {
    5.0
}

fn default_outgoing_fraction() -> f32 {
    0.6
}

fn default_word_stagger_in_ms() -> u64 {
    50
}

fn default_word_stagger_out_ms() -> u64 {
    30
}

fn default_text_cue_delay_ms() -> u64 {
    250
}

fn default_list_dim_opacity() -> f32 {
    0.3
}

fn default_list_fade_ms() -> u64 {
    300
}

fn default_navigate_scroll_ms() -> u64 {
    800
}

fn default_snap_scroll_ms() -> u64 {
    600
}

fn default_epilogue_smoothing_ms() -> u64 {
    100
}

fn default_epilogue_base_offset_px() -> f32 {
    200.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_ends_with_the_base_duration() {
        let timings = TransitionTimings::default();
        assert_eq!(timings.gate_delay() + timings.gate_fade(), timings.base());

        let odd = TransitionTimings {
            base_duration_ms: 641,
            ..TransitionTimings::default()
        };
        assert_eq!(odd.gate_delay() + odd.gate_fade(), odd.base());
    }

    #[test]
    fn durations_are_exact_milliseconds() {
        let timings = TransitionTimings::default();
        assert_eq!(timings.navigate_scroll(), Duration::from_millis(800));
        assert_eq!(timings.snap_scroll(), Duration::from_millis(600));
        assert_eq!(timings.base(), Duration::from_millis(640));
        assert_eq!(timings.of_base(0.6), Duration::from_millis(384));
        assert_eq!(timings.of_base(0.3), Duration::from_millis(192));
        assert_eq!(timings.word_stagger_in(), Duration::from_millis(50));
        assert_eq!(timings.epilogue_smoothing(), Duration::from_millis(100));
    }

    #[test]
    fn sanitize_replaces_garbage() {
        let timings = TransitionTimings {
            base_duration_ms: 0,
            parallax_pct: f32::NAN,
            list_dim_opacity: 3.0,
            snap_scroll_ms: 60_000,
            ..TransitionTimings::default()
        }
        .sanitized();
        assert_eq!(timings.base_duration_ms, 50);
        assert_eq!(timings.parallax_pct, 5.0);
        assert_eq!(timings.list_dim_opacity, 1.0);
        assert_eq!(timings.snap_scroll_ms, 10_000);
    }
}
