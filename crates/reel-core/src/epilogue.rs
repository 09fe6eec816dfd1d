//! Trailing page region: as it scrolls in, the pinned stage shrinks away and
//! the surrounding chrome blurs and drifts upward at different rates.

use crate::ease::Ease;
use crate::effects::{Effect, Flag, Property, Props, Target, Tween};
use crate::progress::sanitize_progress;
use crate::slideshow::Slideshow;
use tracing::trace;

/// Epilogue progress at or below which the stage stays at rest.
pub const EPILOGUE_THRESHOLD: f32 = 0.1;

const HEADER_RATE: f32 = 1.5;
const CONTENT_RATE: f32 = 1.0;
const FOOTER_RATE: f32 = 0.5;

/// Where the epilogue reveal wants the stage to be for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpilogueFrame {
    pub blurred: bool,
    pub pinned_height_pct: f32,
    pub header_offset_px: f32,
    pub content_offset_px: f32,
    pub footer_offset_px: f32,
}

impl EpilogueFrame {
    pub fn rest() -> Self {
        Self {
            blurred: false,
            pinned_height_pct: 100.0,
            header_offset_px: 0.0,
            content_offset_px: 0.0,
            footer_offset_px: 0.0,
        }
    }

    /// Frame for progress `q`, with `base_offset_px` the content drift at
    /// full reveal.
    pub fn at(q: f32, base_offset_px: f32) -> Self {
        let q = sanitize_progress(q);
        if q <= EPILOGUE_THRESHOLD {
            return Self::rest();
        }
        let reveal = ((q - EPILOGUE_THRESHOLD) / (1.0 - EPILOGUE_THRESHOLD)).clamp(0.0, 1.0);
        let drift = -reveal * base_offset_px;
        Self {
            blurred: true,
            pinned_height_pct: (100.0 - reveal * 100.0).max(0.0),
            header_offset_px: drift * HEADER_RATE,
            content_offset_px: drift * CONTENT_RATE,
            footer_offset_px: drift * FOOTER_RATE,
        }
    }
}

impl Default for EpilogueFrame {
    fn default() -> Self {
        Self::rest()
    }
}

impl Slideshow {
    /// Re-target the stage for one epilogue sample. Runs regardless of the
    /// section locks.
    pub(crate) fn handle_epilogue_progress(&mut self, q: f32, effects: &mut Vec<Effect>) {
        let frame = EpilogueFrame::at(q, self.timings.epilogue_base_offset_px);
        trace!(q, height = frame.pinned_height_pct, blurred = frame.blurred, "Epilogue progress");
        self.epilogue = frame;

        effects.push(Effect::Set {
            targets: vec![Target::Chrome],
            props: Props::new().flag(Flag::Blurred, frame.blurred),
        });
        let smoothing = self.timings.epilogue_smoothing();
        let retarget = [
            (Target::PinnedContainer, Property::HeightPct, frame.pinned_height_pct),
            (Target::Header, Property::OffsetY, frame.header_offset_px),
            (Target::Content, Property::OffsetY, frame.content_offset_px),
            (Target::Footer, Property::OffsetY, frame.footer_offset_px),
        ];
        for (target, property, value) in retarget {
            effects.push(Effect::Animate(Tween::single(
                target,
                Props::new().with(property, value),
                smoothing,
                Ease::Power1Out,
            )));
        }
    }
}
