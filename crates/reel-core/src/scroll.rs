//! Page geometry, eased scroll motion and the progress observers that turn
//! a scroll position into region progress.

use crate::ease::Ease;
use crate::effects::{Completion, ScrollRequest};
use crate::sections::Anchors;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Duration of the glide started by wheel input.
pub const WHEEL_GLIDE: Duration = Duration::from_millis(1200);

/// Region heights as percentages of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_pinned_height_pct")]
    pub pinned_height_pct: f32,
    #[serde(default = "default_epilogue_height_pct")]
    pub epilogue_height_pct: f32,
}

fn default_pinned_height_pct() -> f32 {
    1000.0
}

fn default_epilogue_height_pct() -> f32 {
    100.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pinned_height_pct: default_pinned_height_pct(),
            epilogue_height_pct: default_epilogue_height_pct(),
        }
    }
}

/// Vertical page geometry: the pinned region at the top, the epilogue
/// right after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    viewport_height: f32,
    config: LayoutConfig,
}

impl PageLayout {
    pub fn new(viewport_height: f32, config: LayoutConfig) -> Self {
        let config = LayoutConfig {
            pinned_height_pct: clamp_pct(config.pinned_height_pct, 100.0),
            epilogue_height_pct: clamp_pct(config.epilogue_height_pct, 0.0),
        };
        Self {
            viewport_height: clamp_viewport(viewport_height),
            config,
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = clamp_viewport(height);
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn pinned_top(&self) -> f32 {
        0.0
    }

    pub fn pinned_height(&self) -> f32 {
        self.viewport_height * self.config.pinned_height_pct / 100.0
    }

    pub fn epilogue_top(&self) -> f32 {
        self.pinned_top() + self.pinned_height()
    }

    pub fn epilogue_height(&self) -> f32 {
        self.viewport_height * self.config.epilogue_height_pct / 100.0
    }

    pub fn content_height(&self) -> f32 {
        self.epilogue_top() + self.epilogue_height()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// From "region top at viewport top" to "region bottom at viewport
    /// bottom".
    pub fn pinned_progress(&self, scroll: f32) -> f32 {
        let start = self.pinned_top();
        let end = self.pinned_top() + self.pinned_height() - self.viewport_height;
        span_progress(scroll, start, end)
    }

    /// From "region top at viewport centre" to "region bottom at viewport
    /// bottom".
    pub fn epilogue_progress(&self, scroll: f32) -> f32 {
        let start = self.epilogue_top() - self.viewport_height / 2.0;
        let end = self.epilogue_top() + self.epilogue_height() - self.viewport_height;
        span_progress(scroll, start, end)
    }

    pub fn anchors(&self) -> Anchors {
        Anchors::for_pinned_region(self.pinned_top(), self.pinned_height())
    }
}

fn clamp_pct(pct: f32, min: f32) -> f32 {
    if pct.is_finite() { pct.max(min) } else { min }
}

fn clamp_viewport(height: f32) -> f32 {
    if height.is_finite() { height.max(1.0) } else { 1.0 }
}

fn span_progress(scroll: f32, start: f32, end: f32) -> f32 {
    if !scroll.is_finite() {
        return 0.0;
    }
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedRegion {
    Pinned,
    Epilogue,
}

/// Reports a region's progress whenever it changes.
#[derive(Debug, Clone)]
pub struct ProgressObserver {
    region: ObservedRegion,
    last: Option<f32>,
    killed: bool,
}

impl ProgressObserver {
    pub fn new(region: ObservedRegion) -> Self {
        Self {
            region,
            last: None,
            killed: false,
        }
    }

    /// Progress at `scroll`, or `None` if unchanged since the last report.
    pub fn observe(&mut self, layout: &PageLayout, scroll: f32) -> Option<f32> {
        if self.killed {
            return None;
        }
        let progress = match self.region {
            ObservedRegion::Pinned => layout.pinned_progress(scroll),
            ObservedRegion::Epilogue => layout.epilogue_progress(scroll),
        };
        if self.last == Some(progress) {
            return None;
        }
        self.last = Some(progress);
        Some(progress)
    }

    pub fn kill(&mut self) {
        self.killed = true;
    }
}

#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    ease: Ease,
    lock: bool,
    on_complete: Option<Completion>,
}

impl Glide {
    fn sample(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}

/// Eased scroll position. Wheel input retargets a glide; programmatic
/// moves may lock out the wheel until they finish.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f32,
    max: f32,
    now: Duration,
    glide: Option<Glide>,
    finished: Vec<Completion>,
    destroyed: bool,
}

impl SmoothScroll {
    pub fn new(max: f32) -> Self {
        Self {
            position: 0.0,
            max: max.max(0.0),
            now: Duration::ZERO,
            glide: None,
            finished: Vec::new(),
            destroyed: false,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Where the current glide is heading, or the position when idle.
    pub fn target(&self) -> f32 {
        self.glide.map_or(self.position, |glide| glide.to)
    }

    pub fn is_moving(&self) -> bool {
        self.glide.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.glide.is_some_and(|glide| glide.lock)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn set_max(&mut self, max: f32) {
        self.max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        self.position = self.position.clamp(0.0, self.max);
        if let Some(glide) = self.glide.as_mut() {
            glide.to = glide.to.clamp(0.0, self.max);
        }
    }

    /// Feed wheel movement in pixels. Returns whether it was accepted.
    pub fn wheel(&mut self, delta_px: f32) -> bool {
        if self.destroyed || self.is_locked() || !delta_px.is_finite() || delta_px == 0.0 {
            return false;
        }
        let to = (self.target() + delta_px).clamp(0.0, self.max);
        self.start_glide(to, WHEEL_GLIDE, Ease::ExpoOut, false, None);
        true
    }

    pub fn scroll_to(&mut self, request: ScrollRequest) {
        if self.destroyed {
            return;
        }
        let to = if request.position.is_finite() {
            request.position.clamp(0.0, self.max)
        } else {
            self.position
        };
        debug!(
            from = self.position,
            to,
            duration_ms = request.duration.as_millis() as u64,
            lock = request.lock,
            "Scroll glide requested"
        );
        self.start_glide(to, request.duration, request.ease, request.lock, Some(request.on_complete));
    }

    /// Advance the glide; returns completions of programmatic moves that
    /// finished or were interrupted.
    pub fn advance(&mut self, dt: Duration) -> Vec<Completion> {
        if self.destroyed {
            return Vec::new();
        }
        self.now += dt;
        if let Some(glide) = self.glide {
            self.position = glide.sample(self.now).clamp(0.0, self.max);
            if glide.is_done(self.now) {
                self.position = glide.to;
                self.glide = None;
                if let Some(completion) = glide.on_complete {
                    trace!(position = self.position, "Scroll glide settled");
                    self.finished.push(completion);
                }
            }
        }
        std::mem::take(&mut self.finished)
    }

    /// Stop all motion and ignore further input.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.glide = None;
        self.finished.clear();
    }

    fn start_glide(
        &mut self,
        to: f32,
        duration: Duration,
        ease: Ease,
        lock: bool,
        on_complete: Option<Completion>,
    ) {
        // An interrupted programmatic move still reports back.
        if let Some(previous) = self.glide.take().and_then(|glide| glide.on_complete) {
            self.finished.push(previous);
        }
        self.glide = Some(Glide {
            from: self.position,
            to,
            start: self.now,
            duration,
            ease,
            lock,
            on_complete,
        });
    }
}
