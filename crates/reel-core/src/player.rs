//! Drives a [`Slideshow`] and its collaborators from one clock.

use crate::cues::{CueDevice, CuePlayer};
use crate::effects::Effect;
use crate::scroll::{ObservedRegion, PageLayout, ProgressObserver, SmoothScroll};
use crate::sections::SectionDeck;
use crate::slideshow::{Signal, Slideshow};
use crate::timeline::Timeline;
use crate::timings::TransitionTimings;
use std::time::Duration;
use tracing::{debug, trace};

pub struct Player<D: CueDevice> {
    slideshow: Slideshow,
    timeline: Timeline,
    scroll: SmoothScroll,
    layout: PageLayout,
    pinned: ProgressObserver,
    epilogue: ProgressObserver,
    cues: CuePlayer<D>,
    label: String,
    fill: f32,
}

impl<D: CueDevice> Player<D> {
    pub fn new(deck: SectionDeck, timings: TransitionTimings, layout: PageLayout, device: D) -> Self {
        let (slideshow, effects) = Slideshow::mount(deck, layout.anchors(), timings);
        let label = slideshow.progress_label();
        let fill = slideshow.progress_fill();
        let mut player = Self {
            slideshow,
            timeline: Timeline::new(),
            scroll: SmoothScroll::new(layout.max_scroll()),
            layout,
            pinned: ProgressObserver::new(ObservedRegion::Pinned),
            epilogue: ProgressObserver::new(ObservedRegion::Epilogue),
            cues: CuePlayer::new(device),
            label,
            fill,
        };
        player.apply(effects);
        player.sample_observers();
        player
    }

    /// One cooperative step: scroll, then observers, then tracks, then cues.
    pub fn tick(&mut self, dt: Duration) {
        if !self.slideshow.is_mounted() {
            trace!("Dropped tick for an unmounted view");
            return;
        }
        for completion in self.scroll.advance(dt) {
            self.dispatch(Signal::Finished(completion));
        }
        self.sample_observers();
        for completion in self.timeline.advance(dt) {
            self.dispatch(Signal::Finished(completion));
        }
        self.cues.advance(dt);
    }

    pub fn wheel(&mut self, delta_px: f32) {
        if !self.scroll.wheel(delta_px) {
            trace!(delta_px, "Wheel input ignored");
        }
    }

    pub fn click(&mut self, index: usize) {
        self.dispatch(Signal::ItemClicked(index));
    }

    pub fn hover(&mut self, index: usize) {
        self.dispatch(Signal::ItemHovered(index));
    }

    /// Any pointer press; unlocks audio.
    pub fn press(&mut self) {
        self.dispatch(Signal::UserInteraction);
    }

    /// Relayout after the viewport changed height.
    pub fn resize(&mut self, viewport_height: f32) {
        self.layout.set_viewport_height(viewport_height);
        self.scroll.set_max(self.layout.max_scroll());
        self.slideshow.set_anchors(self.layout.anchors());
        debug!(
            viewport_height = self.layout.viewport_height(),
            max_scroll = self.layout.max_scroll(),
            "Layout updated"
        );
    }

    pub fn teardown(&mut self) {
        let effects = self.slideshow.teardown();
        self.apply(effects);
    }

    pub fn dispatch(&mut self, signal: Signal) {
        let effects = self.slideshow.reduce(signal);
        self.apply(effects);
    }

    pub fn slideshow(&self) -> &Slideshow {
        &self.slideshow
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn cues(&self) -> &CuePlayer<D> {
        &self.cues
    }

    pub fn progress_label(&self) -> &str {
        &self.label
    }

    pub fn progress_fill(&self) -> f32 {
        self.fill
    }

    fn sample_observers(&mut self) {
        let position = self.scroll.position();
        if let Some(progress) = self.pinned.observe(&self.layout, position) {
            self.dispatch(Signal::PinnedProgress(progress));
        }
        if let Some(progress) = self.epilogue.observe(&self.layout, position) {
            self.dispatch(Signal::EpilogueProgress(progress));
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Animate(tween) => self.timeline.animate(tween),
                Effect::Set { targets, props } => self.timeline.set(&targets, &props),
                Effect::PlayCue { cue, delay } => self.cues.play(cue, delay),
                Effect::EnableAudio => self.cues.enable(),
                Effect::ScrollTo(request) => self.scroll.scroll_to(request),
                Effect::ProgressDisplay { label, fill } => {
                    self.label = label;
                    self.fill = fill;
                }
                Effect::KillObservers => {
                    self.pinned.kill();
                    self.epilogue.kill();
                }
                Effect::ClearTimeline => self.timeline.clear(),
                Effect::DestroyScroll => self.scroll.destroy(),
                Effect::SilenceCues => self.cues.silence(),
            }
        }
    }
}
