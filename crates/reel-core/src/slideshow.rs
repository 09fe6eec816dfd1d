//! The slideshow context: section state, locks and the signal reducer.
//!
//! One `Slideshow` exists per mounted view. It never performs side effects
//! itself; every handler appends [`Effect`]s that the caller applies to its
//! collaborators, and collaborators report back through
//! [`Signal::Finished`].

use crate::cues::Cue;
use crate::effects::{Completion, Effect, Flag, Property, Props, Target};
use crate::epilogue::EpilogueFrame;
use crate::lifetime::ViewLifetime;
use crate::progress::{ProgressMapper, ScrollDirection};
use crate::sections::{Anchors, LAST_SECTION, SECTION_COUNT, SectionDeck};
use crate::timings::TransitionTimings;
use crate::words::{WordCache, WordUnit};
use std::time::Duration;
use tracing::{debug, info};

/// Inputs the slideshow reacts to, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    PinnedProgress(f32),
    EpilogueProgress(f32),
    ItemClicked(usize),
    ItemHovered(usize),
    UserInteraction,
    Finished(Completion),
}

/// Track-level lock: held from the start of a section change until the
/// previous background has faded out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionLock {
    #[default]
    Idle,
    Transitioning { ticket: u64, from: usize, to: usize },
}

/// Navigation-level lock: held while a physical scroll toward an anchor
/// is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapLock {
    #[default]
    Free,
    Snapping { ticket: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct TransitionState {
    pub(crate) current: usize,
    pub(crate) lock: TransitionLock,
    pub(crate) snap: SnapLock,
    next_ticket: u64,
}

impl TransitionState {
    pub fn current_section(&self) -> usize {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.lock, TransitionLock::Transitioning { .. })
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.snap, SnapLock::Snapping { .. })
    }

    pub fn lock(&self) -> TransitionLock {
        self.lock
    }

    pub(crate) fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundRole {
    #[default]
    Hidden,
    Active,
    Previous,
}

pub struct Slideshow {
    pub(crate) deck: SectionDeck,
    pub(crate) anchors: Anchors,
    pub(crate) words: WordCache,
    pub(crate) state: TransitionState,
    pub(crate) backgrounds: [BackgroundRole; SECTION_COUNT],
    pub(crate) featured: [bool; SECTION_COUNT],
    pub(crate) mapper: ProgressMapper,
    pub(crate) epilogue: EpilogueFrame,
    pub(crate) timings: TransitionTimings,
    lifetime: ViewLifetime,
}

impl Slideshow {
    /// Build the view with section 0 showing, plus the effects that put the
    /// stage into that state.
    pub fn mount(
        deck: SectionDeck,
        anchors: Anchors,
        timings: TransitionTimings,
    ) -> (Self, Vec<Effect>) {
        let mut slideshow = Slideshow {
            deck,
            anchors,
            words: WordCache::new(),
            state: TransitionState::default(),
            backgrounds: [BackgroundRole::Hidden; SECTION_COUNT],
            featured: [false; SECTION_COUNT],
            mapper: ProgressMapper::new(),
            epilogue: EpilogueFrame::rest(),
            timings: timings.sanitized(),
            lifetime: ViewLifetime::new(),
        };
        slideshow.backgrounds[0] = BackgroundRole::Active;
        slideshow.featured[0] = true;

        let mut effects = Vec::new();
        let dim = slideshow.timings.list_dim_opacity;
        for section in 0..SECTION_COUNT {
            let showing = section == 0;
            let targets = slideshow.word_targets(section);
            if !targets.is_empty() {
                effects.push(Effect::Set {
                    targets,
                    props: Props::new()
                        .y_percent(if showing { 0.0 } else { 100.0 })
                        .opacity(if showing { 1.0 } else { 0.0 }),
                });
            }
            effects.push(Effect::Set {
                targets: vec![Target::Featured(section)],
                props: Props::new()
                    .visible(showing)
                    .opacity(if showing { 1.0 } else { 0.0 }),
            });
            effects.push(Effect::Set {
                targets: vec![Target::Background(section)],
                props: Props::new()
                    .opacity(if showing { 1.0 } else { 0.0 })
                    .y_percent(0.0)
                    .with(Property::ClipTop, 0.0)
                    .with(Property::ClipBottom, 0.0),
            });
            effects.push(Effect::Set {
                targets: vec![Target::LeftItem(section), Target::RightItem(section)],
                props: Props::new().opacity(if showing { 1.0 } else { dim }),
            });
        }
        effects.push(Effect::Set {
            targets: vec![Target::PinnedContainer],
            props: Props::new().with(Property::HeightPct, 100.0),
        });
        effects.push(Effect::Set {
            targets: vec![Target::Chrome],
            props: Props::new().flag(Flag::Blurred, false),
        });
        slideshow.push_progress_display(&mut effects);

        info!(sections = slideshow.deck.len(), "Slideshow mounted");
        (slideshow, effects)
    }

    pub fn reduce(&mut self, signal: Signal) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.lifetime.is_mounted() {
            return effects;
        }

        match signal {
            Signal::PinnedProgress(progress) => {
                self.handle_pinned_progress(progress, &mut effects);
            }
            Signal::EpilogueProgress(progress) => {
                self.handle_epilogue_progress(progress, &mut effects);
            }
            Signal::ItemClicked(index) => self.navigate_to(index, &mut effects),
            Signal::ItemHovered(_) => {
                effects.push(Effect::EnableAudio);
                effects.push(Effect::PlayCue {
                    cue: Cue::Hover,
                    delay: Duration::ZERO,
                });
            }
            Signal::UserInteraction => effects.push(Effect::EnableAudio),
            Signal::Finished(completion) => self.handle_completion(completion, &mut effects),
        }

        effects
    }

    /// Unmount. Later signals and late completions are ignored.
    pub fn teardown(&mut self) -> Vec<Effect> {
        if !self.lifetime.is_mounted() {
            return Vec::new();
        }
        self.lifetime.tear_down();
        self.words.clear();
        debug!(section = self.state.current, "Slideshow torn down");
        vec![
            Effect::KillObservers,
            Effect::ClearTimeline,
            Effect::DestroyScroll,
            Effect::SilenceCues,
        ]
    }

    pub fn is_mounted(&self) -> bool {
        self.lifetime.is_mounted()
    }

    /// Replace anchors after the layout changed.
    pub fn set_anchors(&mut self, anchors: Anchors) {
        self.anchors = anchors;
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn current_section(&self) -> usize {
        self.state.current
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn is_snapping(&self) -> bool {
        self.state.is_snapping()
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.mapper.direction()
    }

    pub fn background_role(&self, section: usize) -> BackgroundRole {
        self.backgrounds
            .get(section)
            .copied()
            .unwrap_or(BackgroundRole::Hidden)
    }

    /// Background indices bottom to top: hidden, then previous, then the
    /// active section, which owns the wipe and must paint last.
    pub fn paint_order(&self) -> [usize; SECTION_COUNT] {
        let mut order: [usize; SECTION_COUNT] = std::array::from_fn(|index| index);
        order.sort_by_key(|&index| match self.background_role(index) {
            BackgroundRole::Hidden => 0,
            BackgroundRole::Previous => 1,
            BackgroundRole::Active => 2,
        });
        order
    }

    pub fn is_featured_visible(&self, section: usize) -> bool {
        self.featured.get(section).copied().unwrap_or(false)
    }

    pub fn words(&self, section: usize) -> Option<&[WordUnit]> {
        self.words.cached(section)
    }

    pub fn deck(&self) -> &SectionDeck {
        &self.deck
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    pub fn epilogue(&self) -> EpilogueFrame {
        self.epilogue
    }

    /// Two-digit, one-based section counter.
    pub fn progress_label(&self) -> String {
        format!("{:02}", self.state.current + 1)
    }

    pub fn progress_fill(&self) -> f32 {
        self.state.current as f32 / LAST_SECTION as f32
    }

    pub(crate) fn push_progress_display(&self, effects: &mut Vec<Effect>) {
        effects.push(Effect::ProgressDisplay {
            label: self.progress_label(),
            fill: self.progress_fill(),
        });
    }

    /// Word targets of `section`, splitting its heading on first use.
    pub(crate) fn word_targets(&mut self, section: usize) -> Vec<Target> {
        let heading = self.deck.heading(section);
        match self.words.words_for(section, heading) {
            Some(words) => words
                .iter()
                .map(|word| Target::Word {
                    section,
                    word: word.index,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn has_words(&mut self, section: usize) -> bool {
        let heading = self.deck.heading(section);
        self.words.words_for(section, heading).is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn mounted() -> (Slideshow, Vec<Effect>) {
        Slideshow::mount(
            SectionDeck::default(),
            Anchors::for_pinned_region(0.0, 10_000.0),
            TransitionTimings::default(),
        )
    }

    #[test]
    fn mount_shows_only_the_first_section() {
        let (slideshow, effects) = mounted();
        assert_eq!(slideshow.current_section(), 0);
        assert!(!slideshow.is_animating());
        assert!(!slideshow.is_snapping());
        assert_eq!(slideshow.background_role(0), BackgroundRole::Active);
        assert!((1..SECTION_COUNT).all(|i| slideshow.background_role(i) == BackgroundRole::Hidden));
        assert!(slideshow.is_featured_visible(0));
        assert!(!slideshow.is_featured_visible(1));
        assert_eq!(slideshow.words(0).map(<[WordUnit]>::len), Some(2));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::ProgressDisplay { label, fill } if label == "01" && *fill == 0.0
        )));
        let hidden_words = effects.iter().any(|effect| match effect {
            Effect::Set { targets, props } => {
                targets.contains(&Target::Word { section: 4, word: 0 })
                    && props.value(Property::YPercent) == Some(100.0)
                    && props.value(Property::Opacity) == Some(0.0)
            }
            _ => false,
        });
        assert!(hidden_words, "words of later sections start off-screen");
    }

    #[test]
    fn hover_enables_audio_and_plays_hover_cue() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.reduce(Signal::ItemHovered(3));
        assert_eq!(effects[0], Effect::EnableAudio);
        assert_eq!(
            effects[1],
            Effect::PlayCue {
                cue: Cue::Hover,
                delay: Duration::ZERO
            }
        );
        assert_eq!(slideshow.current_section(), 0);
    }

    #[test]
    fn teardown_silences_everything_afterwards() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.teardown();
        assert!(effects.contains(&Effect::ClearTimeline));
        assert!(effects.contains(&Effect::DestroyScroll));
        assert!(effects.contains(&Effect::KillObservers));
        assert!(slideshow.teardown().is_empty(), "teardown runs once");
        assert!(slideshow.reduce(Signal::ItemClicked(4)).is_empty());
        assert!(slideshow.reduce(Signal::PinnedProgress(0.9)).is_empty());
        assert_eq!(slideshow.current_section(), 0);
    }

    #[test]
    fn progress_label_is_one_based() {
        let (mut slideshow, _) = mounted();
        slideshow.state.current = 9;
        assert_eq!(slideshow.progress_label(), "10");
        assert_eq!(slideshow.progress_fill(), 1.0);
    }
}
