//! Work requested by the slideshow from its collaborators.

use crate::cues::Cue;
use crate::ease::Ease;
use std::time::Duration;

/// Something on stage whose visual properties can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Word { section: usize, word: usize },
    Featured(usize),
    Background(usize),
    LeftItem(usize),
    RightItem(usize),
    PinnedContainer,
    Header,
    Content,
    Footer,
    /// Chrome that blurs while the epilogue is revealed.
    Chrome,
}

/// Continuous properties a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    /// Vertical offset as a percentage of the target's own height.
    YPercent,
    /// Vertical offset in pixels.
    OffsetY,
    /// Clip inset from the top, percent.
    ClipTop,
    /// Clip inset from the bottom, percent.
    ClipBottom,
    /// Height as a percentage of the viewport.
    HeightPct,
}

impl Property {
    /// Value a target has before anything touched it.
    pub fn rest_value(self) -> f32 {
        match self {
            Property::Opacity => 1.0,
            Property::HeightPct => 100.0,
            Property::YPercent | Property::OffsetY | Property::ClipTop | Property::ClipBottom => {
                0.0
            }
        }
    }
}

/// Discrete on/off state, applied instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Visible,
    Blurred,
}

impl Flag {
    pub fn rest_value(self) -> bool {
        match self {
            Flag::Visible => true,
            Flag::Blurred => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    pub values: Vec<(Property, f32)>,
    pub flags: Vec<(Flag, bool)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.values.retain(|(p, _)| *p != property);
        self.values.push((property, value));
        self
    }

    pub fn flag(mut self, flag: Flag, on: bool) -> Self {
        self.flags.retain(|(f, _)| *f != flag);
        self.flags.push((flag, on));
        self
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn y_percent(self, value: f32) -> Self {
        self.with(Property::YPercent, value)
    }

    pub fn visible(self, on: bool) -> Self {
        self.flag(Flag::Visible, on)
    }

    pub fn value(&self, property: Property) -> Option<f32> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn flag_value(&self, flag: Flag) -> Option<bool> {
        self.flags.iter().find(|(f, _)| *f == flag).map(|(_, v)| *v)
    }
}

/// Start offset between consecutive targets of one tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stagger {
    #[default]
    None,
    /// First target starts first.
    Forward(Duration),
    /// Last target starts first.
    Reverse(Duration),
}

impl Stagger {
    /// Forward when travelling down, reverse when travelling up.
    pub fn along(is_down: bool, each: Duration) -> Self {
        if is_down {
            Stagger::Forward(each)
        } else {
            Stagger::Reverse(each)
        }
    }

    pub fn offset(self, index: usize, count: usize) -> Duration {
        match self {
            Stagger::None => Duration::ZERO,
            Stagger::Forward(each) => each * index as u32,
            Stagger::Reverse(each) => each * count.saturating_sub(index + 1) as u32,
        }
    }

    pub fn span(self, count: usize) -> Duration {
        match self {
            Stagger::None => Duration::ZERO,
            Stagger::Forward(each) | Stagger::Reverse(each) => {
                each * count.saturating_sub(1) as u32
            }
        }
    }
}

/// Continuation the slideshow wants back once a track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    /// Outgoing words of `section` are gone; hide its content.
    OutgoingWordsHidden { section: usize, ticket: u64 },
    /// The previous background finished fading; this releases the
    /// transition lock.
    PreviousBackgroundFaded { section: usize, ticket: u64 },
    /// A physical scroll toward an anchor settled; this releases the snap
    /// lock.
    SnapSettled { ticket: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub targets: Vec<Target>,
    pub to: Props,
    pub duration: Duration,
    pub delay: Duration,
    pub ease: Ease,
    pub stagger: Stagger,
    pub on_complete: Option<Completion>,
}

impl Tween {
    pub fn new(targets: Vec<Target>, to: Props, duration: Duration, ease: Ease) -> Self {
        Self {
            targets,
            to,
            duration,
            delay: Duration::ZERO,
            ease,
            stagger: Stagger::None,
            on_complete: None,
        }
    }

    pub fn single(target: Target, to: Props, duration: Duration, ease: Ease) -> Self {
        Self::new(vec![target], to, duration, ease)
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn on_complete(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }

    /// Time from issue until the last target settles.
    pub fn total_time(&self) -> Duration {
        self.delay + self.stagger.span(self.targets.len()) + self.duration
    }
}

/// A physical scroll-position move toward `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub position: f32,
    pub duration: Duration,
    pub ease: Ease,
    /// Ignore user scroll input until the move settles.
    pub lock: bool,
    pub on_complete: Completion,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Animate(Tween),
    Set { targets: Vec<Target>, props: Props },
    PlayCue { cue: Cue, delay: Duration },
    EnableAudio,
    ScrollTo(ScrollRequest),
    /// Section counter label (`"01"`..) and fill fraction in `[0, 1]`.
    ProgressDisplay { label: String, fill: f32 },
    KillObservers,
    ClearTimeline,
    DestroyScroll,
    SilenceCues,
}
