//! Scroll-driven ten-section slideshow: the transition state machine and
//! the clock-driven collaborators it talks to.

pub mod cues;
pub mod ease;
pub mod effects;
mod engine;
pub mod epilogue;
pub mod lifetime;
mod navigation;
pub mod player;
pub mod progress;
pub mod scroll;
pub mod sections;
pub mod slideshow;
pub mod timeline;
pub mod timings;
pub mod words;

pub use cues::{Cue, CueDevice, CuePlayer, CueSpec, SoundBank};
pub use ease::Ease;
pub use effects::{Completion, Effect, Flag, Property, Props, Target, Tween};
pub use epilogue::EpilogueFrame;
pub use player::Player;
pub use scroll::{LayoutConfig, PageLayout, SmoothScroll};
pub use sections::{Anchors, SECTION_COUNT, Section, SectionDeck};
pub use slideshow::{Signal, Slideshow};
pub use timeline::Timeline;
pub use timings::TransitionTimings;
