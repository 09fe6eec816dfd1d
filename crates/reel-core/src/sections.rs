//! The fixed deck of ten sections and the scroll anchors derived from layout.

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of sections in a deck. Fixed for the lifetime of a view.
pub const SECTION_COUNT: usize = 10;
/// Highest valid section index.
pub const LAST_SECTION: usize = SECTION_COUNT - 1;

/// One static section record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text; a section without one has nothing to animate.
    #[serde(default)]
    pub heading: Option<String>,
    pub background: String,
    pub left_label: String,
    pub right_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionDeck {
    sections: Vec<Section>,
}

static DEFAULT_SECTIONS: Lazy<Vec<Section>> = Lazy::new(|| {
    const HEADINGS: [&str; SECTION_COUNT] = [
        "Creative Elements",
        "Inner Stillness",
        "Deep Knowing",
        "True Expression",
        "Now Moment",
        "Deep Attention",
        "Open Exploration",
        "Calm Waiting",
        "Let Go Control",
        "Pure Essence",
    ];
    const LEFT: [&str; SECTION_COUNT] = [
        "Silence",
        "Meditation",
        "Intuition",
        "Authenticity",
        "Presence",
        "Listening",
        "Curiosity",
        "Patience",
        "Surrender",
        "Simplicity",
    ];
    const RIGHT: [&str; SECTION_COUNT] = [
        "Reduction",
        "Essence",
        "Space",
        "Resonance",
        "Truth",
        "Feeling",
        "Clarity",
        "Emptiness",
        "Awareness",
        "Minimalism",
    ];

    (0..SECTION_COUNT)
        .map(|i| Section {
            heading: Some(HEADINGS[i].to_string()),
            background: format!("flame-glow-blur-{:03}.jpg", i + 1),
            left_label: LEFT[i].to_string(),
            right_label: RIGHT[i].to_string(),
        })
        .collect()
});

impl Default for SectionDeck {
    fn default() -> Self {
        SectionDeck {
            sections: DEFAULT_SECTIONS.clone(),
        }
    }
}

impl SectionDeck {
    /// Build a deck from exactly [`SECTION_COUNT`] records.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.len() != SECTION_COUNT {
            bail!(
                "a deck needs exactly {SECTION_COUNT} sections, got {}",
                sections.len()
            );
        }
        Ok(SectionDeck { sections })
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn heading(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|section| section.heading.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Scroll offsets of each section, monotonically increasing with index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors([f32; SECTION_COUNT]);

impl Anchors {
    /// Evenly divide the pinned region into one slot per section.
    pub fn for_pinned_region(pinned_top: f32, pinned_height: f32) -> Self {
        let top = if pinned_top.is_finite() { pinned_top } else { 0.0 };
        let height = if pinned_height.is_finite() {
            pinned_height.max(0.0)
        } else {
            0.0
        };
        let mut offsets = [0.0; SECTION_COUNT];
        for (i, slot) in offsets.iter_mut().enumerate() {
            *slot = top + height * i as f32 / SECTION_COUNT as f32;
        }
        Anchors(offsets)
    }

    pub fn offset(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_has_every_section() {
        let deck = SectionDeck::default();
        assert_eq!(deck.len(), SECTION_COUNT);
        assert_eq!(deck.heading(0), Some("Creative Elements"));
        assert_eq!(deck.heading(LAST_SECTION), Some("Pure Essence"));
        assert_eq!(
            deck.get(9).map(|s| s.background.as_str()),
            Some("flame-glow-blur-010.jpg")
        );
    }

    #[test]
    fn rejects_short_decks() {
        let mut sections = SectionDeck::default().iter().cloned().collect::<Vec<_>>();
        sections.pop();
        assert!(SectionDeck::new(sections).is_err());
    }

    #[test]
    fn anchors_are_monotonic() {
        let anchors = Anchors::for_pinned_region(120.0, 8000.0);
        assert_eq!(anchors.offset(0), Some(120.0));
        assert_eq!(anchors.offset(5), Some(4120.0));
        let mut previous = f32::MIN;
        for i in 0..SECTION_COUNT {
            let offset = anchors.offset(i).expect("anchor");
            assert!(offset > previous, "anchor {i} should increase");
            previous = offset;
        }
        assert_eq!(anchors.offset(SECTION_COUNT), None);
    }
}
