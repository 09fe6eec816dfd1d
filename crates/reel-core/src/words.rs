//! Heading word splitting for masked per-word reveals.

use std::collections::HashMap;

/// One animatable word of a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordUnit {
    pub index: usize,
    pub text: String,
}

/// Split heading text on whitespace runs, keeping word order.
pub fn split_words(text: &str) -> Vec<WordUnit> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| WordUnit {
            index,
            text: word.to_string(),
        })
        .collect()
}

/// Lazily split headings, cached per section until the view goes away.
#[derive(Debug, Default)]
pub struct WordCache {
    splits: HashMap<usize, Vec<WordUnit>>,
}

impl WordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words for `section`, splitting `heading` on first use.
    ///
    /// Returns `None` when there is no heading at all; an empty heading
    /// still yields an (empty) sequence.
    pub fn words_for(&mut self, section: usize, heading: Option<&str>) -> Option<&[WordUnit]> {
        if !self.splits.contains_key(&section) {
            let heading = heading?;
            self.splits.insert(section, split_words(heading.trim()));
        }
        self.splits.get(&section).map(Vec::as_slice)
    }

    /// Already split words, without splitting.
    pub fn cached(&self, section: usize) -> Option<&[WordUnit]> {
        self.splits.get(&section).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.splits.clear();
    }
}
