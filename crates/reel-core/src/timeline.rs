//! A small deterministic animation timeline.
//!
//! Tweens fan out into one track per (target, property). Tracks capture
//! their start value when they actually begin, so a delayed tween picks up
//! whatever an earlier tween left behind. A newer track on the same
//! (target, property) replaces the older one, and a tween that lost any of
//! its tracks that way never reports completion.

use crate::effects::{Completion, Flag, Property, Props, Target, Tween};
use crate::ease::Ease;
use std::collections::HashMap;
use std::time::Duration;
use tracing::trace;

#[derive(Debug)]
struct Track {
    target: Target,
    property: Property,
    from: Option<f32>,
    to: f32,
    start: Duration,
    duration: Duration,
    ease: Ease,
    group: Option<u64>,
}

#[derive(Debug)]
struct Group {
    remaining: usize,
    completion: Completion,
}

#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    tracks: Vec<Track>,
    groups: HashMap<u64, Group>,
    next_group: u64,
    ready: Vec<Completion>,
    values: HashMap<(Target, Property), f32>,
    flags: HashMap<(Target, Flag), bool>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animate(&mut self, tween: Tween) {
        let count = tween.targets.len();
        let group = tween.on_complete.map(|completion| {
            let id = self.next_group;
            self.next_group += 1;
            self.groups.insert(
                id,
                Group {
                    remaining: 0,
                    completion,
                },
            );
            id
        });

        // Flags in a tween flip when that target's track starts; there is no
        // sensible midpoint for them, so they apply immediately.
        for target in &tween.targets {
            for (flag, on) in &tween.to.flags {
                self.flags.insert((*target, *flag), *on);
            }
        }

        for (index, target) in tween.targets.iter().enumerate() {
            let start = self.now + tween.delay + tween.stagger.offset(index, count);
            for (property, to) in &tween.to.values {
                self.drop_tracks_on(*target, *property);
                if let Some(id) = group {
                    if let Some(entry) = self.groups.get_mut(&id) {
                        entry.remaining += 1;
                    }
                }
                self.tracks.push(Track {
                    target: *target,
                    property: *property,
                    from: None,
                    to: *to,
                    start,
                    duration: tween.duration,
                    ease: tween.ease,
                    group,
                });
            }
        }

        if let Some(id) = group {
            if self.groups.get(&id).is_some_and(|g| g.remaining == 0) {
                if let Some(entry) = self.groups.remove(&id) {
                    self.ready.push(entry.completion);
                }
            }
        }
    }

    /// Apply `props` instantly, replacing any track on the same properties.
    pub fn set(&mut self, targets: &[Target], props: &Props) {
        for target in targets {
            for (property, value) in &props.values {
                self.drop_tracks_on(*target, *property);
                self.values.insert((*target, *property), *value);
            }
            for (flag, on) in &props.flags {
                self.flags.insert((*target, *flag), *on);
            }
        }
    }

    /// Move time forward; returns completions in the order they happened.
    pub fn advance(&mut self, dt: Duration) -> Vec<Completion> {
        self.now += dt;
        let now = self.now;
        let mut completions = std::mem::take(&mut self.ready);
        let mut finished_groups: Vec<(Duration, u64)> = Vec::new();

        let mut index = 0;
        while index < self.tracks.len() {
            let track = &mut self.tracks[index];
            if now < track.start {
                index += 1;
                continue;
            }
            let key = (track.target, track.property);
            let from = *track.from.get_or_insert_with(|| {
                self.values
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| key.1.rest_value())
            });
            let elapsed = now - track.start;
            let t = if track.duration.is_zero() {
                1.0
            } else {
                elapsed.as_secs_f32() / track.duration.as_secs_f32()
            };
            let done = t >= 1.0;
            let value = if done {
                track.to
            } else {
                from + (track.to - from) * track.ease.apply(t)
            };
            self.values.insert(key, value);

            if done {
                let finished = self.tracks.swap_remove(index);
                if let Some(id) = finished.group {
                    if let Some(group) = self.groups.get_mut(&id) {
                        group.remaining = group.remaining.saturating_sub(1);
                        if group.remaining == 0 {
                            finished_groups.push((finished.start + finished.duration, id));
                        }
                    }
                }
            } else {
                index += 1;
            }
        }

        finished_groups.sort_by_key(|(end, id)| (*end, *id));
        for (_, id) in finished_groups {
            if let Some(group) = self.groups.remove(&id) {
                trace!(completion = ?group.completion, "Tween completed");
                completions.push(group.completion);
            }
        }
        completions
    }

    /// Drop every track and every pending completion.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.groups.clear();
        self.ready.clear();
    }

    pub fn value(&self, target: Target, property: Property) -> f32 {
        self.values
            .get(&(target, property))
            .copied()
            .unwrap_or_else(|| property.rest_value())
    }

    pub fn flag(&self, target: Target, flag: Flag) -> bool {
        self.flags
            .get(&(target, flag))
            .copied()
            .unwrap_or_else(|| flag.rest_value())
    }

    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty() && self.ready.is_empty()
    }

    fn drop_tracks_on(&mut self, target: Target, property: Property) {
        let groups = &mut self.groups;
        self.tracks.retain(|track| {
            let replaced = track.target == target && track.property == property;
            if replaced {
                if let Some(id) = track.group {
                    groups.remove(&id);
                }
            }
            !replaced
        });
    }
}
