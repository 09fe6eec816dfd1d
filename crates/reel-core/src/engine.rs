//! Section transitions: one in-flight change at a time, committed
//! optimistically, released by the previous background's fade-out.

use crate::cues::Cue;
use crate::ease::Ease;
use crate::effects::{Completion, Effect, Property, Props, Stagger, Target, Tween};
use crate::sections::SECTION_COUNT;
use crate::slideshow::{BackgroundRole, SnapLock, Slideshow, TransitionLock};
use tracing::{debug, trace};

impl Slideshow {
    /// Start the transition to `new_section`.
    ///
    /// Silently dropped when `new_section` is already current, out of range,
    /// or another transition still holds the lock.
    pub fn change_section(&mut self, new_section: usize, effects: &mut Vec<Effect>) {
        if !self.is_mounted() {
            return;
        }
        if new_section >= SECTION_COUNT
            || new_section == self.state.current
            || self.state.is_animating()
        {
            trace!(
                new_section,
                current = self.state.current,
                animating = self.state.is_animating(),
                "Section change dropped"
            );
            return;
        }

        let prev = self.state.current;
        let is_down = new_section > prev;
        let ticket = self.state.issue_ticket();
        self.state.lock = TransitionLock::Transitioning {
            ticket,
            from: prev,
            to: new_section,
        };
        self.state.current = new_section;
        self.push_progress_display(effects);
        debug!(
            from = prev,
            to = new_section,
            direction = if is_down { "down" } else { "up" },
            ticket,
            "Changing section"
        );

        self.outgoing_content(prev, new_section, is_down, ticket, effects);
        self.incoming_content(new_section, is_down, effects);
        self.swap_backgrounds(prev, new_section, is_down, ticket, effects);
        self.highlight_items(new_section, effects);
    }

    pub(crate) fn handle_completion(&mut self, completion: Completion, effects: &mut Vec<Effect>) {
        match completion {
            Completion::OutgoingWordsHidden { section, .. } => {
                if section == self.state.current {
                    trace!(section, "Outgoing section is current again; keeping it");
                    return;
                }
                if let Some(shown) = self.featured.get_mut(section) {
                    *shown = false;
                }
                effects.push(Effect::Set {
                    targets: vec![Target::Featured(section)],
                    props: Props::new().visible(false),
                });
            }
            Completion::PreviousBackgroundFaded { section, ticket } => {
                if self.background_role(section) == BackgroundRole::Previous {
                    self.backgrounds[section] = BackgroundRole::Hidden;
                    effects.push(Effect::Set {
                        targets: vec![Target::Background(section)],
                        props: Props::new().y_percent(0.0),
                    });
                }
                match self.state.lock {
                    TransitionLock::Transitioning { ticket: held, .. } if held == ticket => {
                        self.state.lock = TransitionLock::Idle;
                        debug!(section = self.state.current, ticket, "Transition lock released");
                    }
                    _ => trace!(ticket, "Stale background completion ignored"),
                }
            }
            Completion::SnapSettled { ticket } => match self.state.snap {
                SnapLock::Snapping { ticket: held } if held == ticket => {
                    self.state.snap = SnapLock::Free;
                    debug!(section = self.state.current, ticket, "Snap settled");
                }
                _ => trace!(ticket, "Stale snap completion ignored"),
            },
        }
    }

    fn outgoing_content(
        &mut self,
        prev: usize,
        new_section: usize,
        is_down: bool,
        ticket: u64,
        effects: &mut Vec<Effect>,
    ) {
        // Anything left over from an interrupted transition goes away now.
        for section in 0..SECTION_COUNT {
            if section != prev && section != new_section {
                self.featured[section] = false;
                effects.push(Effect::Set {
                    targets: vec![Target::Featured(section)],
                    props: Props::new().visible(false).opacity(0.0),
                });
            }
        }

        if self.has_words(prev) {
            let targets = self.word_targets(prev);
            let timings = self.timings;
            effects.push(Effect::Animate(
                Tween::new(
                    targets,
                    Props::new()
                        .y_percent(if is_down { -100.0 } else { 100.0 })
                        .opacity(0.0),
                    timings.of_base(timings.outgoing_fraction),
                    Ease::Custom,
                )
                .stagger(Stagger::along(is_down, timings.word_stagger_out()))
                .on_complete(Completion::OutgoingWordsHidden {
                    section: prev,
                    ticket,
                }),
            ));
        } else {
            self.featured[prev] = false;
            effects.push(Effect::Set {
                targets: vec![Target::Featured(prev)],
                props: Props::new().visible(false),
            });
        }
    }

    fn incoming_content(&mut self, new_section: usize, is_down: bool, effects: &mut Vec<Effect>) {
        if !self.has_words(new_section) {
            return;
        }
        let timings = self.timings;
        effects.push(Effect::PlayCue {
            cue: Cue::TextChange,
            delay: timings.text_cue_delay(),
        });
        self.featured[new_section] = true;
        effects.push(Effect::Set {
            targets: vec![Target::Featured(new_section)],
            props: Props::new().visible(true).opacity(1.0),
        });
        let targets = self.word_targets(new_section);
        effects.push(Effect::Set {
            targets: targets.clone(),
            props: Props::new()
                .y_percent(if is_down { 100.0 } else { -100.0 })
                .opacity(0.0),
        });
        effects.push(Effect::Animate(
            Tween::new(
                targets,
                Props::new().y_percent(0.0).opacity(1.0),
                timings.base(),
                Ease::Custom,
            )
            .stagger(Stagger::along(is_down, timings.word_stagger_in())),
        ));
    }

    fn swap_backgrounds(
        &mut self,
        prev: usize,
        new_section: usize,
        is_down: bool,
        ticket: u64,
        effects: &mut Vec<Effect>,
    ) {
        let timings = self.timings;
        // Downward travel wipes in from the bottom edge, upward from the top.
        let clip = if is_down {
            Property::ClipTop
        } else {
            Property::ClipBottom
        };

        for section in 0..SECTION_COUNT {
            let target = Target::Background(section);
            if section == new_section {
                self.backgrounds[section] = BackgroundRole::Active;
                effects.push(Effect::Set {
                    targets: vec![target],
                    props: Props::new()
                        .opacity(1.0)
                        .y_percent(0.0)
                        .with(Property::ClipTop, 0.0)
                        .with(Property::ClipBottom, 0.0)
                        .with(clip, 100.0),
                });
                effects.push(Effect::Animate(Tween::single(
                    target,
                    Props::new().with(clip, 0.0),
                    timings.base(),
                    Ease::Custom,
                )));
            } else if section == prev {
                self.backgrounds[section] = BackgroundRole::Previous;
                let drift = if is_down {
                    timings.parallax_pct
                } else {
                    -timings.parallax_pct
                };
                effects.push(Effect::Animate(Tween::single(
                    target,
                    Props::new().y_percent(drift),
                    timings.base(),
                    Ease::Custom,
                )));
                effects.push(Effect::Animate(
                    Tween::single(target, Props::new().opacity(0.0), timings.gate_fade(), Ease::Custom)
                        .delay(timings.gate_delay())
                        .on_complete(Completion::PreviousBackgroundFaded { section, ticket }),
                ));
            } else {
                self.backgrounds[section] = BackgroundRole::Hidden;
                effects.push(Effect::Animate(Tween::single(
                    target,
                    Props::new().opacity(0.0),
                    timings.of_base(0.3),
                    Ease::Custom,
                )));
            }
        }
    }

    fn highlight_items(&mut self, new_section: usize, effects: &mut Vec<Effect>) {
        let timings = self.timings;
        for section in 0..SECTION_COUNT {
            let opacity = if section == new_section {
                1.0
            } else {
                timings.list_dim_opacity
            };
            effects.push(Effect::Animate(Tween::new(
                vec![Target::LeftItem(section), Target::RightItem(section)],
                Props::new().opacity(opacity),
                timings.list_fade(),
                Ease::Power2Out,
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::effects::{Completion, Effect, Property, Stagger, Target};
    use crate::slideshow::tests::mounted;
    use crate::slideshow::{BackgroundRole, Signal, TransitionLock};
    use crate::cues::Cue;
    use crate::sections::SECTION_COUNT;
    use std::time::Duration;

    fn gate_of(effects: &[Effect]) -> Completion {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Animate(tween) => match tween.on_complete {
                    Some(c @ Completion::PreviousBackgroundFaded { .. }) => Some(c),
                    _ => None,
                },
                _ => None,
            })
            .expect("previous background fade-out")
    }

    fn roles_are_consistent(slideshow: &crate::slideshow::Slideshow) {
        let roles = (0..10).map(|i| slideshow.background_role(i)).collect::<Vec<_>>();
        let active = roles.iter().filter(|r| **r == BackgroundRole::Active).count();
        let previous = roles.iter().filter(|r| **r == BackgroundRole::Previous).count();
        assert_eq!(active, 1, "exactly one active background");
        assert!(previous <= 1, "at most one previous background");
    }

    #[test]
    fn commit_is_optimistic_and_lock_waits_for_gate() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(4, &mut effects);
        assert_eq!(slideshow.current_section(), 4);
        assert!(slideshow.is_animating());
        assert_eq!(
            slideshow.state().lock(),
            TransitionLock::Transitioning {
                ticket: 1,
                from: 0,
                to: 4
            }
        );

        let outgoing = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Animate(tween) => match tween.on_complete {
                    Some(c @ Completion::OutgoingWordsHidden { .. }) => Some(c),
                    _ => None,
                },
                _ => None,
            })
            .expect("outgoing word track");
        slideshow.reduce(Signal::Finished(outgoing));
        assert!(slideshow.is_animating(), "text track does not release the lock");
        assert!(!slideshow.is_featured_visible(0));

        let gate = gate_of(&effects);
        slideshow.reduce(Signal::Finished(gate));
        assert!(!slideshow.is_animating());
        roles_are_consistent(&slideshow);
        assert_eq!(slideshow.background_role(4), BackgroundRole::Active);
        assert_eq!(slideshow.background_role(0), BackgroundRole::Hidden);
    }

    #[test]
    fn requests_during_a_transition_are_dropped() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(1, &mut effects);
        let mut dropped = Vec::new();
        slideshow.change_section(2, &mut dropped);
        slideshow.change_section(1, &mut dropped);
        assert!(dropped.is_empty());
        assert_eq!(slideshow.current_section(), 1);
    }

    #[test]
    fn stale_gate_does_not_release_a_newer_lock() {
        let (mut slideshow, _) = mounted();
        let mut first = Vec::new();
        slideshow.change_section(1, &mut first);
        let gate = gate_of(&first);
        slideshow.reduce(Signal::Finished(gate));

        let mut second = Vec::new();
        slideshow.change_section(2, &mut second);
        slideshow.reduce(Signal::Finished(gate));
        assert!(slideshow.is_animating(), "old ticket must not unlock");
        slideshow.reduce(Signal::Finished(gate_of(&second)));
        assert!(!slideshow.is_animating());
    }

    #[test]
    fn downward_change_issues_tracks_in_order() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(1, &mut effects);

        let cue_at = effects
            .iter()
            .position(|e| {
                *e == Effect::PlayCue {
                    cue: Cue::TextChange,
                    delay: Duration::from_millis(250),
                }
            })
            .expect("text cue");
        let outgoing_at = effects
            .iter()
            .position(|e| matches!(e, Effect::Animate(t) if t.targets.first() == Some(&Target::Word { section: 0, word: 0 })))
            .expect("outgoing words");
        let wipe_at = effects
            .iter()
            .position(|e| matches!(e, Effect::Animate(t) if t.targets == vec![Target::Background(1)]))
            .expect("wipe");
        let list_at = effects
            .iter()
            .position(|e| matches!(e, Effect::Animate(t) if t.targets.contains(&Target::LeftItem(1))))
            .expect("list highlight");
        assert!(outgoing_at < cue_at && cue_at < wipe_at && wipe_at < list_at);

        let Effect::Animate(outgoing) = &effects[outgoing_at] else {
            panic!("expected a tween");
        };
        assert_eq!(outgoing.to.value(Property::YPercent), Some(-100.0));
        assert!(matches!(outgoing.stagger, Stagger::Forward(_)));

        let Effect::Animate(wipe) = &effects[wipe_at] else {
            panic!("expected a tween");
        };
        assert_eq!(wipe.to.value(Property::ClipTop), Some(0.0));
    }

    #[test]
    fn upward_change_reverses_directions() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(5, &mut effects);
        slideshow.reduce(Signal::Finished(gate_of(&effects)));

        let mut up = Vec::new();
        slideshow.change_section(4, &mut up);
        let outgoing = up
            .iter()
            .find_map(|e| match e {
                Effect::Animate(t) if t.targets.first() == Some(&Target::Word { section: 5, word: 0 }) => Some(t),
                _ => None,
            })
            .expect("outgoing words");
        assert_eq!(outgoing.to.value(Property::YPercent), Some(100.0));
        assert!(matches!(outgoing.stagger, Stagger::Reverse(_)));
        let wipe = up
            .iter()
            .find_map(|e| match e {
                Effect::Animate(t) if t.targets == vec![Target::Background(4)] => Some(t),
                _ => None,
            })
            .expect("wipe");
        assert_eq!(wipe.to.value(Property::ClipBottom), Some(0.0));
        let drift = up
            .iter()
            .find_map(|e| match e {
                Effect::Animate(t)
                    if t.targets == vec![Target::Background(5)]
                        && t.to.value(Property::YPercent).is_some() =>
                {
                    t.to.value(Property::YPercent)
                }
                _ => None,
            })
            .expect("parallax drift");
        assert_eq!(drift, -5.0);
    }

    #[test]
    fn gate_is_the_slowest_background_track() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(3, &mut effects);
        let mut gate_total = Duration::ZERO;
        let mut longest_other_background = Duration::ZERO;
        for effect in &effects {
            if let Effect::Animate(tween) = effect {
                let is_background = matches!(tween.targets.first(), Some(Target::Background(_)));
                if matches!(tween.on_complete, Some(Completion::PreviousBackgroundFaded { .. })) {
                    gate_total = tween.total_time();
                } else if is_background {
                    longest_other_background = longest_other_background.max(tween.total_time());
                }
            }
        }
        assert_eq!(gate_total, slideshow.timings().base());
        assert!(gate_total >= longest_other_background);
    }

    #[test]
    fn lock_releases_before_incoming_words_settle() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(3, &mut effects);
        let incoming = effects
            .iter()
            .find_map(|e| match e {
                Effect::Animate(t) if t.targets.first() == Some(&Target::Word { section: 3, word: 0 }) => Some(t),
                _ => None,
            })
            .expect("incoming words");
        assert!(incoming.targets.len() > 1);
        assert!(incoming.on_complete.is_none());
        assert!(incoming.total_time() > slideshow.timings().base());

        slideshow.reduce(Signal::Finished(gate_of(&effects)));
        assert!(!slideshow.is_animating());
    }

    #[test]
    fn upward_wipe_paints_over_the_previous_background() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(5, &mut effects);
        slideshow.reduce(Signal::Finished(gate_of(&effects)));

        let mut up = Vec::new();
        slideshow.change_section(4, &mut up);
        assert_eq!(slideshow.background_role(5), BackgroundRole::Previous);
        let order = slideshow.paint_order();
        assert_eq!(order[SECTION_COUNT - 1], 4);
        assert_eq!(order[SECTION_COUNT - 2], 5);

        slideshow.reduce(Signal::Finished(gate_of(&up)));
        assert_eq!(slideshow.paint_order()[SECTION_COUNT - 1], 4);
    }

    #[test]
    fn stale_sections_are_force_hidden() {
        let (mut slideshow, _) = mounted();
        slideshow.featured[7] = true;
        let mut effects = Vec::new();
        slideshow.change_section(1, &mut effects);
        assert!(!slideshow.is_featured_visible(7));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Set { targets, props }
                if targets == &vec![Target::Featured(7)] && props.value(Property::Opacity) == Some(0.0)
        )));
    }

    #[test]
    fn outgoing_hide_is_skipped_when_section_returns() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.change_section(1, &mut effects);
        slideshow.reduce(Signal::Finished(gate_of(&effects)));
        let mut back = Vec::new();
        slideshow.change_section(0, &mut back);
        let late = slideshow.reduce(Signal::Finished(Completion::OutgoingWordsHidden {
            section: 0,
            ticket: 1,
        }));
        assert!(late.is_empty());
        assert!(slideshow.is_featured_visible(0));
    }
}
