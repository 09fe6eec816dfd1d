//! The two ways into a section change: clicking a list item and crossing a
//! section boundary while scrolling. Both also move the page to the
//! section's anchor and hold the snap lock until that move settles.

use crate::cues::Cue;
use crate::ease::Ease;
use crate::effects::{Completion, Effect, ScrollRequest};
use crate::progress::step_toward;
use crate::sections::SECTION_COUNT;
use crate::slideshow::{SnapLock, Slideshow};
use std::time::Duration;
use tracing::{info, trace};

impl Slideshow {
    /// Jump to an arbitrary section on user request.
    pub fn navigate_to(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if !self.is_mounted() {
            return;
        }
        if index >= SECTION_COUNT
            || index == self.state.current
            || self.state.is_animating()
            || self.state.is_snapping()
        {
            trace!(
                index,
                current = self.state.current,
                animating = self.state.is_animating(),
                snapping = self.state.is_snapping(),
                "Navigation rejected"
            );
            return;
        }

        info!(from = self.state.current, to = index, "Navigating to section");
        effects.push(Effect::EnableAudio);
        effects.push(Effect::PlayCue {
            cue: Cue::Click,
            delay: Duration::ZERO,
        });
        let duration = self.timings.navigate_scroll();
        self.begin_snap(index, duration, effects);
    }

    /// Step to an adjacent section in response to scrolling.
    ///
    /// Unlike [`Slideshow::navigate_to`] this does not look at the snap lock
    /// and plays no click; the section change supplies its own cue.
    pub fn snap_to(&mut self, target: usize, effects: &mut Vec<Effect>) {
        if !self.is_mounted() {
            return;
        }
        if target >= SECTION_COUNT || target == self.state.current || self.state.is_animating() {
            trace!(target, current = self.state.current, "Snap rejected");
            return;
        }
        let duration = self.timings.snap_scroll();
        self.begin_snap(target, duration, effects);
    }

    pub(crate) fn handle_pinned_progress(&mut self, progress: f32, effects: &mut Vec<Effect>) {
        // Samples produced by our own snap scroll are not user intent.
        if self.state.is_snapping() {
            return;
        }
        let sample = self.mapper.sample(progress);
        trace!(
            progress = sample.progress,
            target = sample.target,
            direction = sample.direction.sign(),
            current = self.state.current,
            "Pinned progress"
        );
        if self.state.is_animating() {
            return;
        }
        if let Some(next) = step_toward(self.state.current, sample.target) {
            self.snap_to(next, effects);
        }
    }

    fn begin_snap(&mut self, index: usize, duration: Duration, effects: &mut Vec<Effect>) {
        let ticket = self.state.issue_ticket();
        self.state.snap = SnapLock::Snapping { ticket };
        self.change_section(index, effects);
        let Some(position) = self.anchors.offset(index) else {
            return;
        };
        effects.push(Effect::ScrollTo(ScrollRequest {
            position,
            duration,
            ease: Ease::CubicOut,
            lock: true,
            on_complete: Completion::SnapSettled { ticket },
        }));
    }
}

#[cfg(test)]
mod tests {
    use crate::effects::{Completion, Effect};
    use crate::cues::Cue;
    use crate::slideshow::tests::mounted;
    use crate::slideshow::{Signal, Slideshow};
    use std::time::Duration;

    fn finish_all(slideshow: &mut Slideshow, effects: &[Effect]) {
        let completions = effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Animate(tween) => tween.on_complete,
                Effect::ScrollTo(request) => Some(request.on_complete),
                _ => None,
            })
            .collect::<Vec<_>>();
        for completion in completions {
            slideshow.reduce(Signal::Finished(completion));
        }
    }

    fn scroll_request(effects: &[Effect]) -> Option<(f32, Duration)> {
        effects.iter().find_map(|effect| match effect {
            Effect::ScrollTo(request) => Some((request.position, request.duration)),
            _ => None,
        })
    }

    #[test]
    fn navigate_to_four_commits_and_locks() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.reduce(Signal::ItemClicked(4));
        assert_eq!(slideshow.current_section(), 4);
        assert!(slideshow.is_animating());
        assert!(slideshow.is_snapping());
        assert_eq!(effects[0], Effect::EnableAudio);
        assert_eq!(
            effects[1],
            Effect::PlayCue {
                cue: Cue::Click,
                delay: Duration::ZERO
            }
        );
        assert_eq!(
            scroll_request(&effects),
            Some((4_000.0, Duration::from_millis(800)))
        );

        let again = slideshow.reduce(Signal::ItemClicked(4));
        assert!(again.is_empty(), "second jump to the same section is a no-op");

        finish_all(&mut slideshow, &effects);
        assert!(!slideshow.is_animating());
        assert!(!slideshow.is_snapping());
        assert_eq!(slideshow.current_section(), 4);
    }

    #[test]
    fn navigation_is_rejected_while_snapping() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.reduce(Signal::ItemClicked(2));
        let gate = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Animate(tween) => match tween.on_complete {
                    Some(c @ Completion::PreviousBackgroundFaded { .. }) => Some(c),
                    _ => None,
                },
                _ => None,
            })
            .expect("gate track");
        slideshow.reduce(Signal::Finished(gate));
        assert!(!slideshow.is_animating());
        assert!(slideshow.is_snapping());

        let mut rejected = Vec::new();
        slideshow.navigate_to(7, &mut rejected);
        assert!(rejected.is_empty());
        assert_eq!(slideshow.current_section(), 2);

        // A scroll-driven step ignores the snap lock.
        let mut stepped = Vec::new();
        slideshow.snap_to(3, &mut stepped);
        assert_eq!(slideshow.current_section(), 3);
    }

    #[test]
    fn requests_are_dropped_while_only_animating() {
        let (mut slideshow, _) = mounted();
        let mut direct = Vec::new();
        slideshow.change_section(2, &mut direct);
        assert!(slideshow.is_animating());
        assert!(!slideshow.is_snapping());

        let mut effects = Vec::new();
        slideshow.navigate_to(5, &mut effects);
        slideshow.snap_to(3, &mut effects);
        effects.extend(slideshow.reduce(Signal::PinnedProgress(0.9)));
        assert!(effects.is_empty());
        assert_eq!(slideshow.current_section(), 2);
        assert!(!slideshow.is_snapping());
    }

    #[test]
    fn out_of_range_requests_are_no_ops() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.navigate_to(10, &mut effects);
        slideshow.snap_to(12, &mut effects);
        slideshow.snap_to(0, &mut effects);
        assert!(effects.is_empty());
        assert_eq!(slideshow.current_section(), 0);
        assert!(!slideshow.is_snapping());
    }

    #[test]
    fn snap_uses_the_shorter_move_and_no_click() {
        let (mut slideshow, _) = mounted();
        let mut effects = Vec::new();
        slideshow.snap_to(1, &mut effects);
        assert_eq!(
            scroll_request(&effects),
            Some((1_000.0, Duration::from_millis(600)))
        );
        assert!(!effects.iter().any(|e| matches!(e, Effect::PlayCue { cue: Cue::Click, .. })));
    }

    #[test]
    fn increasing_snaps_never_skip_a_section() {
        let (mut slideshow, _) = mounted();
        let mut seen = vec![slideshow.current_section()];
        for target in 1..=12 {
            let mut effects = Vec::new();
            slideshow.snap_to(target, &mut effects);
            finish_all(&mut slideshow, &effects);
            let current = slideshow.current_section();
            if current != *seen.last().unwrap_or(&0) {
                seen.push(current);
            }
        }
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn fast_scroll_resolves_one_step_per_sample() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.reduce(Signal::PinnedProgress(0.95));
        assert_eq!(slideshow.current_section(), 1, "one step, not a jump to 9");

        // Samples while the snap is in flight change nothing.
        assert!(slideshow.reduce(Signal::PinnedProgress(0.97)).is_empty());
        finish_all(&mut slideshow, &effects);

        let mut steps = 1;
        while slideshow.current_section() < 9 {
            let effects = slideshow.reduce(Signal::PinnedProgress(0.95));
            finish_all(&mut slideshow, &effects);
            steps += 1;
            assert!(steps <= 9, "stepping must terminate");
        }
        assert_eq!(slideshow.current_section(), 9);
        assert!(slideshow.reduce(Signal::PinnedProgress(1.0)).is_empty());
    }

    #[test]
    fn scrolling_back_steps_down() {
        let (mut slideshow, _) = mounted();
        let effects = slideshow.reduce(Signal::ItemClicked(5));
        finish_all(&mut slideshow, &effects);
        slideshow.reduce(Signal::PinnedProgress(0.55));
        let effects = slideshow.reduce(Signal::PinnedProgress(0.31));
        assert_eq!(slideshow.current_section(), 4);
        assert_eq!(
            slideshow.scroll_direction(),
            crate::progress::ScrollDirection::Up
        );
        assert!(scroll_request(&effects).is_some());
    }
}
