//! Best-effort named audio cues with a one-way enable gate.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Hover,
    Click,
    TextChange,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Hover, Cue::Click, Cue::TextChange];
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Cue::Hover => "hover",
            Cue::Click => "click",
            Cue::TextChange => "textChange",
        };
        write!(f, "{}", label)
    }
}

/// Where a cue's audio comes from and how loud it plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSpec {
    pub file: String,
    pub volume: f32,
}

/// Mapping from cue name to its audio source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundBank {
    #[serde(default = "default_hover")]
    pub hover: Option<CueSpec>,
    #[serde(default = "default_click")]
    pub click: Option<CueSpec>,
    #[serde(default = "default_text_change")]
    pub text_change: Option<CueSpec>,
}

fn default_hover() -> Option<CueSpec> {
    Some(CueSpec {
        file: "click-reverb-001.mp3".to_string(),
        volume: 0.15,
    })
}

fn default_click() -> Option<CueSpec> {
    Some(CueSpec {
        file: "shutter-fx-001.mp3".to_string(),
        volume: 0.3,
    })
}

fn default_text_change() -> Option<CueSpec> {
    Some(CueSpec {
        file: "whoosh-fx-001.mp3".to_string(),
        volume: 0.3,
    })
}

impl Default for SoundBank {
    fn default() -> Self {
        SoundBank {
            hover: default_hover(),
            click: default_click(),
            text_change: default_text_change(),
        }
    }
}

impl SoundBank {
    pub fn get(&self, cue: Cue) -> Option<&CueSpec> {
        match cue {
            Cue::Hover => self.hover.as_ref(),
            Cue::Click => self.click.as_ref(),
            Cue::TextChange => self.text_change.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cue, &CueSpec)> {
        Cue::ALL
            .into_iter()
            .filter_map(|cue| self.get(cue).map(|spec| (cue, spec)))
    }
}

/// Output side of the cue player.
pub trait CueDevice {
    /// Whether a playable handle exists for `cue`.
    fn knows(&self, cue: Cue) -> bool;
    /// Restart `cue` from its beginning.
    fn restart(&mut self, cue: Cue) -> Result<()>;
}

/// Fire-and-forget cue playback. Delays are measured on the player's own
/// clock, which only moves through [`CuePlayer::advance`].
pub struct CuePlayer<D> {
    device: D,
    enabled: bool,
    clock: Duration,
    pending: Vec<(Duration, Cue)>,
}

impl<D: CueDevice> CuePlayer<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            enabled: false,
            clock: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// Open the gate. There is no way to close it again.
    pub fn enable(&mut self) {
        if !self.enabled {
            debug!("Audio cues enabled");
        }
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn play(&mut self, cue: Cue, delay: Duration) {
        if !self.enabled || !self.device.knows(cue) {
            trace!(%cue, enabled = self.enabled, "Cue skipped");
            return;
        }
        if delay.is_zero() {
            self.fire(cue);
        } else {
            self.pending.push((self.clock + delay, cue));
        }
    }

    /// Move the clock forward and fire every cue that came due, oldest first.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        if self.pending.is_empty() {
            return;
        }
        let now = self.clock;
        let mut due: Vec<(Duration, Cue)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);
        for (_, cue) in due {
            self.fire(cue);
        }
    }

    /// Forget delayed cues that have not fired yet.
    pub fn silence(&mut self) {
        self.pending.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    fn fire(&mut self, cue: Cue) {
        if let Err(err) = self.device.restart(cue) {
            debug!(%cue, "Cue playback rejected: {err}");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::anyhow;

    /// Records every restart; optionally refuses to play.
    #[derive(Default)]
    pub(crate) struct RecordingDevice {
        pub(crate) played: Vec<Cue>,
        pub(crate) reject: bool,
        pub(crate) missing: Vec<Cue>,
    }

    impl CueDevice for RecordingDevice {
        fn knows(&self, cue: Cue) -> bool {
            !self.missing.contains(&cue)
        }

        fn restart(&mut self, cue: Cue) -> Result<()> {
            self.played.push(cue);
            if self.reject {
                return Err(anyhow!("autoplay blocked"));
            }
            Ok(())
        }
    }

    #[test]
    fn disabled_player_is_silent() {
        let mut player = CuePlayer::new(RecordingDevice::default());
        player.play(Cue::Click, Duration::ZERO);
        player.play(Cue::TextChange, Duration::from_millis(250));
        player.advance(Duration::from_secs(1));
        assert!(player.device().played.is_empty());
        assert_eq!(player.pending_len(), 0);
    }

    #[test]
    fn enable_is_idempotent() {
        let mut player = CuePlayer::new(RecordingDevice::default());
        player.enable();
        player.enable();
        assert!(player.is_enabled());
        player.play(Cue::Hover, Duration::ZERO);
        assert_eq!(player.device().played, vec![Cue::Hover]);
    }

    #[test]
    fn delayed_cue_waits_for_the_clock() {
        let mut player = CuePlayer::new(RecordingDevice::default());
        player.enable();
        player.play(Cue::TextChange, Duration::from_millis(250));
        player.advance(Duration::from_millis(200));
        assert!(player.device().played.is_empty());
        player.advance(Duration::from_millis(60));
        assert_eq!(player.device().played, vec![Cue::TextChange]);
    }

    #[test]
    fn unknown_cue_is_a_no_op() {
        let device = RecordingDevice {
            missing: vec![Cue::Hover],
            ..RecordingDevice::default()
        };
        let mut player = CuePlayer::new(device);
        player.enable();
        player.play(Cue::Hover, Duration::ZERO);
        assert!(player.device().played.is_empty());
    }

    #[test]
    fn rejected_playback_is_swallowed() {
        let device = RecordingDevice {
            reject: true,
            ..RecordingDevice::default()
        };
        let mut player = CuePlayer::new(device);
        player.enable();
        player.play(Cue::Click, Duration::ZERO);
        player.play(Cue::Click, Duration::ZERO);
        assert_eq!(player.device().played.len(), 2);
    }

    #[test]
    fn silence_drops_pending_cues() {
        let mut player = CuePlayer::new(RecordingDevice::default());
        player.enable();
        player.play(Cue::TextChange, Duration::from_millis(250));
        player.silence();
        player.advance(Duration::from_secs(1));
        assert!(player.device().played.is_empty());
    }

    #[test]
    fn default_bank_volumes() {
        let bank = SoundBank::default();
        assert_eq!(bank.get(Cue::Hover).map(|s| s.volume), Some(0.15));
        assert_eq!(bank.get(Cue::Click).map(|s| s.volume), Some(0.3));
        assert_eq!(bank.iter().count(), 3);
    }
}
