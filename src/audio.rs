//! Cue playback through `rodio`. Every cue is decoded once up front and
//! restarted from the start on each play.

use anyhow::{Context, Result, anyhow};
use reel_core::{Cue, CueDevice, SoundBank};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

type ClipSource = Buffered<Decoder<Cursor<Vec<u8>>>>;

struct Clip {
    source: ClipSource,
    volume: f32,
    sink: Option<Sink>,
}

pub struct RodioCueDevice {
    output: Option<(OutputStream, OutputStreamHandle)>,
    clips: HashMap<Cue, Clip>,
}

impl RodioCueDevice {
    /// Open the default output and decode every configured cue. Cues that
    /// fail to load are left out; a missing output device leaves all of
    /// them out.
    pub fn open(bank: &SoundBank, asset_dir: &Path) -> Self {
        let output = match OutputStream::try_default().context("Opening audio output") {
            Ok(output) => output,
            Err(err) => {
                warn!("Audio cues disabled: {err:#}");
                return Self::silent();
            }
        };

        let mut clips = HashMap::new();
        for (cue, spec) in bank.iter() {
            let path = asset_dir.join(&spec.file);
            match load_clip(&path) {
                Ok(source) => {
                    debug!(%cue, path = %path.display(), volume = spec.volume, "Loaded cue");
                    clips.insert(
                        cue,
                        Clip {
                            source,
                            volume: spec.volume.clamp(0.0, 1.0),
                            sink: None,
                        },
                    );
                }
                Err(err) => warn!(%cue, "Skipping cue: {err:#}"),
            }
        }
        info!(loaded = clips.len(), "Audio cues ready");
        Self {
            output: Some(output),
            clips,
        }
    }

    /// A device with no output; every cue is unknown.
    pub fn silent() -> Self {
        Self {
            output: None,
            clips: HashMap::new(),
        }
    }
}

impl CueDevice for RodioCueDevice {
    fn knows(&self, cue: Cue) -> bool {
        self.output.is_some() && self.clips.contains_key(&cue)
    }

    fn restart(&mut self, cue: Cue) -> Result<()> {
        let (_, handle) = self
            .output
            .as_ref()
            .ok_or_else(|| anyhow!("no audio output"))?;
        let clip = self
            .clips
            .get_mut(&cue)
            .ok_or_else(|| anyhow!("cue {cue} is not loaded"))?;
        if let Some(previous) = clip.sink.take() {
            previous.stop();
        }
        let sink = Sink::try_new(handle).context("Creating sink")?;
        sink.set_volume(clip.volume);
        sink.append(clip.source.clone());
        sink.play();
        clip.sink = Some(sink);
        Ok(())
    }
}

fn load_clip(path: &Path) -> Result<ClipSource> {
    let bytes = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    let decoder =
        Decoder::new(Cursor::new(bytes)).with_context(|| format!("Decoding {}", path.display()))?;
    Ok(decoder.buffered())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_device_knows_nothing() {
        let mut device = RodioCueDevice::silent();
        assert!(Cue::ALL.iter().all(|cue| !device.knows(*cue)));
        assert!(device.restart(Cue::Click).is_err());
    }

    #[test]
    fn missing_clip_is_an_error() {
        let err = load_clip(Path::new("assets/definitely-missing.mp3"))
            .err()
            .expect("missing file fails");
        assert!(format!("{err:#}").contains("definitely-missing.mp3"));
    }
}
