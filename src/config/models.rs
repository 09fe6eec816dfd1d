use super::defaults;
use anyhow::Result;
use reel_core::scroll::LayoutConfig;
use reel_core::{Section, SectionDeck, SoundBank, TransitionTimings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Top-level viewer configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "defaults::default_asset_dir")]
    pub asset_dir: String,
    #[serde(default = "defaults::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Pixels scrolled per wheel line.
    #[serde(default = "defaults::default_wheel_step_px")]
    pub wheel_step_px: f32,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timings: TransitionTimings,
    #[serde(default)]
    pub sounds: SoundBank,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: defaults::default_log_level(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            asset_dir: defaults::default_asset_dir(),
            tick_interval_ms: defaults::default_tick_interval_ms(),
            wheel_step_px: defaults::default_wheel_step_px(),
            layout: LayoutConfig::default(),
            timings: TransitionTimings::default(),
            sounds: SoundBank::default(),
            sections: None,
        }
    }
}

impl AppConfig {
    /// Section deck from config, or the built-in one if the configured list
    /// is unusable.
    pub fn deck(&self) -> SectionDeck {
        let Some(sections) = &self.sections else {
            return SectionDeck::default();
        };
        match SectionDeck::new(sections.clone()) {
            Ok(deck) => deck,
            Err(err) => {
                warn!("Ignoring configured sections: {err}");
                SectionDeck::default()
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.clamp(1, 1000))
    }

    pub fn asset_path(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.asset_dir).join(file)
    }

    /// Reject values that cannot produce a usable window.
    pub fn validate(&self) -> Result<()> {
        if !(self.window_width.is_finite() && self.window_width > 0.0)
            || !(self.window_height.is_finite() && self.window_height > 0.0)
        {
            anyhow::bail!(
                "window size must be positive, got {}x{}",
                self.window_width,
                self.window_height
            );
        }
        Ok(())
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
