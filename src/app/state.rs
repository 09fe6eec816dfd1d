use super::messages::Message;
use crate::audio::RodioCueDevice;
use crate::config::AppConfig;
use iced::Task;
use reel_core::{PageLayout, Player};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;
use tracing::info;

/// Longest step fed to the player in one tick; a stalled frame resumes
/// instead of jumping.
pub(super) const MAX_TICK_STEP_MS: u64 = 100;

pub struct App {
    pub(super) config: AppConfig,
    pub(super) player: Player<RodioCueDevice>,
    pub(super) shutdown: Arc<AtomicBool>,
    pub(super) last_tick: Option<Instant>,
    pub(super) viewport_height: f32,
    pub(super) closing: bool,
}

impl App {
    pub fn bootstrap(config: AppConfig, shutdown: Arc<AtomicBool>) -> (Self, Task<Message>) {
        let device = RodioCueDevice::open(&config.sounds, Path::new(&config.asset_dir));
        let app = Self::with_device(config, shutdown, device);
        info!(
            sections = app.player.slideshow().deck().len(),
            viewport_height = app.viewport_height,
            "Slideshow ready"
        );
        (app, Task::none())
    }

    pub(super) fn with_device(
        config: AppConfig,
        shutdown: Arc<AtomicBool>,
        device: RodioCueDevice,
    ) -> Self {
        let viewport_height = config.window_height;
        let layout = PageLayout::new(viewport_height, config.layout);
        let player = Player::new(config.deck(), config.timings, layout, device);
        Self {
            config,
            player,
            shutdown,
            last_tick: None,
            viewport_height,
            closing: false,
        }
    }
}
