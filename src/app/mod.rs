mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use iced::{Size, Theme, window};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Launch the slideshow window. `shutdown` is raised from outside (Ctrl-C)
/// and polled on every tick.
pub fn run_app(config: AppConfig, shutdown: Arc<AtomicBool>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application("Reel", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|_: &App| Theme::Dark)
        .run_with(move || App::bootstrap(config, shutdown))
}
