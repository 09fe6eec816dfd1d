use super::models::LogLevel;

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_asset_dir() -> String {
    "assets".to_string()
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    16
}

pub(crate) fn default_wheel_step_px() -> f32 {
    100.0
}
