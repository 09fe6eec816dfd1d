use iced::mouse::ScrollDelta;
use std::time::Instant;

/// Messages emitted by the window and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    Tick(Instant),
    WheelScrolled(ScrollDelta),
    PointerPressed,
    ItemClicked(usize),
    ItemHovered(usize),
    WindowResized {
        width: f32,
        height: f32,
    },
    CloseRequested,
}
