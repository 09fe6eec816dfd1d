use super::messages::Message;
use super::state::{App, MAX_TICK_STEP_MS};
use iced::event::{self, Event};
use iced::mouse::{self, ScrollDelta};
use iced::{Subscription, Task, time, window};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tracing::{debug, info};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen_with(runtime_event_to_message)];
        if !app.closing {
            subscriptions.push(time::every(app.config.tick_interval()).map(Message::Tick));
        }
        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                if self.shutdown.load(Ordering::SeqCst) {
                    info!("Received Ctrl+C; closing slideshow");
                    return self.close();
                }
                let dt = self.tick_step(now);
                self.player.tick(dt);
            }
            Message::WheelScrolled(delta) => {
                let delta_px = wheel_to_pixels(delta, self.config.wheel_step_px);
                self.player.wheel(delta_px);
            }
            Message::PointerPressed => self.player.press(),
            Message::ItemClicked(index) => self.player.click(index),
            Message::ItemHovered(index) => self.player.hover(index),
            Message::WindowResized { width, height } => {
                debug!(width, height, "Window resized");
                self.viewport_height = height;
                self.player.resize(height);
            }
            Message::CloseRequested => return self.close(),
        }
        Task::none()
    }

    fn tick_step(&mut self, now: Instant) -> Duration {
        let step = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_else(|| self.config.tick_interval());
        self.last_tick = Some(now);
        step.min(Duration::from_millis(MAX_TICK_STEP_MS))
    }

    fn close(&mut self) -> Task<Message> {
        if !self.closing {
            self.closing = true;
            self.player.teardown();
            info!("Slideshow torn down");
        }
        iced::exit()
    }
}

fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    // Presses unlock audio even when a widget handled them.
    if let Event::Mouse(mouse::Event::ButtonPressed(_)) = event {
        return Some(Message::PointerPressed);
    }
    if let Event::Window(window::Event::CloseRequested) = event {
        return Some(Message::CloseRequested);
    }
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            Some(Message::WheelScrolled(delta))
        }
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        _ => None,
    }
}

/// Wheel delta as page movement in pixels; positive moves down the page.
fn wheel_to_pixels(delta: ScrollDelta, line_step_px: f32) -> f32 {
    match delta {
        ScrollDelta::Lines { y, .. } => -y * line_step_px,
        ScrollDelta::Pixels { y, .. } => -y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_lines_scale_by_step() {
        assert_eq!(wheel_to_pixels(ScrollDelta::Lines { x: 0.0, y: -2.0 }, 100.0), 200.0);
        assert_eq!(wheel_to_pixels(ScrollDelta::Pixels { x: 0.0, y: 40.0 }, 100.0), -40.0);
    }

    #[test]
    fn close_request_is_never_swallowed() {
        let message = runtime_event_to_message(
            Event::Window(window::Event::CloseRequested),
            event::Status::Captured,
            window::Id::unique(),
        );
        assert!(matches!(message, Some(Message::CloseRequested)));
    }
}
