use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared "still mounted" flag. Clones observe the same teardown.
#[derive(Clone, Debug, Default)]
pub struct ViewLifetime {
    torn_down: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tear_down(&self) {
        self.torn_down.store(true, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        !self.torn_down.load(Ordering::Acquire)
    }
}
