use std::time::Duration;

// Port for reading elapsed match time; drives the computer fire cooldown.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}
