use std::time::SystemTime;

use auto_impl::auto_impl;

/// Source of wall-clock time.
#[auto_impl(&, Box, Arc)]
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// [`Clock`] backed by [`SystemTime::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
