//! Time source for outcome timestamps and run timing.
//!
//! Every timestamp the engine and batch runner record comes from a [`Clock`]
//! passed in by the caller, so tests can drive time deterministically.

use chrono::{DateTime, Local};

/// Supplies the current local time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}
