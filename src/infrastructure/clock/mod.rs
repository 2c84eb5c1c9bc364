//! Clock infrastructure module

use chrono::{DateTime, Local};

use crate::application::ports::Clock;

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
