//! Clock port interface

use chrono::{DateTime, Local};

/// Source of submission timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}
