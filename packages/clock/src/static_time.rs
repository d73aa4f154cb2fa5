//! The time the application started.
use std::time::SystemTime;

lazy_static! {
    /// The time the application started, taken the first time it is read.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}
