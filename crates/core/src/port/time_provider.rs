// Time Provider Port (for testability)

use chrono::NaiveDate;

/// Time provider interface (allows fixed clocks in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;

    /// Get the current local calendar date (used in ticket numbers)
    fn today(&self) -> NaiveDate;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    /// Clock pinned to a calendar date; every read advances by one second
    pub struct FixedTimeProvider {
        millis: AtomicI64,
        date: Mutex<NaiveDate>,
    }

    impl FixedTimeProvider {
        pub fn new(date: NaiveDate) -> Self {
            let millis = date
                .and_hms_opt(9, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis())
                .unwrap_or_default();
            Self {
                millis: AtomicI64::new(millis),
                date: Mutex::new(date),
            }
        }

        pub fn ymd(year: i32, month: u32, day: u32) -> Self {
            Self::new(NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"))
        }

        /// Move the clock to another day (simulates midnight roll-over)
        pub fn set_date(&self, date: NaiveDate) {
            *self.date.lock().unwrap() = date;
        }
    }

    impl TimeProvider for FixedTimeProvider {
        fn now_millis(&self) -> i64 {
            self.millis.fetch_add(1_000, Ordering::SeqCst)
        }

        fn today(&self) -> NaiveDate {
            *self.date.lock().unwrap()
        }
    }
}
