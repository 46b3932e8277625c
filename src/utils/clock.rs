use chrono::{DateTime, Local, NaiveDateTime};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> chrono::NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a settable instant (second precision).
#[derive(Debug)]
pub struct FixedClock {
    secs: AtomicI64,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            secs: AtomicI64::new(at.and_utc().timestamp()),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.secs.store(at.and_utc().timestamp(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.secs.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        let secs = self.secs.load(Ordering::SeqCst);
        DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 12)
            .unwrap()
            .and_hms_opt(8, 55, 0)
            .unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(chrono::Duration::minutes(25));
        assert_eq!(clock.now().format("%H:%M").to_string(), "09:20");
        assert_eq!(clock.today(), start.date());
    }
}
