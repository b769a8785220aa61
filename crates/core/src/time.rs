use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" and "today" for progress bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Wall-clock time on the device.
    #[default]
    System,
    /// Frozen at a given instant, for tests.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// The calendar day daily progress belongs to.
    ///
    /// The system clock follows the device's local calendar. A fixed clock
    /// uses its UTC date so results do not depend on the host time zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(t) => t.date_naive(),
        }
    }

    /// Move a fixed clock forward; the system clock ignores this.
    pub fn advance(&mut self, delta: chrono::Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// 2023-11-14T22:13:20Z
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Deterministic instant for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
