//! Timestamp-derived ID generation.
//!
//! Projects, tasks and team members are identified by the millisecond Unix
//! timestamp at which they were created. Two records created within the
//! same millisecond (or after the clock steps backwards) would collide, so
//! the generator hands out `max(now_ms, last + 1)`: IDs are strictly
//! increasing across everything a store creates, which makes them unique
//! within every project and across projects.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use taskdeck::id_generation::IdGenerator;
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let mut generator = IdGenerator::new();
//!
//! let first = generator.next_at(now)?;
//! let second = generator.next_at(now)?;
//! assert_eq!(second, first + 1);
//! # Ok::<(), taskdeck::error::Error>(())
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Generator of strictly increasing timestamp-derived IDs
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator with no IDs issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing ID so future IDs are greater than it.
    ///
    /// Called for every ID found when loading persisted state.
    pub fn register(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    /// The largest ID issued or registered so far.
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Issue the next ID for a record created at `now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IdsExhausted` if the last ID is `i64::MAX`.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> Result<i64> {
        let candidate = now.timestamp_millis();
        let id = if candidate > self.last {
            candidate
        } else {
            tracing::trace!(candidate, last = self.last, "ID collision, bumping");
            self.last
                .checked_add(1)
                .ok_or(Error::IdsExhausted(self.last))?
        };
        self.last = id;
        Ok(id)
    }

    /// Issue the next ID for a record created now.
    ///
    /// # Errors
    ///
    /// Returns `Error::IdsExhausted` if the last ID is `i64::MAX`.
    pub fn next(&mut self) -> Result<i64> {
        self.next_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uses_timestamp_when_clock_advances() {
        let mut generator = IdGenerator::new();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();

        assert_eq!(generator.next_at(t1).unwrap(), t1.timestamp_millis());
        assert_eq!(generator.next_at(t2).unwrap(), t2.timestamp_millis());
    }

    #[test]
    fn bumps_on_same_millisecond() {
        let mut generator = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let ids: Vec<i64> = (0..5).map(|_| generator.next_at(now).unwrap()).collect();

        for pair in ids.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn bumps_when_clock_goes_backwards() {
        let mut generator = IdGenerator::new();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = generator.next_at(later).unwrap();
        assert_eq!(generator.next_at(earlier).unwrap(), first + 1);
    }

    #[test]
    fn registered_ids_are_never_reissued() {
        let mut generator = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let existing = now.timestamp_millis() + 500;

        generator.register(existing);
        generator.register(3);

        assert_eq!(generator.last(), existing);
        assert_eq!(generator.next_at(now).unwrap(), existing + 1);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let mut generator = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        generator.register(i64::MAX);

        let result = generator.next_at(now);

        assert!(matches!(result, Err(Error::IdsExhausted(i64::MAX))));
        assert_eq!(generator.last(), i64::MAX);
    }
}
