use chrono::NaiveTime;

use crate::{
    error::StoreError,
    timing::{schedule::Schedule, weekday::WeekDay},
};

/// One restaurant and its parsed week.
pub type RestaurantRecord = (String, Schedule);

/// Where parsed schedules live between load and query.
///
/// Implementations are shared across connection tasks, so they must be
/// `Send + Sync`. Loading replaces the whole content at once: a reader sees
/// either the old set or the new one, never a mix.
///
/// Names come back in load order without duplicates.
pub trait ScheduleStore: Send + Sync {
    fn bulk_load(&self, records: Vec<RestaurantRecord>) -> Result<(), StoreError>;

    /// Restaurants whose own window on `day` contains `now`.
    fn open_same_day(&self, day: WeekDay, now: NaiveTime) -> Result<Vec<String>, StoreError>;

    /// Restaurants still open at `now` from a window that began on
    /// `previous_day` and ran past midnight.
    fn open_overnight(
        &self,
        previous_day: WeekDay,
        now: NaiveTime,
    ) -> Result<Vec<String>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Collapses records sharing a name. The later schedule wins and the name
/// keeps the position of its first appearance.
pub fn dedupe_by_name(records: Vec<RestaurantRecord>) -> Vec<RestaurantRecord> {
    let mut deduped: Vec<RestaurantRecord> = Vec::with_capacity(records.len());
    for (name, schedule) in records {
        match deduped.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = schedule,
            None => deduped.push((name, schedule)),
        }
    }
    deduped
}
