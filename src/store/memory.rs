use std::sync::{Arc, RwLock};

use chrono::NaiveTime;

use crate::{error::StoreError, timing::weekday::WeekDay};

use super::store::{dedupe_by_name, RestaurantRecord, ScheduleStore};

/// Keeps every schedule in process memory.
///
/// The loaded set is an immutable snapshot. A reload builds a new snapshot and
/// swaps the pointer, so queries never wait on a load in progress.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: RwLock<Arc<Vec<RestaurantRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Result<Arc<Vec<RestaurantRecord>>, StoreError> {
        let snapshot = self.snapshot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(&snapshot))
    }
}

impl ScheduleStore for MemoryStore {
    fn bulk_load(&self, records: Vec<RestaurantRecord>) -> Result<(), StoreError> {
        let records = Arc::new(dedupe_by_name(records));
        *self.snapshot.write().map_err(|_| StoreError::Poisoned)? = records;
        Ok(())
    }

    fn open_same_day(&self, day: WeekDay, now: NaiveTime) -> Result<Vec<String>, StoreError> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|(_, schedule)| schedule.is_open_same_day(day, now))
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn open_overnight(
        &self,
        previous_day: WeekDay,
        now: NaiveTime,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|(_, schedule)| schedule.is_open_overnight(previous_day, now))
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.snapshot()?.len())
    }
}
