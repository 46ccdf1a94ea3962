use std::sync::Arc;

use chrono::NaiveTime;
use log::debug;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::{database::sqlite::SqliteDatabase, error::StoreError, timing::weekday::WeekDay};

use super::store::{dedupe_by_name, RestaurantRecord, ScheduleStore};

/// Schedules kept in the `restaurant_hours` SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    connection_pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqliteStore {
    /// Wraps an existing pool and makes sure the hours table exists.
    pub fn setup(connection_pool: Arc<Pool<SqliteConnectionManager>>) -> Result<Self, StoreError> {
        let store = Self { connection_pool };
        let connection = store.get_connection()?;
        SqliteDatabase::create_table(&connection)?;
        Ok(store)
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().build(manager)?;
        Self::setup(Arc::new(pool))
    }

    fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.connection_pool.get()?)
    }
}

impl ScheduleStore for SqliteStore {
    /// Replaces the table content inside one transaction.
    fn bulk_load(&self, records: Vec<RestaurantRecord>) -> Result<(), StoreError> {
        let mut connection = self.get_connection()?;
        let transaction = connection.transaction()?;
        SqliteDatabase::delete_all(&transaction)?;
        for (name, schedule) in dedupe_by_name(records) {
            SqliteDatabase::insert_schedule(&transaction, &name, &schedule)?;
        }
        transaction.commit()?;
        debug!("Committed hours table reload");
        Ok(())
    }

    fn open_same_day(&self, day: WeekDay, now: NaiveTime) -> Result<Vec<String>, StoreError> {
        let connection = self.get_connection()?;
        Ok(SqliteDatabase::query_same_day(&connection, day, now)?)
    }

    fn open_overnight(
        &self,
        previous_day: WeekDay,
        now: NaiveTime,
    ) -> Result<Vec<String>, StoreError> {
        let connection = self.get_connection()?;
        Ok(SqliteDatabase::query_overnight(&connection, previous_day, now)?)
    }

    fn len(&self) -> Result<usize, StoreError> {
        let connection = self.get_connection()?;
        Ok(SqliteDatabase::count_restaurants(&connection)?)
    }
}
