use chrono::NaiveTime;
use rusqlite::Connection;

use crate::{
    timing::{schedule::Schedule, weekday::WeekDay},
    TIME_FORMAT,
};

pub const HOURS_TABLE: &str = "restaurant_hours";

pub struct SqliteDatabase {}

impl SqliteDatabase {
    /**
    Create the hours table if it does not exist yet.

    One row per restaurant per day. Times are stored as `HH:MM:SS` text so that
    plain string comparison orders them correctly.
    */
    pub fn create_table(connection: &Connection) -> rusqlite::Result<()> {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    restaurant_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    restaurant_name TEXT NOT NULL,
                    day_of_week TEXT NOT NULL,
                    open_time TEXT NOT NULL,
                    close_time TEXT NOT NULL
                )",
                HOURS_TABLE
            ),
            (),
        )?;
        Ok(())
    }

    /**
    Delete every row. Used before a reload.
    */
    pub fn delete_all(connection: &Connection) -> rusqlite::Result<()> {
        connection.execute(&format!("DELETE FROM {}", HOURS_TABLE), ())?;
        Ok(())
    }

    /**
    Insert every day of one restaurant's schedule.
    */
    pub fn insert_schedule(
        connection: &Connection,
        name: &str,
        schedule: &Schedule,
    ) -> rusqlite::Result<()> {
        let mut statement = connection.prepare_cached(&format!(
            "INSERT INTO {} (restaurant_name, day_of_week, open_time, close_time)
             VALUES (?1, ?2, ?3, ?4)",
            HOURS_TABLE
        ))?;

        for (day, timing) in schedule.timings() {
            statement.execute(rusqlite::params![
                name,
                day.as_str(),
                timing.opening().format(TIME_FORMAT).to_string(),
                timing.closing().format(TIME_FORMAT).to_string(),
            ])?;
        }
        Ok(())
    }

    /**
    Restaurants whose own window on `day` contains `now`, both ends inclusive.

    Windows that run past midnight are left out.
    */
    pub fn query_same_day(
        connection: &Connection,
        day: WeekDay,
        now: NaiveTime,
    ) -> rusqlite::Result<Vec<String>> {
        let mut statement = connection.prepare_cached(&format!(
            "SELECT restaurant_name FROM {}
             WHERE day_of_week = ?1
               AND open_time <= close_time
               AND ?2 BETWEEN open_time AND close_time
             GROUP BY restaurant_name
             ORDER BY MIN(restaurant_id)",
            HOURS_TABLE
        ))?;

        let rows = statement.query_map(
            rusqlite::params![day.as_str(), now.format(TIME_FORMAT).to_string()],
            |row| row.get::<_, String>(0),
        )?;
        rows.collect()
    }

    /**
    Restaurants whose window on `previous_day` crossed midnight and has not
    closed yet at `now`.

    A close of exactly `00:00:00` does not count as running into the next day.
    */
    pub fn query_overnight(
        connection: &Connection,
        previous_day: WeekDay,
        now: NaiveTime,
    ) -> rusqlite::Result<Vec<String>> {
        let mut statement = connection.prepare_cached(&format!(
            "SELECT restaurant_name FROM {}
             WHERE day_of_week = ?1
               AND close_time < open_time
               AND close_time <> '00:00:00'
               AND close_time > ?2
             GROUP BY restaurant_name
             ORDER BY MIN(restaurant_id)",
            HOURS_TABLE
        ))?;

        let rows = statement.query_map(
            rusqlite::params![previous_day.as_str(), now.format(TIME_FORMAT).to_string()],
            |row| row.get::<_, String>(0),
        )?;
        rows.collect()
    }

    /**
    Number of distinct restaurants in the table.
    */
    pub fn count_restaurants(connection: &Connection) -> rusqlite::Result<usize> {
        let count: i64 = connection.query_row(
            &format!(
                "SELECT COUNT(DISTINCT restaurant_name) FROM {}",
                HOURS_TABLE
            ),
            (),
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
