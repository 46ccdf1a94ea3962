use chrono::{Datelike, NaiveDateTime};
use log::trace;

use crate::{error::StoreError, store::store::ScheduleStore};

use super::weekday::WeekDay;

/// Restaurants open at `at`.
///
/// Windows on `at`'s own weekday are checked first. Only when none of them
/// match are the previous day's overnight windows consulted, so the result
/// comes from one pass or the other, never both.
pub fn open_restaurants(
    store: &dyn ScheduleStore,
    at: NaiveDateTime,
) -> Result<Vec<String>, StoreError> {
    let day = WeekDay::from(at.weekday());
    let now = at.time();

    let same_day = store.open_same_day(day, now)?;
    if !same_day.is_empty() {
        trace!("{} open on {} at {}", same_day.len(), day, now);
        return Ok(same_day);
    }

    let previous_day = day.previous();
    let overnight = store.open_overnight(previous_day, now)?;
    trace!(
        "{} still open from {} at {} {}",
        overnight.len(),
        previous_day,
        day,
        now
    );
    Ok(overnight)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{parser::hours::HoursParser, store::memory::MemoryStore};

    fn at(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // 2024-01-05 is a Friday
    const FRIDAY: (i32, u32, u32) = (2024, 1, 5);
    const SATURDAY: (i32, u32, u32) = (2024, 1, 6);
    const SUNDAY: (i32, u32, u32) = (2024, 1, 7);
    const MONDAY: (i32, u32, u32) = (2024, 1, 8);

    fn store(rows: &[(&str, &str)]) -> MemoryStore {
        let parser = HoursParser::new();
        let store = MemoryStore::new();
        store
            .bulk_load(
                rows.iter()
                    .map(|(name, hours)| (name.to_string(), parser.parse(hours).unwrap()))
                    .collect(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_a_and_b_example() {
        let store = store(&[("A", "Mon-Fri 11 AM-10 PM"), ("B", "Sun-Sat 12 AM-11:59 PM")]);
        assert_eq!(
            open_restaurants(&store, at(MONDAY, 12, 0)).unwrap(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(
            open_restaurants(&store, at(SUNDAY, 23, 0)).unwrap(),
            vec!["B".to_string()]
        );
    }

    #[test]
    fn test_overnight_window_after_midnight() {
        let store = store(&[("Night Owl", "Fri 10 pm - 2 am")]);
        assert_eq!(
            open_restaurants(&store, at(SATURDAY, 1, 0)).unwrap(),
            vec!["Night Owl".to_string()]
        );
        assert!(open_restaurants(&store, at(SATURDAY, 2, 30)).unwrap().is_empty());
    }

    #[test]
    fn test_overnight_window_not_open_on_its_own_evening() {
        // The Friday row crosses midnight, so Friday's own pass skips it and
        // Thursday has no overnight window to fall back on.
        let store = store(&[("Night Owl", "Fri 10 pm - 2 am")]);
        assert!(open_restaurants(&store, at(FRIDAY, 23, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_same_day_match_hides_overnight_match() {
        let store = store(&[
            ("Night Owl", "Fri 10 pm - 2 am"),
            ("Early Bird", "Sat 12 am - 6 am"),
        ]);
        assert_eq!(
            open_restaurants(&store, at(SATURDAY, 1, 0)).unwrap(),
            vec!["Early Bird".to_string()]
        );
    }

    #[test]
    fn test_sunday_falls_back_to_saturday() {
        let store = store(&[("Weekend", "Sat 8 pm - 3 am")]);
        assert_eq!(
            open_restaurants(&store, at(SUNDAY, 2, 59)).unwrap(),
            vec!["Weekend".to_string()]
        );
    }

    #[test]
    fn test_midnight_close_never_continues() {
        let store = store(&[("Zero", "Fri 12 am - 12 am"), ("Evening", "Fri 5 pm - 12 am")]);
        assert!(open_restaurants(&store, at(SATURDAY, 0, 0)).unwrap().is_empty());
        assert!(open_restaurants(&store, at(FRIDAY, 20, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_seconds_past_close() {
        let store = store(&[("A", "Mon 11 am - 10 pm")]);
        let just_after = at(MONDAY, 22, 0) + chrono::Duration::seconds(30);
        assert!(open_restaurants(&store, just_after).unwrap().is_empty());
    }
}
