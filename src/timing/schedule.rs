use chrono::NaiveTime;

use super::{daily::Daily, weekday::WeekDay};

/// A restaurant's week, at most one window per day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    timings: [Option<Daily>; 7],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window for `day`, replacing any earlier one.
    pub fn set_timing(&mut self, day: WeekDay, timing: Daily) {
        self.timings[day.index()] = Some(timing);
    }

    pub fn timing(&self, day: WeekDay) -> Option<Daily> {
        self.timings[day.index()]
    }

    /// Days with a window, in week order.
    pub fn timings(&self) -> impl Iterator<Item = (WeekDay, Daily)> + '_ {
        WeekDay::ALL
            .into_iter()
            .filter_map(|day| self.timing(day).map(|timing| (day, timing)))
    }

    pub fn is_open_same_day(&self, day: WeekDay, now: NaiveTime) -> bool {
        self.timing(day).is_some_and(|daily| daily.contains(now))
    }

    pub fn is_open_overnight(&self, previous_day: WeekDay, now: NaiveTime) -> bool {
        self.timing(previous_day)
            .is_some_and(|daily| daily.continues_past_midnight_until(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_set_timing_overwrites() {
        let mut schedule = Schedule::new();
        schedule.set_timing(WeekDay::Mon, Daily::new(hm(9, 0), hm(17, 0)));
        schedule.set_timing(WeekDay::Mon, Daily::new(hm(10, 0), hm(18, 0)));
        assert_eq!(
            schedule.timing(WeekDay::Mon),
            Some(Daily::new(hm(10, 0), hm(18, 0)))
        );
        assert_eq!(schedule.timings().count(), 1);
    }

    #[test]
    fn test_open_checks_only_the_given_day() {
        let mut schedule = Schedule::new();
        schedule.set_timing(WeekDay::Fri, Daily::new(hm(22, 0), hm(2, 0)));
        assert!(!schedule.is_open_same_day(WeekDay::Fri, hm(23, 0)));
        assert!(schedule.is_open_overnight(WeekDay::Fri, hm(1, 0)));
        assert!(!schedule.is_open_overnight(WeekDay::Thu, hm(1, 0)));
        assert!(!schedule.is_open_same_day(WeekDay::Sat, hm(1, 0)));
    }
}
