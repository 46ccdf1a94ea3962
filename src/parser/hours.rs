use regex::Regex;

use crate::{
    error::ParseError,
    timing::{daily::Daily, schedule::Schedule, weekday::WeekDay},
};

use super::clock::ClockParser;

/// Turns an hours field such as `Mon-Fri 11 am - 10 pm / Sat, Sun 10 am - 11 pm`
/// into a weekly [`Schedule`].
///
/// Segments are separated by `/`. Each segment names its days either as a range
/// (`Mon-Thu`, optionally followed by more days: `Mon-Wed, Fri`) or as a plain
/// list (`Sat, Sun`), followed by an `open - close` time range. A day named in
/// a later segment replaces the window set by an earlier one.
pub struct HoursParser {
    clock: ClockParser,
    day_range_regex: Regex,
    day_regex: Regex,
}

impl HoursParser {
    pub fn new() -> Self {
        Self {
            clock: ClockParser::new(),
            day_range_regex: Regex::new(r"([a-zA-Z]+)-([a-zA-Z]+)").unwrap(),
            day_regex: Regex::new(r"Mon|Tues|Wed|Thu|Fri|Sat|Sun").unwrap(),
        }
    }

    pub fn parse(&self, hours: &str) -> Result<Schedule, ParseError> {
        let mut schedule = Schedule::new();
        for segment in hours.split('/') {
            let (days, timing) = self.parse_segment(segment)?;
            for day in days {
                schedule.set_timing(day, timing);
            }
        }
        Ok(schedule)
    }

    fn parse_segment(&self, segment: &str) -> Result<(Vec<WeekDay>, Daily), ParseError> {
        let days = self.parse_days(segment)?;
        let timing = self.parse_time_range(segment)?;
        Ok((days, timing))
    }

    fn parse_days(&self, segment: &str) -> Result<Vec<WeekDay>, ParseError> {
        let mut days = match self.day_range_regex.captures(segment) {
            Some(range) => WeekDay::range(
                WeekDay::from_abbreviation(&range[1])?,
                WeekDay::from_abbreviation(&range[2])?,
            ),
            None => Vec::new(),
        };

        // Standalone days, either alongside a range or as the whole list
        for day in self.day_regex.find_iter(segment) {
            let day = WeekDay::from_abbreviation(day.as_str())?;
            if !days.contains(&day) {
                days.push(day);
            }
        }

        if days.is_empty() {
            return Err(ParseError::EmptyDaySet(segment.trim().to_string()));
        }
        Ok(days)
    }

    fn parse_time_range(&self, segment: &str) -> Result<Daily, ParseError> {
        let Some(start) = segment.find(|c: char| c.is_ascii_digit()) else {
            return Err(ParseError::MissingTimeRange(segment.trim().to_string()));
        };

        let mut times = segment[start..].split('-');
        let opening = times.next().unwrap_or_default();
        let Some(closing) = times.next() else {
            return Err(ParseError::MissingCloseTime(segment.trim().to_string()));
        };

        Ok(Daily::new(
            self.clock.parse(opening.trim())?,
            self.clock.parse(closing.trim())?,
        ))
    }
}

impl Default for HoursParser {
    fn default() -> Self {
        Self::new()
    }
}
