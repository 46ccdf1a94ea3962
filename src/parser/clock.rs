use chrono::NaiveTime;
use regex::Regex;

use crate::error::ParseError;

/// Reads 12-hour clock tokens such as `11 am` or `11:30 PM`.
pub struct ClockParser {
    clock_regex: Regex,
}

impl ClockParser {
    pub fn new() -> Self {
        Self {
            clock_regex: Regex::new(r"^(\d{1,2})(?::(\d{1,2}))?\s*([AaPp][Mm])$").unwrap(),
        }
    }

    /// Converts a 12-hour token to a 24-hour time with zero seconds.
    ///
    /// 12 AM is midnight and 12 PM is noon. Minutes default to zero.
    pub fn parse(&self, token: &str) -> Result<NaiveTime, ParseError> {
        let invalid = || ParseError::InvalidTime(token.to_string());
        let captures = self.clock_regex.captures(token.trim()).ok_or_else(invalid)?;

        let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
        let minute: u32 = match captures.get(2) {
            Some(minute) => minute.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(invalid());
        }

        let hour = match (hour, captures[3].eq_ignore_ascii_case("pm")) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, false) => hour,
            (hour, true) => hour + 12,
        };
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
    }
}

impl Default for ClockParser {
    fn default() -> Self {
        Self::new()
    }
}
