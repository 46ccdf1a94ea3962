use std::fmt::Display;

use chrono::Weekday;

use crate::error::ParseError;

/// Day of the week as it is written in hours text.
///
/// The week starts on Sunday. Tuesday is spelled `Tues`, every other day uses
/// three letters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekDay {
    Sun,
    Mon,
    Tues,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sun,
        WeekDay::Mon,
        WeekDay::Tues,
        WeekDay::Wed,
        WeekDay::Thu,
        WeekDay::Fri,
        WeekDay::Sat,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekDay::Sun => "Sun",
            WeekDay::Mon => "Mon",
            WeekDay::Tues => "Tues",
            WeekDay::Wed => "Wed",
            WeekDay::Thu => "Thu",
            WeekDay::Fri => "Fri",
            WeekDay::Sat => "Sat",
        }
    }

    /// Exact abbreviation lookup, used for the ends of a `Mon-Fri` range.
    pub fn from_abbreviation(text: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == text)
            .ok_or_else(|| ParseError::UnknownDay(text.to_string()))
    }

    /// The day before, wrapping Sunday back to Saturday.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 6) % 7]
    }

    /// Every day from `start` to `end` inclusive, walking forward through the week.
    ///
    /// There is no wraparound: when `start` comes after `end` (`Fri-Mon`) the
    /// result is empty.
    pub fn range(start: WeekDay, end: WeekDay) -> Vec<WeekDay> {
        if start.index() > end.index() {
            return Vec::new();
        }
        Self::ALL[start.index()..=end.index()].to_vec()
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
