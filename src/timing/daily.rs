use chrono::NaiveTime;

/// Opening window for one day. A `closing` earlier than `opening` runs past
/// midnight into the next day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Daily {
    opening: NaiveTime,
    closing: NaiveTime,
}

impl Daily {
    pub fn new(opening: NaiveTime, closing: NaiveTime) -> Self {
        Self { opening, closing }
    }

    pub fn opening(&self) -> NaiveTime {
        self.opening
    }

    pub fn closing(&self) -> NaiveTime {
        self.closing
    }

    pub fn is_overnight(&self) -> bool {
        self.closing < self.opening
    }

    /// Inclusive on both ends. Overnight windows never match here.
    pub fn contains(&self, now: NaiveTime) -> bool {
        !self.is_overnight() && self.opening <= now && now <= self.closing
    }

    /// Whether a window that started the day before is still running at `now`.
    ///
    /// A close of exactly midnight does not extend into the next day.
    pub fn continues_past_midnight_until(&self, now: NaiveTime) -> bool {
        self.is_overnight() && self.closing != NaiveTime::MIN && now < self.closing
    }
}
