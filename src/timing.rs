pub mod daily;
pub mod open_now;
pub mod schedule;
pub mod weekday;
