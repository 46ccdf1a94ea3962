pub mod clock;
pub mod hours;
