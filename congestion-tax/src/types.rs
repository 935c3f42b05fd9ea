/// The integer amount charged for a passage or a day.
pub mod fee;

/// Time of day types and days of the week.
pub mod time;
