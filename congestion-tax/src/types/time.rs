use std::fmt::Display;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};

const MINS_IN_HOUR: u16 = 60;
pub(crate) const MINS_IN_DAY: u16 = 24 * MINS_IN_HOUR;

/// A local time of day with minute resolution, as used by fee schedules.
///
/// Converting a [`NaiveTime`] truncates its seconds, so a passage at `06:29:59` falls in a
/// schedule entry ending at `06:29`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub struct ScheduleTime(u16);

impl ScheduleTime {
    /// Midnight, the first minute of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// The last minute of the day, `23:59`.
    pub const LAST_MINUTE: Self = Self(MINS_IN_DAY - 1);

    #[must_use]
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < MINS_IN_HOUR).then(|| Self(hour * MINS_IN_HOUR + minute))
    }

    pub(crate) const fn from_minute_of_day(minute: u16) -> Self {
        Self(minute % MINS_IN_DAY)
    }

    /// Number of minutes since midnight.
    #[must_use]
    pub const fn minute_of_day(self) -> u16 {
        self.0
    }

    /// The minute directly after this one, wrapping around midnight.
    #[must_use]
    pub const fn succ(self) -> Self {
        Self::from_minute_of_day(self.0 + 1)
    }

    #[must_use]
    pub fn hour(self) -> u16 {
        self.0 / MINS_IN_HOUR
    }

    #[must_use]
    pub fn minute(self) -> u16 {
        self.0 % MINS_IN_HOUR
    }
}

impl From<NaiveTime> for ScheduleTime {
    #[allow(clippy::cast_possible_truncation)]
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl Display for ScheduleTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0>2}:{:0>2}", self.hour(), self.minute())
    }
}

impl<'de> Deserialize<'de> for ScheduleTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = <String as Deserialize>::deserialize(deserializer)?;
        let time = NaiveTime::parse_from_str(&s, "%H:%M").map_err(D::Error::custom)?;

        Ok(time.into())
    }
}

impl Serialize for ScheduleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Days of the week.
#[derive(Debug, Copy, PartialEq, Eq, Clone, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

#[cfg(test)]
mod schedule_time_tests {
    use chrono::NaiveTime;

    use super::ScheduleTime;

    #[test]
    fn seconds_should_be_truncated() {
        let time = NaiveTime::from_hms_opt(6, 29, 59).unwrap();
        assert_eq!(ScheduleTime::from(time), ScheduleTime::new(6, 29).unwrap());
    }

    #[test]
    fn last_minute_should_wrap_to_midnight() {
        assert_eq!(ScheduleTime::LAST_MINUTE.succ(), ScheduleTime::MIDNIGHT);
    }

    #[test]
    fn out_of_range_components_should_be_rejected() {
        assert!(ScheduleTime::new(24, 0).is_none());
        assert!(ScheduleTime::new(23, 60).is_none());
    }

    #[test]
    fn display_should_pad_with_zeroes() {
        assert_eq!(ScheduleTime::new(6, 5).unwrap().to_string(), "06:05");
    }

    #[test]
    fn deserialize_from_hours_and_minutes() {
        let time: ScheduleTime = serde_json::from_str("\"18:30\"").unwrap();
        assert_eq!(time, ScheduleTime::new(18, 30).unwrap());
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"18:30\"");
    }
}
