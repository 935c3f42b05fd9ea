use std::ops::Range;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{
    lint::{lint, Warning},
    types::{
        fee::Fee,
        time::{ScheduleTime, MINS_IN_DAY},
    },
    Error, Result,
};

/// A fixed fee charged during a period of the day. Both bounds are inclusive.
///
/// An entry ending before it starts wraps around midnight, `18:30` to `05:59` covers the
/// evening and the early morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeeScheduleEntry {
    /// First minute of the day this entry applies to.
    pub start_time: ScheduleTime,
    /// Last minute of the day this entry applies to.
    pub end_time: ScheduleTime,
    /// The fee charged for a passage within this period.
    pub fee: Fee,
}

impl FeeScheduleEntry {
    #[must_use]
    pub fn new(start_time: ScheduleTime, end_time: ScheduleTime, fee: Fee) -> Self {
        Self {
            start_time,
            end_time,
            fee,
        }
    }

    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Checks if `time` is within this entry.
    #[must_use]
    pub fn contains(&self, time: ScheduleTime) -> bool {
        if self.wraps_midnight() {
            time >= self.start_time || time <= self.end_time
        } else {
            time >= self.start_time && time <= self.end_time
        }
    }

    /// The minutes of the day covered by this entry, as offsets from midnight.
    pub(crate) fn minutes(&self) -> impl Iterator<Item = u16> {
        let start = self.start_time.minute_of_day();
        let end = self.end_time.minute_of_day();

        let (evening, morning): (Range<u16>, Range<u16>) = if self.wraps_midnight() {
            (start..MINS_IN_DAY, 0..end + 1)
        } else {
            (start..end + 1, 0..0)
        };

        evening.chain(morning)
    }
}

/// A fee schedule that partitions the day into periods with a fixed fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    entries: Vec<FeeScheduleEntry>,
}

impl FeeSchedule {
    /// Create a schedule from `entries`, which must cover every minute of the day exactly once.
    pub fn new(entries: Vec<FeeScheduleEntry>) -> Result<Self> {
        for warning in lint(&entries) {
            match warning {
                Warning::Gap { start, end } => return Err(Error::ScheduleGap { start, end }),
                Warning::Overlap { start, end, .. } => {
                    return Err(Error::ScheduleOverlap { start, end })
                }
                Warning::FeesCanBeMerged { .. } => {}
            }
        }

        Ok(Self { entries })
    }

    /// The Gothenburg fee schedule.
    #[must_use]
    pub fn gothenburg() -> Self {
        const TABLE: [(u16, u16, u16, u16, u32); 10] = [
            (6, 0, 6, 29, 8),
            (6, 30, 6, 59, 13),
            (7, 0, 7, 59, 18),
            (8, 0, 8, 29, 13),
            (8, 30, 14, 59, 8),
            (15, 0, 15, 29, 13),
            (15, 30, 16, 59, 18),
            (17, 0, 17, 59, 13),
            (18, 0, 18, 29, 8),
            (18, 30, 5, 59, 0),
        ];

        let entries = TABLE
            .into_iter()
            .filter_map(|(start_hour, start_minute, end_hour, end_minute, fee)| {
                Some(FeeScheduleEntry::new(
                    ScheduleTime::new(start_hour, start_minute)?,
                    ScheduleTime::new(end_hour, end_minute)?,
                    Fee::new(fee),
                ))
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[FeeScheduleEntry] {
        &self.entries
    }

    /// The fee in effect at the time of day `time`. Seconds are ignored.
    pub fn fee_at(&self, time: NaiveTime) -> Result<Fee> {
        let minute = ScheduleTime::from(time);

        self.entries
            .iter()
            .find(|entry| entry.contains(minute))
            .map(|entry| entry.fee)
            .ok_or(Error::ScheduleNotExhaustive { time })
    }
}
