//! # Congestion tax library
//!
//! Functionality to calculate the daily congestion tax owed by a vehicle that passed one or
//! more charge points. Use the [`calculator::Calculator`] to perform the actual calculation.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::types::time::ScheduleTime;

/// Module containing the functionality to aggregate the passages of a single day into a tax.
pub mod calculator;

/// Calendar of dates on which no congestion tax is charged.
pub mod calendar;

/// Configuration of the reference data used during calculation.
pub mod config;

/// Module for generating human readable fee schedules.
pub mod explain;

pub mod lint;

/// The immutable rule set and the resolution of a single passage into a fee.
pub mod rules;

/// Time of day fee schedules.
pub mod schedule;

/// Numeric and time types used for calculations, serializing and deserializing.
pub mod types;

pub mod vehicle;

type Result<T> = std::result::Result<T, Error>;

/// Possible errors when calculating a congestion tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No entry of the fee schedule contains the time of a passage.
    ///
    /// A valid schedule partitions the whole day. Schedules validated with
    /// [`rules::TaxRules::new`] never produce this error.
    ScheduleNotExhaustive {
        /// Time of day that could not be resolved.
        time: NaiveTime,
    },
    /// The fee schedule leaves part of the day uncovered.
    ScheduleGap {
        /// First uncovered minute.
        start: ScheduleTime,
        /// Last uncovered minute.
        end: ScheduleTime,
    },
    /// Two or more fee schedule entries cover the same part of the day.
    ScheduleOverlap {
        /// First minute covered more than once.
        start: ScheduleTime,
        /// Last minute covered more than once.
        end: ScheduleTime,
    },
    /// A vehicle type tag that is not part of the known classification.
    UnknownVehicleType(String),
    /// The passages provided to a single daily calculation span more than one calendar date.
    MixedDays {
        /// Date of the earliest passage.
        first: NaiveDate,
        /// A later date found among the passages.
        other: NaiveDate,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScheduleNotExhaustive { time } => {
                write!(f, "No fee schedule entry contains the time {time}")
            }
            Self::ScheduleGap { start, end } => {
                write!(f, "The fee schedule does not cover {start} to {end}")
            }
            Self::ScheduleOverlap { start, end } => {
                write!(f, "The fee schedule covers {start} to {end} more than once")
            }
            Self::UnknownVehicleType(tag) => write!(f, "Unknown vehicle type `{tag}`"),
            Self::MixedDays { first, other } => write!(
                f,
                "Passages of a single day calculation span both {first} and {other}"
            ),
        }
    }
}
