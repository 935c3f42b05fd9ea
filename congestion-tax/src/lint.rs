use std::fmt::Display;

use crate::{
    schedule::FeeScheduleEntry,
    types::time::{ScheduleTime, MINS_IN_DAY},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No entry covers the minutes from `start` to `end`.
    Gap {
        start: ScheduleTime,
        end: ScheduleTime,
    },
    /// All entries in `entry_indices` cover the minutes from `start` to `end`.
    Overlap {
        entry_indices: Vec<usize>,
        start: ScheduleTime,
        end: ScheduleTime,
    },
    /// The entry at `second_index` directly follows the one at `first_index` and charges the
    /// same fee.
    FeesCanBeMerged {
        first_index: usize,
        second_index: usize,
    },
}

impl Warning {
    /// Whether a schedule with this warning fails to partition the day.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Gap { .. } | Self::Overlap { .. })
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gap { start, end } => write!(
                f,
                "No entry covers {start} to {end}, consider adding an entry for this period."
            ),
            Self::Overlap {
                entry_indices,
                start,
                end,
            } => {
                let entries = entry_indices
                    .iter()
                    .map(|index| format!("`$.schedule[{index}]`"))
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "Entries {entries} all cover {start} to {end}.")
            }
            Self::FeesCanBeMerged {
                first_index,
                second_index,
            } => write!(
                f,
                "Entries at `$.schedule[{first_index}]` and `$.schedule[{second_index}]` are \
                   adjacent and charge the same fee, consider merging them."
            ),
        }
    }
}

/// Lint the provided schedule entries and produce a set of relevant warnings.
pub fn lint(entries: &[FeeScheduleEntry]) -> Vec<Warning> {
    let mut warnings = lint_coverage(entries);
    lint_mergeable(entries, &mut warnings);
    warnings
}

/// Report every run of minutes that is covered by no entry or by more than one.
fn lint_coverage(entries: &[FeeScheduleEntry]) -> Vec<Warning> {
    let mut covering = vec![Vec::new(); usize::from(MINS_IN_DAY)];

    for (entry_index, entry) in entries.iter().enumerate() {
        for minute in entry.minutes() {
            covering[usize::from(minute)].push(entry_index);
        }
    }

    let mut warnings = Vec::new();
    let mut minute = 0;

    while minute < covering.len() {
        let indices = &covering[minute];

        if indices.len() == 1 {
            minute += 1;
            continue;
        }

        let start = minute;

        while minute + 1 < covering.len() && covering[minute + 1] == *indices {
            minute += 1;
        }

        let start = minute_of_day(start);
        let end = minute_of_day(minute);

        if indices.is_empty() {
            warnings.push(Warning::Gap { start, end });
        } else {
            warnings.push(Warning::Overlap {
                entry_indices: indices.clone(),
                start,
                end,
            });
        }

        minute += 1;
    }

    warnings
}

/// Report neighbouring entries that charge the same fee.
fn lint_mergeable(entries: &[FeeScheduleEntry], warnings: &mut Vec<Warning>) {
    let mut ordered = entries.iter().enumerate().collect::<Vec<_>>();
    ordered.sort_by_key(|(_, entry)| entry.start_time);

    // The last entry also neighbours the first one across midnight.
    let Some(&head) = ordered.first() else {
        return;
    };

    for (&(first_index, first), &(second_index, second)) in ordered
        .iter()
        .zip(ordered.iter().skip(1).chain(std::iter::once(&head)))
    {
        if first_index != second_index
            && first.end_time.succ() == second.start_time
            && first.fee == second.fee
        {
            warnings.push(Warning::FeesCanBeMerged {
                first_index,
                second_index,
            });
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn minute_of_day(minute: usize) -> ScheduleTime {
    ScheduleTime::from_minute_of_day(minute as u16)
}
