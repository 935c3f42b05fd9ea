use crate::{
    rules::TaxRules,
    schedule::{FeeSchedule, FeeScheduleEntry},
    types::fee::Fee,
};

#[derive(Debug)]
pub struct Explain {
    pub entries: Vec<ExplainEntry>,
    pub exempt_vehicle_types: Vec<String>,
    pub max_daily_fee: Fee,
    pub window_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainEntry {
    pub period: String,
    pub fee: Option<Fee>,
}

/// Explain the given rules.
pub fn explain(rules: &TaxRules) -> Explain {
    let mut exempt_vehicle_types = rules
        .exempt_vehicle_types()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    exempt_vehicle_types.sort();

    Explain {
        entries: explain_schedule(rules.fee_schedule()),
        exempt_vehicle_types,
        max_daily_fee: rules.max_daily_fee(),
        window_minutes: rules.window().num_minutes(),
    }
}

/// Explain the entries of a schedule in chronological order, starting with the first entry
/// after midnight.
pub fn explain_schedule(schedule: &FeeSchedule) -> Vec<ExplainEntry> {
    let mut entries = schedule.entries().to_vec();
    entries.sort_by_key(|entry| entry.start_time);

    entries.iter().map(explain_entry).collect()
}

/// Explain a single entry. Free periods have no fee.
pub fn explain_entry(entry: &FeeScheduleEntry) -> ExplainEntry {
    let period = if entry.wraps_midnight() {
        format!(
            "between {} and {} (overnight)",
            entry.start_time, entry.end_time
        )
    } else {
        format!("between {} and {}", entry.start_time, entry.end_time)
    };

    ExplainEntry {
        period,
        fee: (!entry.fee.is_zero()).then_some(entry.fee),
    }
}

#[cfg(test)]
mod tests {
    use super::{explain, explain_schedule, ExplainEntry};
    use crate::{rules::TaxRules, schedule::FeeSchedule, types::fee::Fee};

    #[test]
    fn gothenburg_schedule() {
        let entries = explain_schedule(&FeeSchedule::gothenburg());

        assert_eq!(entries.len(), 10);
        assert_eq!(
            entries[0],
            ExplainEntry {
                period: "between 06:00 and 06:29".to_owned(),
                fee: Some(Fee::new(8)),
            }
        );
        assert_eq!(
            entries[9],
            ExplainEntry {
                period: "between 18:30 and 05:59 (overnight)".to_owned(),
                fee: None,
            }
        );
    }

    #[test]
    fn gothenburg_rules() {
        let explained = explain(TaxRules::gothenburg());

        assert_eq!(explained.max_daily_fee, Fee::new(60));
        assert_eq!(explained.window_minutes, 60);
        assert_eq!(
            explained.exempt_vehicle_types,
            vec!["Bus", "Diplomat", "Emergency", "Foreign", "Military", "Motorcycle"]
        );
    }
}
