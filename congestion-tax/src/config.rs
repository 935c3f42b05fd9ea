//! Serializable description of the reference data: the fee schedule, the exempt vehicle types
//! and the toll-free calendar. Use [`crate::rules::TaxRules::new`] to validate a configuration
//! before calculating with it.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::TollFreeCalendar,
    schedule::{FeeSchedule, FeeScheduleEntry},
    types::{fee::Fee, time::DayOfWeek},
    vehicle::VehicleType,
};

/// The highest amount charged for a single day under the default rules.
pub const DEFAULT_MAX_DAILY_FEE: Fee = Fee::new(60);

/// Passages within this many minutes of the first passage of a window are charged once.
pub const DEFAULT_WINDOW_MINUTES: u32 = 60;

/// Every field is optional and falls back to the Gothenburg 2013 rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Time zone of the charge points, used to localize zoned passage timestamps.
    pub time_zone: Tz,
    /// Cap on the total charged for one day.
    pub max_daily_fee: Fee,
    /// Length of a charging window in minutes.
    pub window_minutes: u32,
    /// Vehicle types that are never charged.
    pub exempt_vehicle_types: Vec<VehicleType>,
    /// Entries that together cover every minute of the day exactly once.
    pub schedule: Vec<FeeScheduleEntry>,
    pub toll_free: TollFreeConfig,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            time_zone: Tz::Europe__Stockholm,
            max_daily_fee: DEFAULT_MAX_DAILY_FEE,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            exempt_vehicle_types: VehicleType::ALL
                .into_iter()
                .filter(|ty| ty.is_exempt_by_default())
                .collect(),
            schedule: FeeSchedule::gothenburg().entries().to_vec(),
            toll_free: TollFreeConfig::default(),
        }
    }
}

/// Dates on which no tax is charged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TollFreeConfig {
    /// Days of the week that are always toll-free.
    pub weekdays: Vec<DayOfWeek>,
    /// Individual toll-free dates.
    pub dates: Vec<NaiveDate>,
    /// Months during which every day is toll-free.
    pub months: Vec<TollFreeMonth>,
}

impl Default for TollFreeConfig {
    fn default() -> Self {
        Self {
            weekdays: vec![DayOfWeek::Saturday, DayOfWeek::Sunday],
            dates: TollFreeCalendar::gothenburg_2013()
                .dates()
                .iter()
                .copied()
                .collect(),
            months: vec![TollFreeMonth {
                year: 2013,
                month: 7,
            }],
        }
    }
}

impl From<&TollFreeConfig> for TollFreeCalendar {
    fn from(config: &TollFreeConfig) -> Self {
        Self::new(
            config.weekdays.iter().copied().map(Into::into),
            config.dates.iter().copied(),
            config.months.iter().map(|m| (m.year, m.month)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TollFreeMonth {
    pub year: i32,
    /// Month of the year, starting at 1 for January.
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;

    use super::{TaxConfig, TollFreeConfig};
    use crate::{calendar::TollFreeCalendar, types::fee::Fee, vehicle::VehicleType};

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: TaxConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TaxConfig::default());
    }

    #[test]
    fn default_toll_free_config_matches_gothenburg_calendar() {
        let calendar = TollFreeCalendar::from(&TollFreeConfig::default());
        assert_eq!(calendar, TollFreeCalendar::gothenburg_2013());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config: TaxConfig = serde_json::from_str(
            r#"{
                "time_zone": "Europe/Oslo",
                "max_daily_fee": 80,
                "exempt_vehicle_types": ["EMERGENCY", "BUSSES"],
                "toll_free": { "weekdays": ["SUNDAY"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.time_zone, Tz::Europe__Oslo);
        assert_eq!(config.max_daily_fee, Fee::new(80));
        assert_eq!(config.window_minutes, 60);
        assert_eq!(
            config.exempt_vehicle_types,
            vec![VehicleType::Emergency, VehicleType::Bus]
        );
        assert_eq!(config.toll_free.dates, TollFreeConfig::default().dates);
        assert_eq!(config.schedule, TaxConfig::default().schedule);
    }

    #[test]
    fn vehicle_tags_ignore_case() {
        let config: TaxConfig = serde_json::from_str(
            r#"{ "exempt_vehicle_types": ["Motorcycle", "Busses", "diplomat"] }"#,
        )
        .unwrap();

        assert_eq!(
            config.exempt_vehicle_types,
            vec![VehicleType::Motorcycle, VehicleType::Bus, VehicleType::Diplomat]
        );
    }
}
