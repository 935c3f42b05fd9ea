use std::{collections::HashSet, sync::OnceLock};

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::trace;

use crate::{
    calendar::TollFreeCalendar,
    config::{TaxConfig, DEFAULT_MAX_DAILY_FEE, DEFAULT_WINDOW_MINUTES},
    schedule::{FeeSchedule, FeeScheduleEntry},
    types::fee::Fee,
    vehicle::{Vehicle, VehicleType},
    Result,
};

static GOTHENBURG: OnceLock<TaxRules> = OnceLock::new();

/// The validated, immutable reference data a calculation is performed against.
///
/// Build one from a [`TaxConfig`] with [`TaxRules::new`], or use the shared Gothenburg rules
/// through [`TaxRules::gothenburg`].
#[derive(Debug, Clone)]
pub struct TaxRules {
    time_zone: Tz,
    max_daily_fee: Fee,
    window: Duration,
    exempt_vehicle_types: HashSet<VehicleType>,
    schedule: FeeSchedule,
    calendar: TollFreeCalendar,
}

impl TaxRules {
    /// Validate `config` and freeze it into a rule set.
    ///
    /// Fails if the schedule does not cover every minute of the day exactly once.
    pub fn new(config: &TaxConfig) -> Result<Self> {
        Ok(Self {
            time_zone: config.time_zone,
            max_daily_fee: config.max_daily_fee,
            window: Duration::minutes(i64::from(config.window_minutes)),
            exempt_vehicle_types: config.exempt_vehicle_types.iter().copied().collect(),
            schedule: FeeSchedule::new(config.schedule.clone())?,
            calendar: (&config.toll_free).into(),
        })
    }

    /// The Gothenburg 2013 rules, shared by the whole process and built on first use.
    pub fn gothenburg() -> &'static Self {
        GOTHENBURG.get_or_init(Self::gothenburg_2013)
    }

    fn gothenburg_2013() -> Self {
        Self {
            time_zone: Tz::Europe__Stockholm,
            max_daily_fee: DEFAULT_MAX_DAILY_FEE,
            window: Duration::minutes(i64::from(DEFAULT_WINDOW_MINUTES)),
            exempt_vehicle_types: VehicleType::ALL
                .into_iter()
                .filter(|ty| ty.is_exempt_by_default())
                .collect(),
            schedule: FeeSchedule::gothenburg(),
            calendar: TollFreeCalendar::gothenburg_2013(),
        }
    }

    #[must_use]
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    #[must_use]
    pub fn max_daily_fee(&self) -> Fee {
        self.max_daily_fee
    }

    /// Passages within this duration of the start of a window are charged once.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    #[must_use]
    pub fn fee_schedule_entries(&self) -> &[FeeScheduleEntry] {
        self.schedule.entries()
    }

    #[must_use]
    pub fn exempt_vehicle_types(&self) -> &HashSet<VehicleType> {
        &self.exempt_vehicle_types
    }

    #[must_use]
    pub fn toll_free_calendar(&self) -> &TollFreeCalendar {
        &self.calendar
    }

    /// The local wall clock time at the charge points for a zoned timestamp.
    #[must_use]
    pub fn local_date_time<T: TimeZone>(&self, date_time: &DateTime<T>) -> NaiveDateTime {
        date_time.with_timezone(&self.time_zone).naive_local()
    }

    /// Whether `vehicle` is never charged. A missing vehicle is not exempt.
    #[must_use]
    pub fn is_exempt(&self, vehicle: Option<&Vehicle>) -> bool {
        vehicle.is_some_and(|v| self.exempt_vehicle_types.contains(&v.vehicle_type()))
    }

    /// Resolve the fee of a single passage at the local time `date_time`, together with the
    /// reason for it.
    pub fn resolve(
        &self,
        date_time: NaiveDateTime,
        vehicle: Option<&Vehicle>,
    ) -> Result<Resolution> {
        let resolution = if self.is_exempt(vehicle) {
            Resolution::free(FeeReason::ExemptVehicle)
        } else if self.calendar.is_toll_free(date_time.date()) {
            Resolution::free(FeeReason::TollFreeDate)
        } else {
            Resolution {
                fee: self.schedule.fee_at(date_time.time())?,
                reason: FeeReason::Schedule,
            }
        };

        trace!(
            %date_time,
            fee = %resolution.fee,
            reason = ?resolution.reason,
            "resolved passage"
        );

        Ok(resolution)
    }

    /// The fee of a single passage at the local time `date_time`.
    pub fn resolve_fee(
        &self,
        date_time: NaiveDateTime,
        vehicle: Option<&Vehicle>,
    ) -> Result<Fee> {
        self.resolve(date_time, vehicle).map(|r| r.fee)
    }
}

/// Why a passage was charged the fee it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeReason {
    /// The fee of the schedule entry containing the time of the passage.
    Schedule,
    ExemptVehicle,
    TollFreeDate,
}

/// The fee of a single passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub fee: Fee,
    pub reason: FeeReason,
}

impl Resolution {
    fn free(reason: FeeReason) -> Self {
        Self {
            fee: Fee::zero(),
            reason,
        }
    }
}
