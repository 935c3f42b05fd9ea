use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::{
    rules::{FeeReason, TaxRules},
    types::fee::Fee,
    vehicle::{Vehicle, VehicleType},
    Error, Result,
};

/// Calculator that aggregates the passages of one vehicle during one day into a congestion tax.
/// To run the calculator call `daily_tax`, or `build_report` for a breakdown per charging window.
///
/// ```ignore
/// let calculator = Calculator::gothenburg();
/// let tax = calculator.daily_tax(Some(&Vehicle::new(VehicleType::Car)), &passages)?;
/// ```
///
/// Passages are grouped into charging windows. A window starts at the earliest passage not yet
/// in a window and contains every later passage within the window length of that first
/// passage. The window is charged the highest fee among its passages. The start of a window
/// never moves, so passages that are close to each other can still end up in different windows
/// when the first one is near the end of a window.
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'r> {
    rules: &'r TaxRules,
}

impl Calculator<'static> {
    /// Instantiate the calculator with the shared Gothenburg rules.
    #[must_use]
    pub fn gothenburg() -> Self {
        Self::new(TaxRules::gothenburg())
    }
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Self::gothenburg()
    }
}

impl<'r> Calculator<'r> {
    #[must_use]
    pub fn new(rules: &'r TaxRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &'r TaxRules {
        self.rules
    }

    /// The tax owed for `passages`, which are local date times on a single calendar day in any
    /// order.
    ///
    /// A missing `vehicle` is taxed like a car.
    pub fn daily_tax(
        &self,
        vehicle: Option<&Vehicle>,
        passages: &[NaiveDateTime],
    ) -> Result<Fee> {
        self.build_report(vehicle, passages).map(|report| report.total)
    }

    /// Like [`Calculator::daily_tax`] but for zoned timestamps, which are first converted to the
    /// local time of the charge points.
    pub fn daily_tax_zoned<T: TimeZone>(
        &self,
        vehicle: Option<&Vehicle>,
        passages: &[DateTime<T>],
    ) -> Result<Fee> {
        let passages = passages
            .iter()
            .map(|date_time| self.rules.local_date_time(date_time))
            .collect::<Vec<_>>();

        self.daily_tax(vehicle, &passages)
    }

    /// Calculate the tax owed for `passages` and build a report containing the breakdown.
    pub fn build_report(
        &self,
        vehicle: Option<&Vehicle>,
        passages: &[NaiveDateTime],
    ) -> Result<Report> {
        let vehicle_type = vehicle.map(Vehicle::vehicle_type);

        let mut passages = passages.to_vec();
        passages.sort_unstable();

        let Some(date) = passages.first().map(NaiveDateTime::date) else {
            return Ok(Report::empty(vehicle_type));
        };

        if let Some(other) = passages
            .iter()
            .map(NaiveDateTime::date)
            .find(|other| *other != date)
        {
            return Err(Error::MixedDays { first: date, other });
        }

        let mut windows: Vec<WindowReport> = Vec::new();

        for date_time in passages {
            let resolution = self.rules.resolve(date_time, vehicle)?;
            let passage = PassageReport {
                date_time,
                fee: resolution.fee,
                reason: resolution.reason,
            };

            match windows.last_mut() {
                Some(window)
                    if date_time.signed_duration_since(window.start_date_time)
                        <= self.rules.window() =>
                {
                    window.push(passage);
                }
                _ => {
                    debug!(start = %date_time, fee = %passage.fee, "opening charging window");
                    windows.push(WindowReport::new(passage));
                }
            }
        }

        let total_before_cap = windows.iter().map(|window| window.charged).sum::<Fee>();
        let total = total_before_cap.min(self.rules.max_daily_fee());

        if total < total_before_cap {
            debug!(%total_before_cap, %total, "daily cap applied");
        }

        Ok(Report {
            vehicle_type,
            date: Some(date),
            windows,
            total_before_cap,
            total,
        })
    }
}

/// Structure containing the passages of a day grouped into charging windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The type of the vehicle, if one was provided.
    pub vehicle_type: Option<VehicleType>,
    /// The day of the passages, `None` when there were no passages.
    pub date: Option<NaiveDate>,
    /// Charging windows in chronological order.
    pub windows: Vec<WindowReport>,
    /// Sum of the charges of all windows.
    pub total_before_cap: Fee,
    /// The tax owed for the day, after applying the daily cap.
    pub total: Fee,
}

impl Report {
    fn empty(vehicle_type: Option<VehicleType>) -> Self {
        Self {
            vehicle_type,
            date: None,
            windows: Vec::new(),
            total_before_cap: Fee::zero(),
            total: Fee::zero(),
        }
    }

    /// Whether the daily cap lowered the total.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.total < self.total_before_cap
    }

    /// Number of passages in all windows.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.windows.iter().map(|window| window.passages.len()).sum()
    }
}

/// Passages charged once, at the highest fee among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowReport {
    /// The first passage of the window. The window covers passages up to the window length
    /// after this time.
    pub start_date_time: NaiveDateTime,
    /// Passages in this window in chronological order.
    pub passages: Vec<PassageReport>,
    /// The amount charged for the whole window.
    pub charged: Fee,
}

impl WindowReport {
    fn new(passage: PassageReport) -> Self {
        Self {
            start_date_time: passage.date_time,
            charged: passage.fee,
            passages: vec![passage],
        }
    }

    fn push(&mut self, passage: PassageReport) {
        self.charged = self.charged.max(passage.fee);
        self.passages.push(passage);
    }
}

/// A single passage with its resolved fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassageReport {
    pub date_time: NaiveDateTime,
    pub fee: Fee,
    pub reason: FeeReason,
}
