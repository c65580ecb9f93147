mod buckets;
mod period;
pub mod views;

pub use buckets::{MonthBucket, MonthStats};
pub use period::{month_end, month_start, months_between, MonthWindow};

use super::derivation::{derive_units, DerivedUnit};
use super::domain::HousingUnit;
use crate::config::KpiConfig;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Selects the months a KPI run covers and the date treated as "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiQuery {
    pub start_month: Option<NaiveDate>,
    pub end_month: Option<NaiveDate>,
    pub last_n_months: u32,
    pub today: NaiveDate,
    pub epoch: NaiveDate,
}

impl KpiQuery {
    /// Default window as of `today`.
    pub fn as_of(today: NaiveDate) -> Self {
        Self::with_config(today, &KpiConfig::default())
    }

    pub fn with_config(today: NaiveDate, config: &KpiConfig) -> Self {
        Self {
            start_month: None,
            end_month: None,
            last_n_months: config.months_back,
            today,
            epoch: config.epoch,
        }
    }

    /// Default window as of the local wall clock.
    pub fn today() -> Self {
        Self::as_of(Local::now().date_naive())
    }

    pub fn between(mut self, start_month: NaiveDate, end_month: NaiveDate) -> Self {
        self.start_month = Some(start_month);
        self.end_month = Some(end_month);
        self
    }

    pub fn last_months(mut self, months: u32) -> Self {
        self.last_n_months = months;
        self
    }

    /// Months the query covers, oldest first.
    pub fn months(&self) -> Vec<MonthWindow> {
        let start = match self.start_month {
            Some(start) => month_start(start),
            None => match period::default_window_start(self.today, self.last_n_months, self.epoch)
            {
                Some(start) => start,
                None => return Vec::new(),
            },
        };
        let end = month_end(self.end_month.unwrap_or(self.today));

        months_between(start, end)
    }
}

/// Derived units plus one bucket per requested month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub units: Vec<DerivedUnit>,
    pub stats: Vec<MonthBucket>,
}

/// Derives every unit and rolls them into monthly buckets.
///
/// The input slice is read only; the report owns fresh derived copies.
pub fn aggregate(units: &[HousingUnit], query: &KpiQuery) -> KpiReport {
    let derived = derive_units(units, query.today);
    let months = query.months();

    tracing::debug!(
        units = derived.len(),
        months = months.len(),
        first = ?months.first().map(MonthWindow::label),
        last = ?months.last().map(MonthWindow::label),
        "aggregating monthly KPI buckets"
    );

    let stats = months
        .into_iter()
        .map(|window| buckets::build_bucket(window, &derived))
        .collect();

    KpiReport {
        units: derived,
        stats,
    }
}
