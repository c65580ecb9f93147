use super::buckets::MonthStats;
use super::KpiReport;
use crate::workflows::refurbishment::domain::{SubmissionStatus, UnitNumber};
use crate::workflows::refurbishment::grouping::group_by;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    UnitsReceivedFromMaintenance,
    UnitsRequiredByHousing,
    UnitsSubmittedToCleaning,
    UnitsSubmittedToFurniture,
    UnitsSubmittedToGardening,
    UnitsCleaned,
    UnitsFurnished,
    UnitsGardened,
    UnitsCompleted,
    UnitsReceivedOnTarget,
    UnitsReceivedLate,
    UnitsReceivedEarly,
    ReceivedFromMaintenancePercentage,
    CompletedPercentage,
    ReceivedOnTargetPercentage,
    ReceivedLatePercentage,
    ReceivedEarlyPercentage,
    AvgLateDaysFromMaintenance,
    AvgDaysToPrepareHouse,
}

impl KpiMetric {
    pub const fn ordered() -> [Self; 19] {
        [
            Self::UnitsReceivedFromMaintenance,
            Self::UnitsRequiredByHousing,
            Self::UnitsSubmittedToCleaning,
            Self::UnitsSubmittedToFurniture,
            Self::UnitsSubmittedToGardening,
            Self::UnitsCleaned,
            Self::UnitsFurnished,
            Self::UnitsGardened,
            Self::UnitsCompleted,
            Self::UnitsReceivedOnTarget,
            Self::UnitsReceivedLate,
            Self::UnitsReceivedEarly,
            Self::ReceivedFromMaintenancePercentage,
            Self::CompletedPercentage,
            Self::ReceivedOnTargetPercentage,
            Self::ReceivedLatePercentage,
            Self::ReceivedEarlyPercentage,
            Self::AvgLateDaysFromMaintenance,
            Self::AvgDaysToPrepareHouse,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnitsReceivedFromMaintenance => "Units Received From Maintenance",
            Self::UnitsRequiredByHousing => "Units Required By Housing",
            Self::UnitsSubmittedToCleaning => "Units Submitted To Cleaning",
            Self::UnitsSubmittedToFurniture => "Units Submitted To Furniture",
            Self::UnitsSubmittedToGardening => "Units Submitted To Gardening",
            Self::UnitsCleaned => "Units Cleaned",
            Self::UnitsFurnished => "Units Furnished",
            Self::UnitsGardened => "Units Gardened",
            Self::UnitsCompleted => "Units Completed and Inspected by Housing",
            Self::UnitsReceivedOnTarget => "Units Received From Maintenance On Target",
            Self::UnitsReceivedLate => "Units Received Late From Maintenance",
            Self::UnitsReceivedEarly => "Units Received Early From Maintenance",
            Self::ReceivedFromMaintenancePercentage => "% Units Received From Maintenance",
            Self::CompletedPercentage => "% Units Completed by Housing",
            Self::ReceivedOnTargetPercentage => "% Units Received From Maintenance On Target",
            Self::ReceivedLatePercentage => "% Units Received Late From Maintenance",
            Self::ReceivedEarlyPercentage => "% Units Received Early From Maintenance",
            Self::AvgLateDaysFromMaintenance => "Avg Late Days Received From Maintenance",
            Self::AvgDaysToPrepareHouse => "Avg Total Days to Prepare a House",
        }
    }

    pub fn cell(self, stats: &MonthStats) -> KpiCell {
        let count = |units: &[UnitNumber]| KpiCell::Count(units.len());

        match self {
            Self::UnitsReceivedFromMaintenance => count(&stats.units_received_from_maintenance),
            Self::UnitsRequiredByHousing => count(&stats.units_required_by_housing),
            Self::UnitsSubmittedToCleaning => count(&stats.units_submitted_to_cleaning),
            Self::UnitsSubmittedToFurniture => count(&stats.units_submitted_to_furniture),
            Self::UnitsSubmittedToGardening => count(&stats.units_submitted_to_gardening),
            Self::UnitsCleaned => count(&stats.units_cleaned),
            Self::UnitsFurnished => count(&stats.units_furnished),
            Self::UnitsGardened => count(&stats.units_gardened),
            Self::UnitsCompleted => count(&stats.units_completed),
            Self::UnitsReceivedOnTarget => count(&stats.units_received_from_maintenance_on_target),
            Self::UnitsReceivedLate => count(&stats.units_received_from_maintenance_late),
            Self::UnitsReceivedEarly => count(&stats.units_received_from_maintenance_early),
            Self::ReceivedFromMaintenancePercentage => {
                KpiCell::Percentage(stats.units_received_from_maintenance_percentage)
            }
            Self::CompletedPercentage => KpiCell::Percentage(stats.units_completed_percentage),
            Self::ReceivedOnTargetPercentage => {
                KpiCell::Percentage(stats.units_received_from_maintenance_on_target_percentage)
            }
            Self::ReceivedLatePercentage => {
                KpiCell::Percentage(stats.units_received_from_maintenance_late_percentage)
            }
            Self::ReceivedEarlyPercentage => {
                KpiCell::Percentage(stats.units_received_from_maintenance_early_percentage)
            }
            Self::AvgLateDaysFromMaintenance => {
                KpiCell::Days(stats.avg_total_late_days_received_from_maintenance)
            }
            Self::AvgDaysToPrepareHouse => KpiCell::Days(stats.avg_total_days_to_prepare_a_house),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KpiCell {
    Count(usize),
    Percentage(Option<f64>),
    Days(Option<f64>),
}

impl KpiCell {
    /// Text for a table cell; unknown values render as `-`.
    pub fn display(&self) -> String {
        match self {
            KpiCell::Count(count) => count.to_string(),
            KpiCell::Percentage(Some(value)) => format!("{value:.1}%"),
            KpiCell::Days(Some(value)) => format!("{value:.1}"),
            KpiCell::Percentage(None) | KpiCell::Days(None) => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiTableRow {
    pub number: usize,
    pub metric: KpiMetric,
    pub label: &'static str,
    pub cells: Vec<KpiCell>,
}

/// Month columns by metric rows, the layout of the monthly summary sheet.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummaryTable {
    pub months: Vec<String>,
    pub rows: Vec<KpiTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductivityPoint {
    pub month: String,
    pub units_completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBreakdownEntry {
    pub status: SubmissionStatus,
    pub status_label: &'static str,
    pub units: usize,
}

impl KpiReport {
    pub fn summary_table(&self) -> KpiSummaryTable {
        let months = self.stats.iter().map(|bucket| bucket.month.clone()).collect();
        let rows = KpiMetric::ordered()
            .into_iter()
            .enumerate()
            .map(|(idx, metric)| KpiTableRow {
                number: idx + 1,
                metric,
                label: metric.label(),
                cells: self
                    .stats
                    .iter()
                    .map(|bucket| metric.cell(&bucket.month_stats))
                    .collect(),
            })
            .collect();

        KpiSummaryTable { months, rows }
    }

    pub fn productivity(&self) -> Vec<ProductivityPoint> {
        self.stats
            .iter()
            .map(|bucket| ProductivityPoint {
                month: bucket.month.clone(),
                units_completed: bucket.month_stats.units_completed.len(),
            })
            .collect()
    }

    /// Unit counts per workflow stage, in pipeline order, omitting empty stages.
    pub fn status_breakdown(&self) -> Vec<StatusBreakdownEntry> {
        let groups = group_by(self.units.iter(), |unit| unit.submission_status);

        SubmissionStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                groups.get(&status).map(|units| StatusBreakdownEntry {
                    status,
                    status_label: status.label(),
                    units: units.len(),
                })
            })
            .collect()
    }
}
