use super::period::MonthWindow;
use crate::workflows::refurbishment::derivation::DerivedUnit;
use crate::workflows::refurbishment::domain::UnitNumber;
use serde::Serialize;

/// Statistics for a single calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    pub month: String,
    pub window: MonthWindow,
    pub month_stats: MonthStats,
}

/// Unit collections and ratios for one month.
///
/// Collections hold unit numbers of the report's derived units. Percentages
/// are 0–100 with one decimal; percentages and averages are `None` when the
/// month has nothing to divide by.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub units_received_from_maintenance: Vec<UnitNumber>,
    /// Units due this month plus overdue units maintenance has not returned
    /// by the start of the month.
    pub units_required_by_housing: Vec<UnitNumber>,
    pub units_submitted_to_cleaning: Vec<UnitNumber>,
    pub units_submitted_to_furniture: Vec<UnitNumber>,
    pub units_submitted_to_gardening: Vec<UnitNumber>,
    pub units_cleaned: Vec<UnitNumber>,
    pub units_furnished: Vec<UnitNumber>,
    pub units_gardened: Vec<UnitNumber>,
    pub units_completed: Vec<UnitNumber>,
    pub units_received_from_maintenance_on_target: Vec<UnitNumber>,
    pub units_received_from_maintenance_late: Vec<UnitNumber>,
    pub units_received_from_maintenance_early: Vec<UnitNumber>,
    pub units_received_from_maintenance_percentage: Option<f64>,
    pub units_completed_percentage: Option<f64>,
    pub units_received_from_maintenance_on_target_percentage: Option<f64>,
    pub units_received_from_maintenance_late_percentage: Option<f64>,
    pub units_received_from_maintenance_early_percentage: Option<f64>,
    pub avg_total_late_days_received_from_maintenance: Option<f64>,
    pub avg_total_days_to_prepare_a_house: Option<f64>,
}

pub(crate) fn build_bucket(window: MonthWindow, units: &[DerivedUnit]) -> MonthBucket {
    let mut stats = MonthStats::default();
    let mut late_days: Vec<i64> = Vec::new();
    let mut prepare_days: Vec<i64> = Vec::new();

    for derived in units {
        let number = derived.unit_number();
        let m = &derived.unit.milestones;

        if window.contains_opt(m.received_from_maintenance) {
            stats.units_received_from_maintenance.push(number);

            match derived.maintenance_lateness() {
                Some(days) if days.abs() <= 1 => {
                    stats.units_received_from_maintenance_on_target.push(number)
                }
                Some(days) if days > 1 => {
                    stats.units_received_from_maintenance_late.push(number);
                    late_days.push(days);
                }
                Some(_) => stats.units_received_from_maintenance_early.push(number),
                None => {}
            }
        }

        if is_required_in(window, derived) {
            stats.units_required_by_housing.push(number);
        }

        if window.contains_opt(m.submitted_to_cleaning) {
            stats.units_submitted_to_cleaning.push(number);
        }
        if window.contains_opt(m.submitted_to_furnishing) {
            stats.units_submitted_to_furniture.push(number);
        }
        if window.contains_opt(m.submitted_to_gardening) {
            stats.units_submitted_to_gardening.push(number);
        }
        if window.contains_opt(m.completed_cleaning) {
            stats.units_cleaned.push(number);
        }
        if window.contains_opt(m.completed_furnishing) {
            stats.units_furnished.push(number);
        }
        if window.contains_opt(m.completed_gardening) {
            stats.units_gardened.push(number);
        }
        if window.contains_opt(m.submitted_to_committee) {
            stats.units_completed.push(number);
            if let Some(days) = derived.total_days_to_prepare_the_house {
                prepare_days.push(days);
            }
        }
    }

    let required = stats.units_required_by_housing.len();
    let received = stats.units_received_from_maintenance.len();

    stats.units_received_from_maintenance_percentage = percentage(received, required);
    stats.units_completed_percentage = percentage(stats.units_completed.len(), required);
    stats.units_received_from_maintenance_on_target_percentage =
        percentage(stats.units_received_from_maintenance_on_target.len(), received);
    stats.units_received_from_maintenance_late_percentage =
        percentage(stats.units_received_from_maintenance_late.len(), received);
    stats.units_received_from_maintenance_early_percentage =
        percentage(stats.units_received_from_maintenance_early.len(), received);
    stats.avg_total_late_days_received_from_maintenance = average(&late_days);
    stats.avg_total_days_to_prepare_a_house = average(&prepare_days);

    MonthBucket {
        month: window.label(),
        window,
        month_stats: stats,
    }
}

fn is_required_in(window: MonthWindow, derived: &DerivedUnit) -> bool {
    let m = &derived.unit.milestones;
    let Some(required) = m.required_by_personnel else {
        return false;
    };

    if window.contains(required) {
        return true;
    }

    required < window.start
        && m
            .received_from_maintenance
            .map_or(true, |received| received > window.start)
}

/// `numerator / denominator` as a percentage with one decimal.
pub(crate) fn percentage(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    let ratio = numerator as f64 / denominator as f64;
    Some((ratio * 1000.0).round() / 10.0)
}

pub(crate) fn average(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: i64 = values.iter().sum();
    Some(total as f64 / values.len() as f64)
}
