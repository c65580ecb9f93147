use super::days::day_difference;
use super::domain::{
    Department, HousingUnit, MaintenanceSubmissionStatus, SubmissionStatus, UnitNumber,
};
use super::status::{schedule_variance, submission_status};
use chrono::NaiveDate;
use serde::Serialize;

/// Days each department held the unit, from hand-off to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDurations {
    pub maintenance: Option<i64>,
    pub cleaning: Option<i64>,
    pub furnishing: Option<i64>,
    pub gardening: Option<i64>,
}

impl DepartmentDurations {
    /// The committee only receives units, so it has no duration.
    pub fn get(&self, department: Department) -> Option<i64> {
        match department {
            Department::Maintenance => self.maintenance,
            Department::Cleaning => self.cleaning,
            Department::Furnishing => self.furnishing,
            Department::Gardening => self.gardening,
            Department::Committee => None,
        }
    }
}

/// A unit together with every figure computed from its milestones.
///
/// The source record is cloned, never modified; two derivations of the same
/// record with the same `today` are identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedUnit {
    #[serde(flatten)]
    pub unit: HousingUnit,
    pub total_days_to_complete_housing_duties: Option<i64>,
    pub total_days_to_submit_to_committee: Option<i64>,
    pub total_days_in_maintenance: Option<i64>,
    pub days_received_later_than_planned: Option<i64>,
    pub total_days_to_prepare_the_house: Option<i64>,
    pub maintenance_submission_status: MaintenanceSubmissionStatus,
    pub submission_status: SubmissionStatus,
    pub schedule_variance: i64,
    pub department_durations: DepartmentDurations,
}

impl DerivedUnit {
    pub fn unit_number(&self) -> UnitNumber {
        self.unit.unit_number
    }

    /// Days maintenance handed the unit back after the personnel target;
    /// negative when early.
    pub fn maintenance_lateness(&self) -> Option<i64> {
        let m = &self.unit.milestones;
        day_difference(m.required_by_personnel, m.received_from_maintenance)
    }
}

pub fn derive_unit(unit: &HousingUnit, today: NaiveDate) -> DerivedUnit {
    let m = &unit.milestones;
    let now = Some(today);

    DerivedUnit {
        total_days_to_complete_housing_duties: day_difference(
            m.submitted_to_cleaning,
            m.completed_gardening,
        ),
        total_days_to_submit_to_committee: day_difference(
            m.submitted_to_cleaning,
            m.submitted_to_committee,
        ),
        // Operands run from the later milestone to the earlier one.
        total_days_in_maintenance: day_difference(
            m.received_from_maintenance,
            m.received_by_maintenance,
        ),
        days_received_later_than_planned: day_difference(now, m.required_by_personnel),
        total_days_to_prepare_the_house: day_difference(
            m.received_by_maintenance,
            m.submitted_to_committee,
        ),
        maintenance_submission_status: maintenance_submission_status(unit, today),
        submission_status: submission_status(unit),
        schedule_variance: schedule_variance(unit),
        department_durations: DepartmentDurations {
            maintenance: day_difference(m.submitted_to_maintenance, m.received_from_maintenance),
            cleaning: day_difference(m.submitted_to_cleaning, m.completed_cleaning),
            furnishing: day_difference(m.submitted_to_furnishing, m.completed_furnishing),
            gardening: day_difference(m.submitted_to_gardening, m.completed_gardening),
        },
        unit: unit.clone(),
    }
}

pub fn derive_units(units: &[HousingUnit], today: NaiveDate) -> Vec<DerivedUnit> {
    units.iter().map(|unit| derive_unit(unit, today)).collect()
}

/// Maintenance timeliness as seen from `today`.
///
/// A difference of exactly 0 counts as on target.
pub fn maintenance_submission_status(
    unit: &HousingUnit,
    today: NaiveDate,
) -> MaintenanceSubmissionStatus {
    let m = &unit.milestones;
    let diff = day_difference(Some(today), m.required_by_personnel);

    match (m.received_from_maintenance, diff) {
        (None, _) | (_, None) => MaintenanceSubmissionStatus::PendingMaintenance,
        (Some(_), Some(0 | 1)) => MaintenanceSubmissionStatus::DoneOnTarget,
        (Some(_), Some(d)) if d > 1 => MaintenanceSubmissionStatus::LateSubmission,
        (Some(_), Some(_)) => MaintenanceSubmissionStatus::EarlySubmission,
    }
}
