use super::days::day_difference_or_zero;
use super::domain::{HousingUnit, SubmissionStatus};

/// Planned duration minus actual duration, in days.
///
/// Planned is the sum of each department's scheduled window plus the slack
/// between expected gardening completion and the committee hand-off; actual
/// runs from maintenance submission to committee submission. Missing dates
/// contribute 0 to either side.
pub fn schedule_variance(unit: &HousingUnit) -> i64 {
    let m = &unit.milestones;

    let planned = day_difference_or_zero(m.submitted_to_maintenance, m.required_by_personnel)
        + day_difference_or_zero(m.submitted_to_cleaning, m.expected_cleaning_completion)
        + day_difference_or_zero(m.submitted_to_furnishing, m.expected_furnishing_completion)
        + day_difference_or_zero(m.submitted_to_gardening, m.expected_gardening_completion)
        + day_difference_or_zero(m.expected_gardening_completion, m.submitted_to_committee);

    let actual = day_difference_or_zero(m.submitted_to_maintenance, m.submitted_to_committee);

    planned - actual
}

/// Classifies a unit into its current workflow stage.
///
/// Rules are checked in pipeline order and the first match wins. Units in a
/// gardening-exempt court move from furnished straight to final inspection.
pub fn submission_status(unit: &HousingUnit) -> SubmissionStatus {
    let m = &unit.milestones;
    let skips_gardening = unit.skips_gardening();

    let status = if (m.submitted_to_maintenance.is_some() || m.received_by_maintenance.is_some())
        && m.received_from_maintenance.is_none()
    {
        SubmissionStatus::PendingMaintenanceCompletion
    } else if m.received_from_maintenance.is_some() && m.submitted_to_cleaning.is_none() {
        SubmissionStatus::PendingCleaningSubmission
    } else if m.submitted_to_cleaning.is_some() && m.completed_cleaning.is_none() {
        SubmissionStatus::PendingCleaningCompletion
    } else if m.completed_cleaning.is_some() && m.submitted_to_furnishing.is_none() {
        SubmissionStatus::PendingFurnishingSubmission
    } else if m.submitted_to_furnishing.is_some() && m.completed_furnishing.is_none() {
        SubmissionStatus::PendingFurnishingCompletion
    } else if !skips_gardening
        && m.completed_furnishing.is_some()
        && m.submitted_to_gardening.is_none()
    {
        SubmissionStatus::PendingGardeningSubmission
    } else if !skips_gardening
        && m.submitted_to_gardening.is_some()
        && m.completed_gardening.is_none()
    {
        SubmissionStatus::PendingGardeningCompletion
    } else if m.submitted_to_committee.is_none()
        && (m.completed_gardening.is_some()
            || (skips_gardening && m.completed_furnishing.is_some()))
    {
        SubmissionStatus::PendingFinalInspection
    } else if m.submitted_to_committee.is_some() {
        classify_committee_submission(schedule_variance(unit))
    } else {
        SubmissionStatus::NotStarted
    };

    tracing::trace!(unit = %unit.unit_number, status = status.label(), "derived submission status");
    status
}

fn classify_committee_submission(variance: i64) -> SubmissionStatus {
    match variance {
        v if v > 1 => SubmissionStatus::LateSubmission,
        v if v < -1 => SubmissionStatus::EarlySubmission,
        _ => SubmissionStatus::DoneOnTarget,
    }
}
