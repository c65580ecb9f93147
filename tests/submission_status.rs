use chrono::NaiveDate;
use housing_kpi::workflows::refurbishment::days::day_difference;
use housing_kpi::workflows::refurbishment::status::{schedule_variance, submission_status};
use housing_kpi::workflows::refurbishment::{
    derive_unit, HousingUnit, MaintenanceSubmissionStatus, Milestone, SubmissionStatus,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, d).expect("valid date")
}

/// Every milestone set, cleaning through gardening handed off back to back.
fn finished_unit(court: &str, gardening_handoff: NaiveDate) -> HousingUnit {
    HousingUnit::new(301, court, 3)
        .with(Milestone::SubmittedToMaintenance, date(1, 1))
        .with(Milestone::ReceivedByMaintenance, date(1, 2))
        .with(Milestone::ReceivedFromMaintenance, date(1, 10))
        .with(Milestone::RequiredByPersonnel, date(1, 11))
        .with(Milestone::SubmittedToCleaning, date(1, 11))
        .with(Milestone::ExpectedCleaningCompletion, date(1, 14))
        .with(Milestone::CompletedCleaning, date(1, 14))
        .with(Milestone::SubmittedToFurnishing, date(1, 14))
        .with(Milestone::ExpectedFurnishingCompletion, date(1, 20))
        .with(Milestone::CompletedFurnishing, date(1, 20))
        .with(Milestone::SubmittedToGardening, gardening_handoff)
        .with(Milestone::ExpectedGardeningCompletion, date(1, 25))
        .with(Milestone::CompletedGardening, date(1, 25))
        .with(Milestone::SubmittedToCommittee, date(1, 27))
}

#[test]
fn day_difference_is_antisymmetric() {
    let dates = [date(1, 1), date(1, 31), date(2, 28), date(7, 4), date(12, 31)];
    for a in dates {
        for b in dates {
            assert_eq!(
                day_difference(Some(a), Some(b)),
                day_difference(Some(b), Some(a)).map(|days| -days)
            );
        }
    }
    assert_eq!(day_difference(None, Some(date(1, 1))), None);
}

#[test]
fn stages_advance_with_each_milestone() {
    let today = date(6, 1);
    let mut unit = HousingUnit::new(10, "Rawda", 2);
    assert_eq!(submission_status(&unit), SubmissionStatus::NotStarted);

    let steps = [
        (
            Milestone::SubmittedToMaintenance,
            date(1, 2),
            SubmissionStatus::PendingMaintenanceCompletion,
        ),
        (
            Milestone::ReceivedFromMaintenance,
            date(1, 12),
            SubmissionStatus::PendingCleaningSubmission,
        ),
        (Milestone::SubmittedToCleaning, date(1, 13), SubmissionStatus::PendingCleaningCompletion),
        (Milestone::CompletedCleaning, date(1, 15), SubmissionStatus::PendingFurnishingSubmission),
        (
            Milestone::SubmittedToFurnishing,
            date(1, 16),
            SubmissionStatus::PendingFurnishingCompletion,
        ),
        (Milestone::CompletedFurnishing, date(1, 20), SubmissionStatus::PendingGardeningSubmission),
        (
            Milestone::SubmittedToGardening,
            date(1, 21),
            SubmissionStatus::PendingGardeningCompletion,
        ),
        (Milestone::CompletedGardening, date(1, 24), SubmissionStatus::PendingFinalInspection),
    ];

    for (milestone, on, expected) in steps {
        unit = unit.with(milestone, on);
        assert_eq!(submission_status(&unit), expected, "after {}", milestone.label());
        assert_eq!(derive_unit(&unit, today).submission_status, expected);
    }
}

#[test]
fn gardening_exempt_court_goes_straight_to_final_inspection() {
    let unit = HousingUnit::new(55, "Ferdaws", 4).with(Milestone::CompletedFurnishing, date(2, 1));
    assert_eq!(submission_status(&unit), SubmissionStatus::PendingFinalInspection);

    let spaced =
        HousingUnit::new(56, "  ferdaws ", 4).with(Milestone::CompletedFurnishing, date(2, 1));
    assert_eq!(submission_status(&spaced), SubmissionStatus::PendingFinalInspection);

    let other = HousingUnit::new(57, "Rawda", 4).with(Milestone::CompletedFurnishing, date(2, 1));
    assert_eq!(submission_status(&other), SubmissionStatus::PendingGardeningSubmission);
}

#[test]
fn committee_submissions_are_classified_by_variance() {
    let on_target = finished_unit("Rawda", date(1, 20));
    assert_eq!(schedule_variance(&on_target), 0);
    assert_eq!(submission_status(&on_target), SubmissionStatus::DoneOnTarget);

    let overlapping = finished_unit("Rawda", date(1, 17));
    assert_eq!(schedule_variance(&overlapping), 3);
    assert_eq!(submission_status(&overlapping), SubmissionStatus::LateSubmission);

    let gapped = finished_unit("Rawda", date(1, 23));
    assert_eq!(schedule_variance(&gapped), -3);
    assert_eq!(submission_status(&gapped), SubmissionStatus::EarlySubmission);

    let one_day = finished_unit("Rawda", date(1, 19));
    assert_eq!(schedule_variance(&one_day), 1);
    assert_eq!(submission_status(&one_day), SubmissionStatus::DoneOnTarget);
}

#[test]
fn maintenance_is_pending_until_the_unit_is_received() {
    let unit = HousingUnit::new(8, "Rawda", 1)
        .with(Milestone::SubmittedToMaintenance, date(1, 1))
        .with(Milestone::RequiredByPersonnel, date(1, 10));

    for today in [date(1, 1), date(1, 10), date(3, 1)] {
        assert_eq!(
            derive_unit(&unit, today).maintenance_submission_status,
            MaintenanceSubmissionStatus::PendingMaintenance
        );
    }

    let received = unit.with(Milestone::ReceivedFromMaintenance, date(1, 9));
    assert_eq!(
        derive_unit(&received, date(1, 10)).maintenance_submission_status,
        MaintenanceSubmissionStatus::DoneOnTarget
    );
}

#[test]
fn derivation_is_repeatable_for_the_same_clock() {
    let unit = finished_unit("Ferdaws", date(1, 20));
    let today = date(4, 15);
    assert_eq!(derive_unit(&unit, today), derive_unit(&unit, today));
}
