use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Courts whose units have no garden and therefore skip the gardening stage.
pub const GARDENING_EXEMPT_COURTS: &[&str] = &["Ferdaws"];

/// Natural key of a housing unit ("House No." on the tracking sheet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitNumber(pub u32);

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Maintenance,
    Cleaning,
    Furnishing,
    Gardening,
    Committee,
}

impl Department {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Maintenance,
            Self::Cleaning,
            Self::Furnishing,
            Self::Gardening,
            Self::Committee,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance",
            Self::Cleaning => "Cleaning",
            Self::Furnishing => "Furnishing",
            Self::Gardening => "Gardening",
            Self::Committee => "Committee",
        }
    }
}

/// The fourteen tracked dates, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Milestone {
    SubmittedToMaintenance,
    ReceivedByMaintenance,
    ReceivedFromMaintenance,
    RequiredByPersonnel,
    SubmittedToCleaning,
    ExpectedCleaningCompletion,
    CompletedCleaning,
    SubmittedToFurnishing,
    ExpectedFurnishingCompletion,
    CompletedFurnishing,
    SubmittedToGardening,
    ExpectedGardeningCompletion,
    CompletedGardening,
    SubmittedToCommittee,
}

impl Milestone {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::SubmittedToMaintenance,
            Self::ReceivedByMaintenance,
            Self::ReceivedFromMaintenance,
            Self::RequiredByPersonnel,
            Self::SubmittedToCleaning,
            Self::ExpectedCleaningCompletion,
            Self::CompletedCleaning,
            Self::SubmittedToFurnishing,
            Self::ExpectedFurnishingCompletion,
            Self::CompletedFurnishing,
            Self::SubmittedToGardening,
            Self::ExpectedGardeningCompletion,
            Self::CompletedGardening,
            Self::SubmittedToCommittee,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SubmittedToMaintenance => "Date Submitted To Maintenance",
            Self::ReceivedByMaintenance => "Date Received By Maintenance",
            Self::ReceivedFromMaintenance => "Date Received From Maintenance",
            Self::RequiredByPersonnel => "Date Required By Personnel",
            Self::SubmittedToCleaning => "Date Submitted To Cleaning",
            Self::ExpectedCleaningCompletion => "Date Expected Cleaning Completion",
            Self::CompletedCleaning => "Date Completed Cleaning",
            Self::SubmittedToFurnishing => "Date Submitted To Furnishing",
            Self::ExpectedFurnishingCompletion => "Date Expected Furnishing Completion",
            Self::CompletedFurnishing => "Date Completed Furnishing",
            Self::SubmittedToGardening => "Date Submitted To Gardening",
            Self::ExpectedGardeningCompletion => "Date Expected Gardening Completion",
            Self::CompletedGardening => "Date Completed Gardening",
            Self::SubmittedToCommittee => "Date Submitted To Committee",
        }
    }

    /// Field name used in validation reports.
    pub const fn field(self) -> &'static str {
        match self {
            Self::SubmittedToMaintenance => "submittedToMaintenance",
            Self::ReceivedByMaintenance => "receivedByMaintenance",
            Self::ReceivedFromMaintenance => "receivedFromMaintenance",
            Self::RequiredByPersonnel => "requiredByPersonnel",
            Self::SubmittedToCleaning => "submittedToCleaning",
            Self::ExpectedCleaningCompletion => "expectedCleaningCompletion",
            Self::CompletedCleaning => "completedCleaning",
            Self::SubmittedToFurnishing => "submittedToFurnishing",
            Self::ExpectedFurnishingCompletion => "expectedFurnishingCompletion",
            Self::CompletedFurnishing => "completedFurnishing",
            Self::SubmittedToGardening => "submittedToGardening",
            Self::ExpectedGardeningCompletion => "expectedGardeningCompletion",
            Self::CompletedGardening => "completedGardening",
            Self::SubmittedToCommittee => "submittedToCommittee",
        }
    }

    pub const fn department(self) -> Department {
        match self {
            Self::SubmittedToMaintenance
            | Self::ReceivedByMaintenance
            | Self::ReceivedFromMaintenance
            | Self::RequiredByPersonnel => Department::Maintenance,
            Self::SubmittedToCleaning
            | Self::ExpectedCleaningCompletion
            | Self::CompletedCleaning => Department::Cleaning,
            Self::SubmittedToFurnishing
            | Self::ExpectedFurnishingCompletion
            | Self::CompletedFurnishing => Department::Furnishing,
            Self::SubmittedToGardening
            | Self::ExpectedGardeningCompletion
            | Self::CompletedGardening => Department::Gardening,
            Self::SubmittedToCommittee => Department::Committee,
        }
    }
}

/// Overall workflow stage of a unit, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    NotStarted,
    PendingMaintenanceCompletion,
    PendingCleaningSubmission,
    PendingCleaningCompletion,
    PendingFurnishingSubmission,
    PendingFurnishingCompletion,
    PendingGardeningSubmission,
    PendingGardeningCompletion,
    PendingFinalInspection,
    LateSubmission,
    EarlySubmission,
    DoneOnTarget,
}

impl SubmissionStatus {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::NotStarted,
            Self::PendingMaintenanceCompletion,
            Self::PendingCleaningSubmission,
            Self::PendingCleaningCompletion,
            Self::PendingFurnishingSubmission,
            Self::PendingFurnishingCompletion,
            Self::PendingGardeningSubmission,
            Self::PendingGardeningCompletion,
            Self::PendingFinalInspection,
            Self::LateSubmission,
            Self::EarlySubmission,
            Self::DoneOnTarget,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::PendingMaintenanceCompletion => "Pending Maintenance Completion",
            Self::PendingCleaningSubmission => "Pending Cleaning Submission",
            Self::PendingCleaningCompletion => "Pending Cleaning Completion",
            Self::PendingFurnishingSubmission => "Pending Furnishing Submission",
            Self::PendingFurnishingCompletion => "Pending Furnishing Completion",
            Self::PendingGardeningSubmission => "Pending Gardening Submission",
            Self::PendingGardeningCompletion => "Pending Gardening Completion",
            Self::PendingFinalInspection => "Pending Final Inspection",
            Self::LateSubmission => "Late Submission",
            Self::EarlySubmission => "Early Submission",
            Self::DoneOnTarget => "Done On Target",
        }
    }
}

/// Timeliness of the maintenance hand-back relative to the personnel target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceSubmissionStatus {
    PendingMaintenance,
    DoneOnTarget,
    LateSubmission,
    EarlySubmission,
}

impl MaintenanceSubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingMaintenance => "Pending Maintenance",
            Self::DoneOnTarget => "Done On Target",
            Self::LateSubmission => "Late Submission",
            Self::EarlySubmission => "Early Submission",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SatisfactionStatus {
    #[default]
    None,
    Satisfied,
    Neutral,
    Unsatisfied,
}

impl SatisfactionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Satisfied => "Satisfied",
            Self::Neutral => "Neutral",
            Self::Unsatisfied => "Unsatisfied",
        }
    }

    /// Case-insensitive lookup by variant name; anything unknown is `None`.
    pub fn from_name(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "SATISFIED" => Self::Satisfied,
            "NEUTRAL" => Self::Neutral,
            "UNSATISFIED" | "NOT_SATISFIED" | "DISSATISFIED" => Self::Unsatisfied,
            _ => Self::None,
        }
    }
}

/// One housing unit as supplied by the tracking sheet or the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingUnit {
    pub unit_number: UnitNumber,
    pub court: String,
    pub bedrooms: u32,
    #[serde(default)]
    pub extended: bool,
    #[serde(default)]
    pub area: f64,
    #[serde(flatten)]
    pub milestones: MilestoneDates,
    #[serde(default)]
    pub satisfaction_status: SatisfactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl HousingUnit {
    pub fn new(unit_number: u32, court: impl Into<String>, bedrooms: u32) -> Self {
        Self {
            unit_number: UnitNumber(unit_number),
            court: court.into(),
            bedrooms,
            extended: false,
            area: 0.0,
            milestones: MilestoneDates::default(),
            satisfaction_status: SatisfactionStatus::None,
            comment: None,
        }
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, milestone: Milestone, date: NaiveDate) -> Self {
        self.milestones.set(milestone, Some(date));
        self
    }

    pub fn date(&self, milestone: Milestone) -> Option<NaiveDate> {
        self.milestones.get(milestone)
    }

    pub fn skips_gardening(&self) -> bool {
        let court = self.court.trim();
        GARDENING_EXEMPT_COURTS
            .iter()
            .any(|exempt| exempt.eq_ignore_ascii_case(court))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDates {
    pub submitted_to_maintenance: Option<NaiveDate>,
    pub received_by_maintenance: Option<NaiveDate>,
    pub received_from_maintenance: Option<NaiveDate>,
    pub required_by_personnel: Option<NaiveDate>,
    pub submitted_to_cleaning: Option<NaiveDate>,
    pub expected_cleaning_completion: Option<NaiveDate>,
    pub completed_cleaning: Option<NaiveDate>,
    pub submitted_to_furnishing: Option<NaiveDate>,
    pub expected_furnishing_completion: Option<NaiveDate>,
    pub completed_furnishing: Option<NaiveDate>,
    pub submitted_to_gardening: Option<NaiveDate>,
    pub expected_gardening_completion: Option<NaiveDate>,
    pub completed_gardening: Option<NaiveDate>,
    pub submitted_to_committee: Option<NaiveDate>,
}

impl MilestoneDates {
    pub fn get(&self, milestone: Milestone) -> Option<NaiveDate> {
        match milestone {
            Milestone::SubmittedToMaintenance => self.submitted_to_maintenance,
            Milestone::ReceivedByMaintenance => self.received_by_maintenance,
            Milestone::ReceivedFromMaintenance => self.received_from_maintenance,
            Milestone::RequiredByPersonnel => self.required_by_personnel,
            Milestone::SubmittedToCleaning => self.submitted_to_cleaning,
            Milestone::ExpectedCleaningCompletion => self.expected_cleaning_completion,
            Milestone::CompletedCleaning => self.completed_cleaning,
            Milestone::SubmittedToFurnishing => self.submitted_to_furnishing,
            Milestone::ExpectedFurnishingCompletion => self.expected_furnishing_completion,
            Milestone::CompletedFurnishing => self.completed_furnishing,
            Milestone::SubmittedToGardening => self.submitted_to_gardening,
            Milestone::ExpectedGardeningCompletion => self.expected_gardening_completion,
            Milestone::CompletedGardening => self.completed_gardening,
            Milestone::SubmittedToCommittee => self.submitted_to_committee,
        }
    }

    pub fn set(&mut self, milestone: Milestone, date: Option<NaiveDate>) {
        let slot = match milestone {
            Milestone::SubmittedToMaintenance => &mut self.submitted_to_maintenance,
            Milestone::ReceivedByMaintenance => &mut self.received_by_maintenance,
            Milestone::ReceivedFromMaintenance => &mut self.received_from_maintenance,
            Milestone::RequiredByPersonnel => &mut self.required_by_personnel,
            Milestone::SubmittedToCleaning => &mut self.submitted_to_cleaning,
            Milestone::ExpectedCleaningCompletion => &mut self.expected_cleaning_completion,
            Milestone::CompletedCleaning => &mut self.completed_cleaning,
            Milestone::SubmittedToFurnishing => &mut self.submitted_to_furnishing,
            Milestone::ExpectedFurnishingCompletion => &mut self.expected_furnishing_completion,
            Milestone::CompletedFurnishing => &mut self.completed_furnishing,
            Milestone::SubmittedToGardening => &mut self.submitted_to_gardening,
            Milestone::ExpectedGardeningCompletion => &mut self.expected_gardening_completion,
            Milestone::CompletedGardening => &mut self.completed_gardening,
            Milestone::SubmittedToCommittee => &mut self.submitted_to_committee,
        };
        *slot = date;
    }

    pub fn is_set(&self, milestone: Milestone) -> bool {
        self.get(milestone).is_some()
    }
}
