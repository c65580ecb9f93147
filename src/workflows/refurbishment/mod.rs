pub mod days;
pub mod derivation;
pub mod domain;
pub mod grouping;
pub mod kpi;
mod registry;
pub mod status;

pub use derivation::{derive_unit, derive_units, DepartmentDurations, DerivedUnit};
pub use domain::{
    HousingUnit, MaintenanceSubmissionStatus, Milestone, MilestoneDates, SatisfactionStatus,
    SubmissionStatus, UnitNumber,
};
pub use kpi::{aggregate, KpiQuery, KpiReport, MonthBucket, MonthStats};
pub use registry::{UnitRegistry, UpsertOutcome, UpsertSummary};
