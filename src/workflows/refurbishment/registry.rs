use super::domain::{HousingUnit, UnitNumber};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub created: usize,
    pub updated: usize,
}

/// In-memory unit collection keyed by unit number.
#[derive(Debug, Default, Clone)]
pub struct UnitRegistry {
    units: BTreeMap<UnitNumber, HousingUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, unit: HousingUnit) -> UpsertOutcome {
        match self.units.insert(unit.unit_number, unit) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        }
    }

    pub fn upsert_all<I>(&mut self, units: I) -> UpsertSummary
    where
        I: IntoIterator<Item = HousingUnit>,
    {
        let mut summary = UpsertSummary::default();
        for unit in units {
            match self.upsert(unit) {
                UpsertOutcome::Created => summary.created += 1,
                UpsertOutcome::Updated => summary.updated += 1,
            }
        }
        summary
    }

    /// Drops every stored unit before loading `units`.
    pub fn replace_all<I>(&mut self, units: I) -> UpsertSummary
    where
        I: IntoIterator<Item = HousingUnit>,
    {
        self.units.clear();
        self.upsert_all(units)
    }

    pub fn get(&self, unit_number: UnitNumber) -> Option<&HousingUnit> {
        self.units.get(&unit_number)
    }

    pub fn remove(&mut self, unit_number: UnitNumber) -> Option<HousingUnit> {
        self.units.remove(&unit_number)
    }

    /// Snapshot in unit-number order, suitable for a KPI run.
    pub fn units(&self) -> Vec<HousingUnit> {
        self.units.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HousingUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
