//! The budget session: one owned allocation vector plus the last simulation
//! report derived from it.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::allocation::{AllocationVector, Validation, TOTAL_BUDGET_POINTS};
use crate::error::BudgetError;
use crate::feedback::{evaluate_feedback, Feedback};
use crate::outcome::{compute_outcome, RawOutcome, SimulationOutcome};
use crate::sector::Sector;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationReport {
    pub allocations: AllocationVector,
    pub outcome: SimulationOutcome,
    pub raw: RawOutcome,
    pub feedback: Feedback,
    pub simulated_at: DateTime<Utc>,
}

pub fn simulate_allocation<R: Rng + ?Sized>(
    allocations: &AllocationVector,
    rng: &mut R,
) -> Result<SimulationReport, BudgetError> {
    if let Validation::Invalid { total } = allocations.validate() {
        return Err(BudgetError::InvalidAllocationTotal {
            required: TOTAL_BUDGET_POINTS,
            actual: total,
        });
    }

    let raw = compute_outcome(allocations);
    let feedback = evaluate_feedback(raw.happiness_score, rng);
    Ok(SimulationReport {
        allocations: *allocations,
        outcome: raw.formatted(),
        raw,
        feedback,
        simulated_at: Utc::now(),
    })
}

#[derive(Debug, Clone)]
pub struct BudgetModel {
    allocations: AllocationVector,
    report: Option<SimulationReport>,
    rng: StdRng,
}

impl Default for BudgetModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetModel {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            allocations: AllocationVector::default(),
            report: None,
            rng,
        }
    }

    pub fn allocations(&self) -> &AllocationVector {
        &self.allocations
    }

    pub fn total(&self) -> u32 {
        self.allocations.total()
    }

    pub fn last_report(&self) -> Option<&SimulationReport> {
        self.report.as_ref()
    }

    pub fn set(&mut self, sector: Sector, value: i64) -> u32 {
        let stored = self.allocations.set(sector, value);
        self.after_edit(sector, stored);
        stored
    }

    pub fn set_raw(&mut self, sector: Sector, raw: &str) -> u32 {
        let stored = self.allocations.set_raw(sector, raw);
        self.after_edit(sector, stored);
        stored
    }

    pub fn validate(&self) -> Validation {
        self.allocations.validate()
    }

    pub fn simulate(&mut self) -> Result<&SimulationReport, BudgetError> {
        match simulate_allocation(&self.allocations, &mut self.rng) {
            Ok(report) => {
                info!(
                    gdp = %report.outcome.gdp_growth,
                    happiness = %report.outcome.happiness_score,
                    tier = %report.feedback.tier,
                    "budget simulated"
                );
                let stored = self.report.insert(report);
                Ok(&*stored)
            }
            Err(err) => {
                warn!("simulation rejected: {err}");
                self.report = None;
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.allocations = AllocationVector::default();
        self.report = None;
        debug!("allocations reset to defaults");
    }

    fn after_edit(&mut self, sector: Sector, stored: u32) {
        self.report = None;
        debug!(
            sector = sector.as_slug(),
            value = stored,
            total = self.allocations.total(),
            "allocation updated"
        );
    }
}
