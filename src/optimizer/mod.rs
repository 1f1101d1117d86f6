pub mod allocation;
pub mod coefficients;
pub mod ranking;
pub mod refine;
pub mod roots;
pub mod scenarios;

use std::ops::RangeInclusive;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use crate::optimizer::allocation::{Allocation, ContinuousPoint, ScenarioSource};
use crate::optimizer::ranking::best_candidate;
use crate::optimizer::scenarios::scenario_solutions;
use crate::parallel::WorkerPool;
use crate::stats::StatParameters;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("No valid solutions found for given inputs.")]
    NoSolution,
}

/// The chosen build plus every candidate it was chosen from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub best: Allocation,
    pub all: Vec<Allocation>,
}

/// Best integer build across all scenarios.
pub fn find_global_optimal_build(params: &StatParameters) -> Result<Allocation, OptimizeError> {
    optimize_with_scenarios(params).map(|report| report.best)
}

/// Like [find_global_optimal_build] but keeps every scenario candidate, in
/// generation order.
pub fn optimize_with_scenarios(
    params: &StatParameters,
) -> Result<OptimizationReport, OptimizeError> {
    let all = scenario_solutions(params);
    match best_candidate(&all) {
        Some(best) => {
            debug!(
                budget = params.budget,
                source = %best.source,
                x = best.x,
                y = best.y,
                z = best.z,
                damage = best.damage,
                "optimal build"
            );
            Ok(OptimizationReport { best, all })
        }
        None => {
            warn!(budget = params.budget, "no scenario produced a candidate");
            Err(OptimizeError::NoSolution)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSweepEntry {
    pub budget: i64,
    pub result: Result<Allocation, OptimizeError>,
}

/// Runs the optimizer for every budget in `budgets` on `pool`. Results are
/// in budget order.
pub fn sweep_budgets(
    params: &StatParameters,
    budgets: RangeInclusive<i64>,
    pool: &WorkerPool,
) -> Result<Vec<BudgetSweepEntry>, crate::parallel::PoolError> {
    let budgets: Vec<i64> = budgets.collect();
    pool.install(|| {
        budgets
            .par_iter()
            .map(|&budget| BudgetSweepEntry {
                budget,
                result: find_global_optimal_build(&params.with_budget(budget)),
            })
            .collect()
    })
}
