//! Ideal and achievable weight quotas per party.

pub mod knapsack;

use crate::model::election::{self, WEIGHT_SCALE};
use crate::model::{ElectionError, ElectionInstance, PartyId, Result};
use instant::Instant;
use knapsack::{max_subset_sum, KnapsackError, SolveLimits};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// Options for the per-party knapsack solves.
#[derive(Debug, Clone)]
pub struct QuotaOptions {
    /// Wall-clock budget for one quota family (all parties together).
    pub time_limit: Option<Duration>,
    /// Largest DP table a single solve may allocate.
    pub max_table_cells: u64,
}

impl Default for QuotaOptions {
    fn default() -> Self {
        Self {
            time_limit: None,
            max_table_cells: SolveLimits::default().max_table_cells,
        }
    }
}

impl QuotaOptions {
    fn limits(&self) -> SolveLimits {
        SolveLimits {
            deadline: self.time_limit.map(|limit| Instant::now() + limit),
            max_table_cells: self.max_table_cells,
        }
    }
}

/// All three quota families for one election.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quotas {
    pub weight: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

pub fn compute_quotas(instance: &ElectionInstance, options: &QuotaOptions) -> Result<Quotas> {
    Ok(Quotas {
        weight: weight_quotas(instance),
        lower: weighted_lower_quotas(instance, options)?,
        upper: weighted_upper_quotas(instance, options)?,
    })
}

/// Each party's proportional share of the total seat weight.
pub fn weight_quotas(instance: &ElectionInstance) -> Vec<f64> {
    proportional_shares(instance.votes(), instance.total_weight())
}

/// [`weight_quotas`] on raw sequences, for callers without an instance.
pub fn weight_quotas_for(votes: &[u64], weights: &[f64]) -> Result<Vec<f64>> {
    election::validate_votes(votes)?;
    if weights.is_empty() {
        return Err(ElectionError::invalid("an election needs at least one seat"));
    }
    Ok(proportional_shares(votes, weights.iter().sum()))
}

fn proportional_shares(votes: &[u64], total_weight: f64) -> Vec<f64> {
    let total_votes = votes.iter().sum::<u64>() as f64;
    votes
        .iter()
        .map(|&v| total_weight * (v as f64 / total_votes))
        .collect()
}

/// Heaviest selection of seats that stays within both the party's weight
/// quota and its proportional seat count, `floor(seats * share)`.
pub fn weighted_lower_quotas(
    instance: &ElectionInstance,
    options: &QuotaOptions,
) -> Result<Vec<f64>> {
    let units = instance.weight_units();
    let total_units: u128 = units.iter().map(|&u| u as u128).sum();
    let total_votes = instance.total_votes() as u128;
    let num_seats = instance.num_seats() as u128;
    let limits = options.limits();

    (0..instance.num_parties())
        .into_par_iter()
        .map(|party| {
            let votes = instance.votes()[party] as u128;
            let capacity = (total_units * votes / total_votes) as u64;
            let seat_bound = (num_seats * votes / total_votes) as usize;

            max_subset_sum(&units, capacity, seat_bound, limits)
                .map(from_units)
                .map_err(|e| solve_error(e, party, options))
        })
        .collect()
}

/// Lightest selection of seats reaching at least the party's weight quota.
///
/// Solved through the complement: the seats left out form the heaviest
/// selection fitting within `total - quota`.
pub fn weighted_upper_quotas(
    instance: &ElectionInstance,
    options: &QuotaOptions,
) -> Result<Vec<f64>> {
    let units = instance.weight_units();
    let total_units: u128 = units.iter().map(|&u| u as u128).sum();
    let total_votes = instance.total_votes() as u128;
    let limits = options.limits();

    (0..instance.num_parties())
        .into_par_iter()
        .map(|party| {
            let others = total_votes - instance.votes()[party] as u128;
            let spare = (total_units * others / total_votes) as u64;

            max_subset_sum(&units, spare, units.len(), limits)
                .map(|left_out| from_units(total_units as u64 - left_out))
                .map_err(|e| solve_error(e, party, options))
        })
        .collect()
}

fn from_units(units: u64) -> f64 {
    units as f64 / WEIGHT_SCALE as f64
}

fn solve_error(error: KnapsackError, party: PartyId, options: &QuotaOptions) -> ElectionError {
    match error {
        KnapsackError::Infeasible => ElectionError::OptimizationInfeasible { party },
        KnapsackError::TimedOut => ElectionError::SolveTimedOut {
            party,
            limit: options.time_limit.unwrap_or_default(),
        },
        KnapsackError::TooLarge { .. } => {
            ElectionError::InvalidInput(format!("quota for party {}: {}", party, error))
        }
    }
}
