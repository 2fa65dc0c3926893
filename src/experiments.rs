//! Batch runs: evaluate many elections under several assignment sources.

use crate::axioms::{AxiomEvaluator, AxiomReport};
use crate::formats::{historical, FormatError};
use crate::generator::{self, SyntheticSettings};
use crate::methods::AssignmentMethod;
use crate::model::{ElectionError, ElectionInstance, SeatAssignment};
use crate::quota::{compute_quotas, QuotaOptions};
use colored::*;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    #[error("Election error: {0}")]
    Election(#[from] ElectionError),
}

pub type Result<T> = std::result::Result<T, ExperimentError>;

/// Where the assignment under evaluation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentSource {
    /// The assignment recorded with a historical election.
    Recorded,
    Method(AssignmentMethod),
}

impl AssignmentSource {
    pub fn name(self) -> &'static str {
        match self {
            AssignmentSource::Recorded => "Bundestag",
            AssignmentSource::Method(method) => method.name(),
        }
    }
}

/// One election to evaluate, with its recorded assignment if there is one.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub label: String,
    pub instance: ElectionInstance,
    pub recorded: Option<SeatAssignment>,
}

#[derive(Debug, Clone)]
pub struct InstanceFailure {
    pub label: String,
    pub error: String,
}

/// Axiom reports per source, in input order, for the elections that could
/// be evaluated.
#[derive(Debug, Clone)]
pub struct BatchResults {
    pub sources: Vec<AssignmentSource>,
    pub reports: Vec<Vec<AxiomReport>>,
    pub evaluated: usize,
    pub failures: Vec<InstanceFailure>,
}

/// Evaluate one election under every source. Quotas are computed once and
/// shared between the assignments.
pub fn evaluate_sources(
    instance: &ElectionInstance,
    recorded: Option<&SeatAssignment>,
    sources: &[AssignmentSource],
    options: &QuotaOptions,
) -> std::result::Result<Vec<AxiomReport>, ElectionError> {
    let quotas = compute_quotas(instance, options)?;
    sources
        .iter()
        .map(|source| -> std::result::Result<AxiomReport, ElectionError> {
            let assignment = match source {
                AssignmentSource::Recorded => recorded.cloned().ok_or_else(|| {
                    ElectionError::invalid("election has no recorded assignment")
                })?,
                AssignmentSource::Method(method) => method.assign(instance),
            };
            let evaluator = AxiomEvaluator::with_quotas(instance, &assignment, quotas.clone())?;
            Ok(evaluator.evaluate())
        })
        .collect()
}

/// Evaluate every input in parallel. An election that fails is recorded in
/// `failures` and left out of the results; the rest of the batch carries on.
pub fn run_batch(
    inputs: &[BatchInput],
    sources: &[AssignmentSource],
    options: &QuotaOptions,
) -> BatchResults {
    let outcomes: Vec<_> = inputs
        .par_iter()
        .map(|input| evaluate_sources(&input.instance, input.recorded.as_ref(), sources, options))
        .collect();

    let mut reports = vec![Vec::with_capacity(inputs.len()); sources.len()];
    let mut failures = Vec::new();
    let mut evaluated = 0;

    for (input, outcome) in inputs.iter().zip(outcomes) {
        match outcome {
            Ok(per_source) => {
                evaluated += 1;
                for (column, report) in reports.iter_mut().zip(per_source) {
                    column.push(report);
                }
            }
            Err(error) => {
                eprintln!(
                    "⚠️  Skipping {}: {}",
                    input.label.yellow(),
                    error.to_string().red()
                );
                failures.push(InstanceFailure {
                    label: input.label.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    BatchResults {
        sources: sources.to_vec(),
        reports,
        evaluated,
        failures,
    }
}

fn method_sources() -> Vec<AssignmentSource> {
    AssignmentMethod::ALL
        .iter()
        .map(|&method| AssignmentSource::Method(method))
        .collect()
}

/// Load the historical elections under `root` whose ids fall in `ids` and
/// evaluate the recorded assignment next to every method. Elections that
/// cannot be loaded are reported as failures.
pub fn run_historical(
    root: &Path,
    ids: RangeInclusive<u32>,
    options: &QuotaOptions,
) -> Result<BatchResults> {
    let mut inputs = Vec::new();
    let mut load_failures = Vec::new();

    let available = historical::discover_elections(root)?;
    for id in available.into_iter().filter(|id| ids.contains(id)) {
        match historical::load_election(root, id) {
            Ok(election) => {
                println!(
                    "  📊 Election {}: {} parties, {} seats",
                    id.to_string().bright_cyan(),
                    election.instance.num_parties(),
                    election.instance.num_seats()
                );
                inputs.push(BatchInput {
                    label: format!("election {}", id),
                    instance: election.instance,
                    recorded: Some(election.assignment),
                });
            }
            Err(error) => {
                eprintln!("⚠️  Skipping election {}: {}", id, error.to_string().red());
                load_failures.push(InstanceFailure {
                    label: format!("election {}", id),
                    error: error.to_string(),
                });
            }
        }
    }

    let mut sources = vec![AssignmentSource::Recorded];
    sources.extend(method_sources());

    let mut results = run_batch(&inputs, &sources, options);
    load_failures.append(&mut results.failures);
    results.failures = load_failures;
    Ok(results)
}

/// Generate synthetic elections and evaluate every method on them.
pub fn run_synthetic(settings: &SyntheticSettings, options: &QuotaOptions) -> Result<BatchResults> {
    let inputs: Vec<BatchInput> = generator::generate(settings)?
        .into_iter()
        .enumerate()
        .map(|(n, instance)| BatchInput {
            label: format!("synthetic election {}", n + 1),
            instance,
            recorded: None,
        })
        .collect();

    Ok(run_batch(&inputs, &method_sources(), options))
}
