//! Proportionality and envy-freeness axioms for a seat assignment.

mod distance;
mod envy;
mod bounds;

use crate::model::{ElectionError, ElectionInstance, Result, SeatAssignment};
use crate::quota::{compute_quotas, QuotaOptions, Quotas};
use serde::Serialize;
use std::fmt;

/// Checks one assignment against the axioms. Quotas and represented weights
/// are computed once on construction.
pub struct AxiomEvaluator<'a> {
    instance: &'a ElectionInstance,
    assignment: &'a SeatAssignment,
    represented: Vec<f64>,
    quotas: Quotas,
}

impl<'a> AxiomEvaluator<'a> {
    pub fn new(
        instance: &'a ElectionInstance,
        assignment: &'a SeatAssignment,
        options: &QuotaOptions,
    ) -> Result<Self> {
        assignment.check_against(instance)?;
        let quotas = compute_quotas(instance, options)?;
        Self::with_quotas(instance, assignment, quotas)
    }

    /// Reuse quotas already computed for `instance`, e.g. when several
    /// assignments of the same election are evaluated.
    pub fn with_quotas(
        instance: &'a ElectionInstance,
        assignment: &'a SeatAssignment,
        quotas: Quotas,
    ) -> Result<Self> {
        assignment.check_against(instance)?;
        let parties = instance.num_parties();
        if quotas.weight.len() != parties
            || quotas.lower.len() != parties
            || quotas.upper.len() != parties
        {
            return Err(ElectionError::invalid(format!(
                "quotas do not cover the {} parties of the election",
                parties
            )));
        }

        let represented = assignment.represented_weights(instance);
        Ok(AxiomEvaluator {
            instance,
            assignment,
            represented,
            quotas,
        })
    }

    pub fn represented(&self) -> &[f64] {
        &self.represented
    }

    pub fn quotas(&self) -> &Quotas {
        &self.quotas
    }

    fn weight(&self, seat: usize) -> f64 {
        self.instance.weights()[seat]
    }

    pub fn evaluate(&self) -> AxiomReport {
        AxiomReport {
            wlq_o: self.wlq_o(),
            wlq_x: self.wlq_x(),
            wlq_1: self.wlq_1(),
            wuq_o: self.wuq_o(),
            wuq_x: self.wuq_x(),
            wuq_1: self.wuq_1(),
            avg_dist_to_wq: self.avg_dist_to_wq(),
            avg_dist_below_wlq: self.avg_dist_below_wlq(),
            avg_dist_above_wuq: self.avg_dist_above_wuq(),
            wef_x: self.wef_x(),
            wef_1: self.wef_1(),
            wlq_x_r: self.wlq_x_r(),
        }
    }
}

/// Evaluate every axiom with default quota options.
pub fn evaluate(instance: &ElectionInstance, assignment: &SeatAssignment) -> Result<AxiomReport> {
    AxiomEvaluator::new(instance, assignment, &QuotaOptions::default()).map(|e| e.evaluate())
}

/// Results of every axiom and distance for one assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxiomReport {
    pub wlq_o: bool,
    pub wlq_x: bool,
    pub wlq_1: bool,
    pub wuq_o: bool,
    pub wuq_x: bool,
    pub wuq_1: bool,
    pub avg_dist_to_wq: f64,
    pub avg_dist_below_wlq: f64,
    pub avg_dist_above_wuq: f64,
    pub wef_x: bool,
    pub wef_1: bool,
    pub wlq_x_r: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AxiomValue {
    Satisfied(bool),
    Distance(f64),
}

/// Names of the entries of [`AxiomReport::values`], in order.
pub const AXIOM_NAMES: [&str; 12] = [
    "WLQo",
    "WLQ-X",
    "WLQ-1",
    "WUQo",
    "WUQ-X",
    "WUQ-1",
    "AvgDistToWQ",
    "AvgDistBelowWLQ",
    "AvgDistAboveWUQ",
    "WEF-X",
    "WEF-1",
    "WLQ-X-r",
];

impl AxiomReport {
    pub fn values(&self) -> [AxiomValue; 12] {
        use self::AxiomValue::{Distance, Satisfied};
        [
            Satisfied(self.wlq_o),
            Satisfied(self.wlq_x),
            Satisfied(self.wlq_1),
            Satisfied(self.wuq_o),
            Satisfied(self.wuq_x),
            Satisfied(self.wuq_1),
            Distance(self.avg_dist_to_wq),
            Distance(self.avg_dist_below_wlq),
            Distance(self.avg_dist_above_wuq),
            Satisfied(self.wef_x),
            Satisfied(self.wef_1),
            Satisfied(self.wlq_x_r),
        ]
    }
}

impl fmt::Display for AxiomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Axioms? --> WLQo: {}, WLQ-X: {}, WLQ-X-r: {}, WLQ-1: {}, WUQo: {}, WUQ-X: {}, WUQ-1: {}, WEF-X: {}, WEF-1: {}",
            self.wlq_o,
            self.wlq_x,
            self.wlq_x_r,
            self.wlq_1,
            self.wuq_o,
            self.wuq_x,
            self.wuq_1,
            self.wef_x,
            self.wef_1
        )?;
        write!(
            f,
            "Average distances? --> To Weight Quota: {:.1}, Below WLQ: {:.1}, Above WUQ: {:.1}",
            self.avg_dist_to_wq, self.avg_dist_below_wlq, self.avg_dist_above_wuq
        )
    }
}
