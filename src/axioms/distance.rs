use super::AxiomEvaluator;
use crate::model::tolerance::{gt, lt, round_tenth};

impl<'a> AxiomEvaluator<'a> {
    /// Mean absolute gap between represented weight and weight quota.
    pub fn avg_dist_to_wq(&self) -> f64 {
        let total: f64 = self
            .represented
            .iter()
            .zip(&self.quotas.weight)
            .map(|(&rep, &quota)| (quota - rep).abs())
            .sum();
        round_tenth(total / self.represented.len() as f64)
    }

    /// Mean shortfall of the parties below their weighted lower quota.
    pub fn avg_dist_below_wlq(&self) -> f64 {
        mean_gap(
            self.represented
                .iter()
                .zip(&self.quotas.lower)
                .filter(|(&rep, &lower)| lt(rep, lower))
                .map(|(&rep, &lower)| lower - rep),
        )
    }

    /// Mean excess of the parties above their weighted upper quota.
    pub fn avg_dist_above_wuq(&self) -> f64 {
        mean_gap(
            self.represented
                .iter()
                .zip(&self.quotas.upper)
                .filter(|(&rep, &upper)| gt(rep, upper))
                .map(|(&rep, &upper)| rep - upper),
        )
    }
}

fn mean_gap(gaps: impl Iterator<Item = f64>) -> f64 {
    let (total, count) = gaps.fold((0.0, 0usize), |(total, count), gap| (total + gap, count + 1));
    if count == 0 {
        0.0
    } else {
        round_tenth(total / count as f64)
    }
}
