use proptest::prelude::*;
use weighted_seats::axioms;
use weighted_seats::methods::{AssignmentMethod, DivisorMethod};
use weighted_seats::model::ElectionInstance;
use weighted_seats::quota::{compute_quotas, QuotaOptions};

const EPS: f64 = 1e-6;

fn election() -> impl Strategy<Value = ElectionInstance> {
    (
        prop::collection::vec(0u64..60, 1..6),
        prop::collection::vec(1u32..40, 1..10),
    )
        .prop_filter("at least one vote", |(votes, _)| votes.iter().any(|&v| v > 0))
        .prop_map(|(votes, weights)| {
            let weights: Vec<f64> = weights.into_iter().map(f64::from).collect();
            ElectionInstance::new(&votes, &weights).unwrap()
        })
}

proptest! {
    #[test]
    fn quotas_bracket_the_weight_quota(instance in election()) {
        let quotas = compute_quotas(&instance, &QuotaOptions::default()).unwrap();
        for party in 0..instance.num_parties() {
            prop_assert!(quotas.lower[party] >= 0.0);
            prop_assert!(quotas.lower[party] <= quotas.weight[party] + EPS);
            prop_assert!(quotas.weight[party] <= quotas.upper[party] + EPS);
            prop_assert!(quotas.upper[party] <= instance.total_weight() + EPS);
        }
    }

    #[test]
    fn weight_quotas_sum_to_total_weight(instance in election()) {
        let quotas = compute_quotas(&instance, &QuotaOptions::default()).unwrap();
        let sum: f64 = quotas.weight.iter().sum();
        prop_assert!((sum - instance.total_weight()).abs() < EPS);
    }

    #[test]
    fn divisor_methods_assign_every_seat(instance in election()) {
        for method in [DivisorMethod::Adams, DivisorMethod::SainteLague, DivisorMethod::DHondt].iter() {
            let assignment = method.assign(&instance);
            prop_assert!(assignment.is_total());
            let represented: f64 = assignment.represented_weights(&instance).iter().sum();
            prop_assert!((represented - instance.total_weight()).abs() < EPS);
        }
    }

    #[test]
    fn every_method_can_be_evaluated(instance in election()) {
        for method in AssignmentMethod::ALL.iter() {
            let assignment = method.assign(&instance);
            let report = axioms::evaluate(&instance, &assignment).unwrap();
            // Every seat is assigned, so "any seat" implies "some seat".
            if report.wlq_x {
                prop_assert!(report.wlq_1);
            }
            if report.wuq_x {
                prop_assert!(report.wuq_1);
            }
            // A party over its upper quota could drop a seat and stay over its quota.
            if report.wuq_o {
                prop_assert!(report.wuq_x);
            }
            prop_assert!(report.avg_dist_to_wq >= 0.0);
        }
    }
}
