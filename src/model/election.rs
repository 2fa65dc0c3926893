use super::{ElectionError, PartyId, Result, SeatAssignment};
use serde::Serialize;

/// Weights are stored as `f64` but must be exact in thousandths so the quota
/// knapsack can work in integer milli-units.
pub const WEIGHT_SCALE: u64 = 1000;

/// Largest total seat weight, in milli-units. Keeps the exact quotient and
/// shortfall products of the assignment methods within 128 bits.
pub const MAX_TOTAL_UNITS: u64 = 1 << 62;

/// Votes per party and the seat weights, normalized for the assignment rules.
///
/// The weights are copied and sorted into non-increasing order on
/// construction (ties keep their input order); every seat index used by the
/// rest of the crate refers to this sorted order. The caller's slices are
/// left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionInstance {
    votes: Vec<u64>,
    weights: Vec<f64>,
    /// For each sorted seat, its position in the caller's weights slice.
    original_seats: Vec<usize>,
}

impl ElectionInstance {
    pub fn new(votes: &[u64], weights: &[f64]) -> Result<Self> {
        validate_votes(votes)?;
        validate_weights(weights)?;

        let original_seats = sorted_seat_order(weights);
        let sorted_weights = original_seats.iter().map(|&seat| weights[seat]).collect();

        Ok(ElectionInstance {
            votes: votes.to_vec(),
            weights: sorted_weights,
            original_seats,
        })
    }

    /// Build an instance together with an existing assignment, given as
    /// `(weight, party)` pairs in input order. The pairs are sorted together so
    /// the returned assignment lines up with the sorted weights.
    pub fn with_assignment(
        votes: &[u64],
        seats: &[(f64, Option<PartyId>)],
    ) -> Result<(Self, SeatAssignment)> {
        let weights: Vec<f64> = seats.iter().map(|(weight, _)| *weight).collect();
        let instance = ElectionInstance::new(votes, &weights)?;

        let parties = instance
            .original_seats
            .iter()
            .map(|&seat| seats[seat].1)
            .collect();
        let assignment = SeatAssignment::from_parties(parties);
        assignment.check_against(&instance)?;

        Ok((instance, assignment))
    }

    pub fn votes(&self) -> &[u64] {
        &self.votes
    }

    /// Seat weights in non-increasing order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn num_parties(&self) -> usize {
        self.votes.len()
    }

    pub fn num_seats(&self) -> usize {
        self.weights.len()
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn vote_share(&self, party: PartyId) -> f64 {
        self.votes[party] as f64 / self.total_votes() as f64
    }

    /// Position of a (sorted) seat in the weights the instance was built from.
    pub fn original_seat_index(&self, seat: usize) -> usize {
        self.original_seats[seat]
    }

    /// Seat weights as integer milli-units.
    pub fn weight_units(&self) -> Vec<u64> {
        self.weights.iter().map(|&w| to_units(w)).collect()
    }
}

pub(crate) fn to_units(weight: f64) -> u64 {
    (weight * WEIGHT_SCALE as f64).round() as u64
}

pub(crate) fn validate_votes(votes: &[u64]) -> Result<()> {
    if votes.is_empty() {
        return Err(ElectionError::invalid("an election needs at least one party"));
    }
    let total = votes
        .iter()
        .try_fold(0u64, |total, &v| total.checked_add(v))
        .ok_or_else(|| ElectionError::invalid("total votes overflow a 64-bit count"))?;
    if total == 0 {
        return Err(ElectionError::invalid("total votes must be positive"));
    }
    Ok(())
}

fn validate_weights(weights: &[f64]) -> Result<()> {
    if weights.is_empty() {
        return Err(ElectionError::invalid("an election needs at least one seat"));
    }
    for (seat, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ElectionError::invalid(format!(
                "seat {} has non-positive weight {}",
                seat, weight
            )));
        }
        let scaled = weight * WEIGHT_SCALE as f64;
        if scaled > MAX_TOTAL_UNITS as f64 {
            return Err(ElectionError::invalid(format!(
                "seat {} weight {} is too large",
                seat, weight
            )));
        }
        if (scaled - scaled.round()).abs() > 1e-6 {
            return Err(ElectionError::invalid(format!(
                "seat {} weight {} is finer than 1/{}",
                seat, weight, WEIGHT_SCALE
            )));
        }
    }
    let total = weights
        .iter()
        .try_fold(0u64, |total, &w| total.checked_add(to_units(w)))
        .filter(|&total| total <= MAX_TOTAL_UNITS);
    if total.is_none() {
        return Err(ElectionError::invalid(format!(
            "total seat weight exceeds {} units",
            MAX_TOTAL_UNITS
        )));
    }
    Ok(())
}

fn sorted_seat_order(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    // Stable, so equal weights keep their input order.
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_a_copy_of_the_weights() {
        let weights = vec![1.0, 3.0, 2.0, 3.0];
        let instance = ElectionInstance::new(&[5, 5], &weights).unwrap();

        assert_eq!(instance.weights(), &[3.0, 3.0, 2.0, 1.0]);
        assert_eq!(weights, vec![1.0, 3.0, 2.0, 3.0]);
        assert_eq!(instance.original_seat_index(0), 1);
        assert_eq!(instance.original_seat_index(1), 3);
        assert_eq!(instance.original_seat_index(3), 0);
    }

    #[test]
    fn rejects_degenerate_elections() {
        assert!(matches!(
            ElectionInstance::new(&[0, 0], &[1.0]),
            Err(ElectionError::InvalidInput(_))
        ));
        assert!(ElectionInstance::new(&[], &[1.0]).is_err());
        assert!(ElectionInstance::new(&[1], &[]).is_err());
        assert!(ElectionInstance::new(&[1], &[0.0]).is_err());
        assert!(ElectionInstance::new(&[1], &[f64::NAN]).is_err());
        assert!(ElectionInstance::new(&[1], &[0.0001]).is_err());
    }

    #[test]
    fn rejects_sums_that_would_overflow() {
        assert!(matches!(
            ElectionInstance::new(&[u64::MAX, 1], &[1.0]),
            Err(ElectionError::InvalidInput(_))
        ));
        assert!(ElectionInstance::new(&[1], &[1e17]).is_err());
        let heavy = (MAX_TOTAL_UNITS / WEIGHT_SCALE) as f64;
        assert!(ElectionInstance::new(&[1], &[heavy]).is_ok());
        assert!(ElectionInstance::new(&[1], &[heavy, heavy]).is_err());
    }

    #[test]
    fn keeps_assignment_aligned_with_sorted_weights() {
        let seats = [(1.0, Some(1)), (4.0, Some(0)), (2.0, None)];
        let (instance, assignment) = ElectionInstance::with_assignment(&[3, 1], &seats).unwrap();

        assert_eq!(instance.weights(), &[4.0, 2.0, 1.0]);
        assert_eq!(assignment.parties(), &[Some(0), None, Some(1)]);
    }

    #[test]
    fn rejects_assignment_to_unknown_party() {
        let seats = [(1.0, Some(2))];
        assert!(ElectionInstance::with_assignment(&[3, 1], &seats).is_err());
    }

    #[test]
    fn converts_weights_to_milli_units() {
        let instance = ElectionInstance::new(&[1], &[2.5, 1.0]).unwrap();
        assert_eq!(instance.weight_units(), vec![2500, 1000]);
    }
}
