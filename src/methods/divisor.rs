use crate::model::{ElectionError, ElectionInstance, PartyId, Result, SeatAssignment};
use serde::{Deserialize, Serialize};

/// Divisor methods generalized to weighted seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisorMethod {
    Adams,
    SainteLague,
    DHondt,
}

impl DivisorMethod {
    pub fn from_divisor(divisor: f64) -> Result<Self> {
        if divisor == 0.0 {
            Ok(DivisorMethod::Adams)
        } else if divisor == 0.5 {
            Ok(DivisorMethod::SainteLague)
        } else if divisor == 1.0 {
            Ok(DivisorMethod::DHondt)
        } else {
            Err(ElectionError::invalid(format!(
                "divisor must be 0, 0.5 or 1, got {}",
                divisor
            )))
        }
    }

    pub fn divisor(self) -> f64 {
        match self {
            DivisorMethod::Adams => 0.0,
            DivisorMethod::SainteLague => 0.5,
            DivisorMethod::DHondt => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DivisorMethod::Adams => "Adams",
            DivisorMethod::SainteLague => "Sainte-Laguë",
            DivisorMethod::DHondt => "D'Hondt",
        }
    }

    /// Twice the divisor, so every method's denominator is an integer.
    fn doubled_divisor(self) -> u128 {
        match self {
            DivisorMethod::Adams => 0,
            DivisorMethod::SainteLague => 1,
            DivisorMethod::DHondt => 2,
        }
    }

    /// Hand out seats heaviest first; each goes to the party with the highest
    /// quotient, ties to the lowest party index. Representation is tracked in
    /// weight milli-units so equal quotients compare equal.
    pub fn assign(self, instance: &ElectionInstance) -> SeatAssignment {
        let mut represented = vec![0u128; instance.num_parties()];
        let mut assignment = SeatAssignment::unassigned(instance.num_seats());

        for (seat, weight) in instance.weight_units().into_iter().enumerate() {
            let weight = u128::from(weight);
            let quotients = instance.votes().iter().zip(&represented).map(|(&v, &rep)| Quotient {
                votes: u128::from(v),
                denominator: 2 * rep + weight * self.doubled_divisor(),
            });
            if let Some(winner) = highest_quotient(quotients) {
                assignment.assign(seat, winner);
                represented[winner] += weight;
            }
        }

        assignment
    }
}

/// `votes / denominator`, kept as a fraction. A zero denominator only occurs
/// under Adams for a party with no seats yet and counts as infinite.
#[derive(Debug, Clone, Copy)]
struct Quotient {
    votes: u128,
    denominator: u128,
}

impl Quotient {
    fn beats(self, other: Quotient) -> bool {
        match (self.denominator, other.denominator) {
            (0, _) => other.denominator != 0,
            (_, 0) => false,
            // Weights and votes are bounded so the products fit.
            (own, theirs) => self.votes * theirs > other.votes * own,
        }
    }
}

fn highest_quotient(quotients: impl Iterator<Item = Quotient>) -> Option<PartyId> {
    let mut best: Option<(PartyId, Quotient)> = None;
    for (party, q) in quotients.enumerate() {
        match best {
            Some((_, best_q)) if !q.beats(best_q) => {}
            _ => best = Some((party, q)),
        }
    }
    best.map(|(party, _)| party)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ElectionInstance {
        ElectionInstance::new(&[3, 2, 1], &[2.0, 2.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn only_three_divisors_are_valid() {
        assert_eq!(DivisorMethod::from_divisor(0.0).unwrap(), DivisorMethod::Adams);
        assert_eq!(DivisorMethod::from_divisor(0.5).unwrap(), DivisorMethod::SainteLague);
        assert_eq!(DivisorMethod::from_divisor(1.0).unwrap(), DivisorMethod::DHondt);
        assert!(matches!(
            DivisorMethod::from_divisor(2.0),
            Err(ElectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn dhondt_breaks_ties_towards_earlier_party() {
        let assignment = DivisorMethod::DHondt.assign(&scenario());
        assert_eq!(assignment.parties(), &[Some(0), Some(1), Some(0), Some(2)]);
    }

    #[test]
    fn adams_seats_every_party_first() {
        let assignment = DivisorMethod::Adams.assign(&scenario());
        assert_eq!(assignment.parties(), &[Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn sainte_lague_on_scenario() {
        // Seat 1: 3/1, 2/1, 1/1 -> 0. Seat 2: 3/3, 2/1, 1/1 -> 1.
        // Seat 3: 3/2.5, 2/2.5, 1/0.5 -> 2. Seat 4: 3/2.5, 2/2.5, 1/1.5 -> 0.
        let assignment = DivisorMethod::SainteLague.assign(&scenario());
        assert_eq!(assignment.parties(), &[Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn fractional_ties_go_to_earlier_party() {
        // Seat 0.1: party 0 holds 0.4 + 0.2, party 1 holds 0.3 + 0.3; both
        // quotients are 1 / 0.7 and the earlier party wins.
        let instance = ElectionInstance::new(&[1, 1], &[0.4, 0.3, 0.3, 0.2, 0.1]).unwrap();
        let assignment = DivisorMethod::DHondt.assign(&instance);
        assert_eq!(
            assignment.parties(),
            &[Some(0), Some(1), Some(1), Some(0), Some(0)]
        );
    }

    #[test]
    fn quotient_ordering_is_exact() {
        let q = |votes, denominator| Quotient { votes, denominator };
        assert!(q(3, 7).beats(q(2, 5)));
        assert!(!q(2, 6).beats(q(1, 3)));
        assert!(q(0, 0).beats(q(5, 1)));
        assert!(!q(5, 0).beats(q(0, 0)));
        assert!(!q(5, 1).beats(q(1, 0)));
    }

    #[test]
    fn zero_vote_parties_lose_under_dhondt() {
        let instance = ElectionInstance::new(&[0, 5], &[1.0, 1.0]).unwrap();
        let assignment = DivisorMethod::DHondt.assign(&instance);
        assert_eq!(assignment.parties(), &[Some(1), Some(1)]);
    }
}
