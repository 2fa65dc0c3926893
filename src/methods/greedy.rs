use crate::model::{ElectionInstance, PartyId, SeatAssignment};

/// Give each seat, heaviest first, to the party furthest below its weight
/// quota. A seat is left unassigned once no party is below its quota.
pub fn assign(instance: &ElectionInstance) -> SeatAssignment {
    let shortfalls = Shortfalls::new(instance);
    let mut represented = vec![0u128; instance.num_parties()];
    let mut assignment = SeatAssignment::unassigned(instance.num_seats());

    for (seat, weight) in instance.weight_units().into_iter().enumerate() {
        if let Some(party) = shortfalls.largest(&represented) {
            assignment.assign(seat, party);
            represented[party] += u128::from(weight);
        }
    }

    assignment
}

/// Shortfalls below the weight quota, scaled by the total vote count so they
/// stay integral: `total_units * votes[p] - represented[p] * total_votes`.
struct Shortfalls<'a> {
    votes: &'a [u64],
    total_units: i128,
    total_votes: i128,
}

impl<'a> Shortfalls<'a> {
    fn new(instance: &'a ElectionInstance) -> Self {
        Shortfalls {
            votes: instance.votes(),
            total_units: instance.weight_units().iter().map(|&u| i128::from(u)).sum(),
            total_votes: instance.votes().iter().map(|&v| i128::from(v)).sum(),
        }
    }

    fn of(&self, party: PartyId, represented: u128) -> i128 {
        // Weights and votes are bounded so both products fit.
        self.total_units * i128::from(self.votes[party]) - represented as i128 * self.total_votes
    }

    /// The party furthest below its quota, the earliest on ties; `None` once
    /// every party has reached its quota.
    fn largest(&self, represented: &[u128]) -> Option<PartyId> {
        let mut best: Option<(PartyId, i128)> = None;
        for (party, &rep) in represented.iter().enumerate() {
            let shortfall = self.of(party, rep);
            if shortfall <= 0 {
                continue;
            }
            match best {
                Some((_, best_shortfall)) if shortfall <= best_shortfall => {}
                _ => best = Some((party, shortfall)),
            }
        }
        best.map(|(party, _)| party)
    }
}
