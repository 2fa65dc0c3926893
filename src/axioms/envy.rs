use super::AxiomEvaluator;
use crate::model::tolerance::{ge, lt};
use crate::model::PartyId;

impl<'a> AxiomEvaluator<'a> {
    /// Whenever a party envies another (less weight per vote), the envy
    /// disappears after removing any single seat from the envied party.
    pub fn wef_x(&self) -> bool {
        self.envious_pairs().all(|(envious, envied)| {
            let own = self.weight_per_vote(envious);
            self.assignment
                .seats_of(envied)
                .all(|seat| ge(own, self.per_vote_without(envied, seat)))
        })
    }

    /// Whenever a party envies another, removing some seat from the envied
    /// party makes the envy disappear.
    pub fn wef_1(&self) -> bool {
        self.envious_pairs().all(|(envious, envied)| {
            let own = self.weight_per_vote(envious);
            self.assignment
                .seats_of(envied)
                .any(|seat| ge(own, self.per_vote_without(envied, seat)))
        })
    }

    /// Ordered pairs of parties with votes where the first has strictly less
    /// represented weight per vote than the second. Every ordered pair is
    /// considered; a party never envies itself.
    fn envious_pairs(&self) -> impl Iterator<Item = (PartyId, PartyId)> + '_ {
        let voting = move |p: &PartyId| self.instance.votes()[*p] > 0;
        let parties = self.represented.len();

        (0..parties).filter(voting).flat_map(move |envious| {
            (0..parties)
                .filter(voting)
                .filter(move |&envied| {
                    lt(self.weight_per_vote(envious), self.weight_per_vote(envied))
                })
                .map(move |envied| (envious, envied))
        })
    }

    fn weight_per_vote(&self, party: PartyId) -> f64 {
        self.represented[party] / self.instance.votes()[party] as f64
    }

    fn per_vote_without(&self, party: PartyId, seat: usize) -> f64 {
        (self.represented[party] - self.weight(seat)) / self.instance.votes()[party] as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::axioms::AxiomEvaluator;
    use crate::model::{ElectionInstance, SeatAssignment};
    use crate::quota::QuotaOptions;

    fn envy(votes: &[u64], weights: &[f64], parties: Vec<Option<usize>>) -> (bool, bool) {
        let instance = ElectionInstance::new(votes, weights).unwrap();
        let assignment = SeatAssignment::from_parties(parties);
        let evaluator = AxiomEvaluator::new(&instance, &assignment, &QuotaOptions::default()).unwrap();
        (evaluator.wef_x(), evaluator.wef_1())
    }

    #[test]
    fn proportional_assignment_is_envy_free() {
        assert_eq!(
            envy(&[3, 2, 1], &[2.0, 2.0, 1.0, 1.0], vec![Some(0), Some(1), Some(0), Some(2)]),
            (true, true)
        );
    }

    #[test]
    fn one_removable_seat_satisfies_wef_1_only() {
        // Equal votes; party 1 holds 4 + 1 = 5, party 0 holds 1.
        // Removing the 4 ends the envy (1 >= 1), removing the 1 does not (1 < 4).
        assert_eq!(
            envy(&[1, 1], &[4.0, 1.0, 1.0], vec![Some(1), Some(0), Some(1)]),
            (false, true)
        );
    }

    #[test]
    fn hoarding_violates_both() {
        // Party 1 holds three 1-seats, party 0 none: removing one leaves 2 > 0.
        assert_eq!(
            envy(&[1, 1], &[1.0, 1.0, 1.0], vec![Some(1), Some(1), Some(1)]),
            (false, false)
        );
    }

    #[test]
    fn parties_without_votes_are_skipped() {
        // Party 1 has no votes and cannot envy or be envied.
        assert_eq!(
            envy(&[1, 0], &[1.0, 1.0, 1.0], vec![Some(1), Some(1), Some(0)]),
            (true, true)
        );
    }

    #[test]
    fn unassigned_seats_belong_to_nobody() {
        // The 2-seat is unassigned; party 1's envy of party 0 (1 vs 0) ends once
        // party 0's only seat is removed.
        assert_eq!(envy(&[1, 1], &[2.0, 1.0], vec![None, Some(0)]), (true, true));
    }
}
