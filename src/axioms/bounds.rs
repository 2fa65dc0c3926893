use super::AxiomEvaluator;
use crate::model::tolerance::{ge, gt, le, lt};
use crate::model::PartyId;

impl<'a> AxiomEvaluator<'a> {
    /// Every party reaches its weighted lower quota.
    pub fn wlq_o(&self) -> bool {
        self.represented
            .iter()
            .zip(&self.quotas.lower)
            .all(|(&rep, &lower)| ge(rep, lower))
    }

    /// No party below its quota could take any seat it does not hold and
    /// still stay at or under its quota.
    pub fn wlq_x(&self) -> bool {
        self.below_quota().all(|party| {
            let rep = self.represented[party];
            let quota = self.quotas.weight[party];
            self.seats_not_held_by(party)
                .all(|seat| gt(rep + self.weight(seat), quota))
        })
    }

    /// Like [`wlq_x`](Self::wlq_x), but only seats of parties already at or
    /// above their quota are candidates.
    pub fn wlq_x_r(&self) -> bool {
        let sufficient: Vec<bool> = self
            .represented
            .iter()
            .zip(&self.quotas.weight)
            .map(|(&rep, &quota)| ge(rep, quota))
            .collect();

        self.below_quota().all(|party| {
            let rep = self.represented[party];
            let quota = self.quotas.weight[party];
            self.assignment
                .parties()
                .iter()
                .enumerate()
                .filter(|(_, holder)| holder.map_or(false, |q| sufficient[q]))
                .all(|(seat, _)| gt(rep + self.weight(seat), quota))
        })
    }

    /// Every party below its quota would pass it by taking some seat it does
    /// not hold.
    pub fn wlq_1(&self) -> bool {
        self.below_quota().all(|party| {
            let rep = self.represented[party];
            let quota = self.quotas.weight[party];
            self.seats_not_held_by(party)
                .any(|seat| gt(rep + self.weight(seat), quota))
        })
    }

    /// No party exceeds its weighted upper quota.
    pub fn wuq_o(&self) -> bool {
        self.represented
            .iter()
            .zip(&self.quotas.upper)
            .all(|(&rep, &upper)| le(rep, upper))
    }

    /// No party above its quota could give up any of its seats and still be
    /// at or over its quota.
    pub fn wuq_x(&self) -> bool {
        self.above_quota().all(|party| {
            let rep = self.represented[party];
            let quota = self.quotas.weight[party];
            self.assignment
                .seats_of(party)
                .all(|seat| lt(rep - self.weight(seat), quota))
        })
    }

    /// Every party above its quota drops to or below it by giving up some
    /// seat it holds.
    pub fn wuq_1(&self) -> bool {
        self.above_quota().all(|party| {
            let rep = self.represented[party];
            let quota = self.quotas.weight[party];
            self.assignment
                .seats_of(party)
                .any(|seat| le(rep - self.weight(seat), quota))
        })
    }

    fn below_quota(&self) -> impl Iterator<Item = PartyId> + '_ {
        (0..self.represented.len()).filter(move |&p| lt(self.represented[p], self.quotas.weight[p]))
    }

    fn above_quota(&self) -> impl Iterator<Item = PartyId> + '_ {
        (0..self.represented.len()).filter(move |&p| gt(self.represented[p], self.quotas.weight[p]))
    }

    /// Seats held by another party or by nobody.
    fn seats_not_held_by(&self, party: PartyId) -> impl Iterator<Item = usize> + '_ {
        self.assignment
            .parties()
            .iter()
            .enumerate()
            .filter(move |(_, holder)| **holder != Some(party))
            .map(|(seat, _)| seat)
    }
}
