use super::{ElectionError, ElectionInstance, PartyId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The party holding each seat, in the instance's sorted seat order.
/// `None` marks a seat no party received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAssignment {
    parties: Vec<Option<PartyId>>,
}

impl SeatAssignment {
    pub fn unassigned(num_seats: usize) -> Self {
        SeatAssignment {
            parties: vec![None; num_seats],
        }
    }

    pub fn from_parties(parties: Vec<Option<PartyId>>) -> Self {
        SeatAssignment { parties }
    }

    pub fn parties(&self) -> &[Option<PartyId>] {
        &self.parties
    }

    pub fn party_of(&self, seat: usize) -> Option<PartyId> {
        self.parties[seat]
    }

    pub(crate) fn assign(&mut self, seat: usize, party: PartyId) {
        self.parties[seat] = Some(party);
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn is_total(&self) -> bool {
        self.parties.iter().all(Option::is_some)
    }

    pub fn unassigned_count(&self) -> usize {
        self.parties.iter().filter(|party| party.is_none()).count()
    }

    /// Seats held by `party`, as indices into the sorted weights.
    pub fn seats_of(&self, party: PartyId) -> impl Iterator<Item = usize> + '_ {
        self.parties
            .iter()
            .enumerate()
            .filter(move |(_, holder)| **holder == Some(party))
            .map(|(seat, _)| seat)
    }

    /// Represented weight per party. Unassigned seats count for nobody.
    pub fn represented_weights(&self, instance: &ElectionInstance) -> Vec<f64> {
        let mut represented = vec![0.0; instance.num_parties()];
        for (seat, holder) in self.parties.iter().enumerate() {
            if let Some(party) = holder {
                represented[*party] += instance.weights()[seat];
            }
        }
        represented
    }

    /// Verify the assignment covers every seat and names only known parties.
    pub fn check_against(&self, instance: &ElectionInstance) -> Result<()> {
        if self.len() != instance.num_seats() {
            return Err(ElectionError::invalid(format!(
                "assignment covers {} seats but the election has {}",
                self.len(),
                instance.num_seats()
            )));
        }
        if let Some(party) = self
            .parties
            .iter()
            .flatten()
            .find(|&&party| party >= instance.num_parties())
        {
            return Err(ElectionError::invalid(format!(
                "seat assigned to party {} but the election has {} parties",
                party,
                instance.num_parties()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SeatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (seat, holder) in self.parties.iter().enumerate() {
            if seat > 0 {
                write!(f, ", ")?;
            }
            match holder {
                Some(party) => write!(f, "{}", party)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}
