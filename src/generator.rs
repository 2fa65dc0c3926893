//! Random synthetic elections.

use crate::model::{ElectionError, ElectionInstance, Result};
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How to sample a batch of synthetic elections. Vote counts and seat
/// weights are drawn without replacement from the half-open ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticSettings {
    pub elections: usize,
    pub parties: usize,
    pub seats: usize,
    pub vote_range: Range<u64>,
    pub weight_range: Range<u64>,
    #[serde(default)]
    pub seed: u64,
}

impl SyntheticSettings {
    /// The three experiment sets: few mid-sized seats, many seats over a wide
    /// weight range, and many seats over a narrower one.
    pub fn preset(set: u8) -> Option<Self> {
        let (seats, vote_range, weight_range) = match set {
            1 => (25, 5..300, 10..50),
            2 => (100, 5..1000, 1..1000),
            3 => (100, 5..1000, 1..101),
            _ => return None,
        };
        Some(SyntheticSettings {
            elections: 1000,
            parties: 10,
            seats,
            vote_range,
            weight_range,
            seed: u64::from(set),
        })
    }

    fn validate(&self) -> Result<()> {
        let span = |range: &Range<u64>| range.end.saturating_sub(range.start);
        if self.parties == 0 || self.seats == 0 {
            return Err(ElectionError::invalid(
                "synthetic elections need at least one party and one seat",
            ));
        }
        if span(&self.vote_range) < self.parties as u64 {
            return Err(ElectionError::invalid(format!(
                "cannot draw {} distinct vote counts from {:?}",
                self.parties, self.vote_range
            )));
        }
        if span(&self.weight_range) < self.seats as u64 {
            return Err(ElectionError::invalid(format!(
                "cannot draw {} distinct weights from {:?}",
                self.seats, self.weight_range
            )));
        }
        if self.vote_range.end <= 1 || self.weight_range.start == 0 {
            return Err(ElectionError::invalid(
                "vote range must allow a positive count and weights must be positive",
            ));
        }
        // Counts are distinct, so only a lone party can draw an all-zero election.
        if self.parties == 1 && self.vote_range.start == 0 {
            return Err(ElectionError::invalid(
                "a single party needs a vote range starting above zero",
            ));
        }
        Ok(())
    }
}

/// Draw `settings.elections` instances. The same settings always produce
/// the same elections. Votes come out in non-increasing order.
pub fn generate(settings: &SyntheticSettings) -> Result<Vec<ElectionInstance>> {
    settings.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);

    (0..settings.elections)
        .map(|_| {
            let mut votes = sample(&mut rng, &settings.vote_range, settings.parties);
            votes.sort_unstable_by(|a, b| b.cmp(a));
            let weights: Vec<f64> = sample(&mut rng, &settings.weight_range, settings.seats)
                .into_iter()
                .map(|w| w as f64)
                .collect();
            ElectionInstance::new(&votes, &weights)
        })
        .collect()
}

fn sample(rng: &mut ChaCha8Rng, range: &Range<u64>, amount: usize) -> Vec<u64> {
    let length = (range.end - range.start) as usize;
    index::sample(rng, length, amount)
        .into_iter()
        .map(|offset| range.start + offset as u64)
        .collect()
}
