//! Exact 0/1 knapsack over integer seat weights.
//!
//! Every seat's value equals its weight, so the problem is a bounded subset
//! sum: find the heaviest selection not exceeding a capacity, optionally
//! using at most a given number of seats. The table holds, for each reachable
//! sum, the fewest seats that reach it; a sum is feasible under the count
//! bound iff that minimum fits.

use instant::Instant;
use std::convert::TryFrom;
use itertools::Itertools;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KnapsackError {
    #[error("no selection satisfies the constraints")]
    Infeasible,
    #[error("deadline passed before the table was complete")]
    TimedOut,
    #[error("table of {cells} cells exceeds the limit of {limit}")]
    TooLarge { cells: u64, limit: u64 },
}

/// Limits applied to a single solve.
#[derive(Debug, Clone, Copy)]
pub struct SolveLimits {
    pub deadline: Option<Instant>,
    pub max_table_cells: u64,
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self {
            deadline: None,
            max_table_cells: 1 << 28,
        }
    }
}

const UNREACHABLE: u32 = u32::MAX;

/// Largest total of a subset of `items` that is at most `capacity` and uses
/// at most `count_limit` items.
pub fn max_subset_sum(
    items: &[u64],
    capacity: u64,
    count_limit: usize,
    limits: SolveLimits,
) -> Result<u64, KnapsackError> {
    let divisor = items.iter().copied().fold(0, gcd).max(1);
    let reduced = items.iter().map(|&w| w / divisor).collect_vec();

    let reachable_max = reduced.iter().fold(0u64, |sum, &w| sum.saturating_add(w));
    let capacity = (capacity / divisor).min(reachable_max);

    let cells = capacity + 1;
    if cells > limits.max_table_cells {
        return Err(KnapsackError::TooLarge {
            cells,
            limit: limits.max_table_cells,
        });
    }

    let capacity = capacity as usize;
    let mut fewest = vec![UNREACHABLE; capacity + 1];
    fewest[0] = 0;

    for &weight in &reduced {
        if let Some(deadline) = limits.deadline {
            if Instant::now() >= deadline {
                return Err(KnapsackError::TimedOut);
            }
        }
        let weight = weight as usize;
        if weight > capacity {
            continue;
        }
        for sum in (weight..=capacity).rev() {
            let previous = fewest[sum - weight];
            if previous != UNREACHABLE && previous + 1 < fewest[sum] {
                fewest[sum] = previous + 1;
            }
        }
    }

    let limit = u32::try_from(count_limit).unwrap_or(u32::MAX);
    fewest
        .iter()
        .rposition(|&count| count <= limit)
        .map(|sum| sum as u64 * divisor)
        .ok_or(KnapsackError::Infeasible)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
