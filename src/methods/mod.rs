//! Weighted seat assignment methods.

pub mod divisor;
pub mod greedy;

use crate::model::{ElectionInstance, SeatAssignment};
pub use divisor::DivisorMethod;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A rule that turns votes and seat weights into a seat assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentMethod {
    Divisor(DivisorMethod),
    Greedy,
}

impl AssignmentMethod {
    pub const ALL: [AssignmentMethod; 4] = [
        AssignmentMethod::Divisor(DivisorMethod::Adams),
        AssignmentMethod::Divisor(DivisorMethod::DHondt),
        AssignmentMethod::Divisor(DivisorMethod::SainteLague),
        AssignmentMethod::Greedy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssignmentMethod::Divisor(method) => method.name(),
            AssignmentMethod::Greedy => "Greedy",
        }
    }

    pub fn assign(self, instance: &ElectionInstance) -> SeatAssignment {
        match self {
            AssignmentMethod::Divisor(method) => method.assign(instance),
            AssignmentMethod::Greedy => greedy::assign(instance),
        }
    }
}

/// One line per method showing the seat assignment it returns.
pub fn describe_assignments(instance: &ElectionInstance) -> String {
    let mut out = String::from("Seat assignment returned by:");
    for method in AssignmentMethod::ALL.iter() {
        let _ = write!(out, "\n{} --> {}", method.name(), method.assign(instance));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_every_method() {
        let instance = ElectionInstance::new(&[3, 2, 1], &[2.0, 2.0, 1.0, 1.0]).unwrap();
        let text = describe_assignments(&instance);
        assert!(text.contains("Adams --> [0, 1, 2, 0]"));
        assert!(text.contains("D'Hondt --> [0, 1, 0, 2]"));
        assert!(text.contains("Greedy --> [0, 1, 0, 2]"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn repeated_runs_agree() {
        let instance = ElectionInstance::new(&[7, 5, 3, 1], &[4.0, 3.0, 3.0, 2.0, 1.0]).unwrap();
        for method in AssignmentMethod::ALL.iter() {
            assert_eq!(method.assign(&instance), method.assign(&instance));
        }
    }
}
