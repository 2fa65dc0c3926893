//! Weighted seat apportionment: exact quotas, assignment methods and the
//! proportionality axioms an assignment satisfies.

pub mod axioms;
pub mod commands;
pub mod experiments;
pub mod formats;
pub mod generator;
pub mod methods;
pub mod model;
pub mod quota;
pub mod reports;
pub mod util;
