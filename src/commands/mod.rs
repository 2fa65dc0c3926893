mod evaluate;
mod real_world;
mod synthetic;

pub use evaluate::evaluate;
pub use real_world::real_world;
pub use synthetic::{synthetic, SyntheticArgs};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
