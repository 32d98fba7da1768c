pub mod cs;
pub mod error;

pub use cs::dynamic;
pub use cs::dynamic::optimal_bst::{report, ObstConfig, ObstSolution};
pub use error::{Error, InvalidInput, Result};
