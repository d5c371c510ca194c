pub mod approximation;
pub mod spacing;

pub use approximation::{Approximation, ApproximationSelector};
pub use spacing::Spacing;
