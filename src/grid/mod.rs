pub mod last_segment;
pub mod record;
pub mod shape;

pub use last_segment::{LastSegment, read_last_segment};
pub use record::GridRecord;
pub use shape::GridShape;
