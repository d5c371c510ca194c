pub mod console;
pub mod curve;
pub mod islands;
pub mod map;

pub use console::write_summary;
pub use curve::write_curve_csv;
pub use islands::count_islands;
pub use map::{render_map, write_map};
