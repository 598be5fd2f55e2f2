//! Split / Transform / Reassemble Pipeline
//!
//! Data flows one way:
//! sound -> boundaries -> partition -> transform (each segment) -> concatenate

mod boundary;
mod driver;
mod partition;
mod reassemble;

pub use boundary::{load_boundaries, parse_boundaries, validate_boundaries, Boundary};
pub use driver::{reverse_whole, split_and_transform, Pipeline};
pub use partition::{cut_points, partition, segment_ranges, time_to_index};
pub use reassemble::concatenate;
