//! Pipeline stages.
//!
//! Each stage is a pure function from borrowed images to a freshly
//! allocated image; no stage keeps state between calls.

pub mod composite;
pub mod contour;
pub mod hole_filling;
pub mod region_growing;
pub mod smoothing;

pub use composite::{label_overlay, multiply_by_mask, rescale_intensity, LABEL_COLORS};
pub use contour::{label_contour, scale_labels};
pub use hole_filling::voting_hole_fill;
pub use region_growing::connected_threshold;
pub use smoothing::curvature_flow;
