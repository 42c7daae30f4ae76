// src/geometry/mod.rs
pub mod crossing;
pub mod intersection;
pub mod validation;

pub use crossing::{Crossing, CrossingDetector};
pub use intersection::{SegmentContact, segment_contact, touches};
pub use validation::{GeometryValidator, InvalidityReason, ValidityIssue};
