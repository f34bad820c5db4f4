//! Core data structures and traits for pcdebug
//!
//! This crate provides the fundamental types shared by the viewer crates:
//! points, colored point clouds, oriented bounding boxes and the common error type.

pub mod point;
pub mod point_cloud;
pub mod bounding_box;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use bounding_box::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3};
