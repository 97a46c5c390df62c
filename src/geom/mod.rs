//! Geometric primitives shared by the morphology pipeline.

mod core;

pub use self::core::{Point3, Vec3};
