//! axis-rs: axis scaling and tick/grid-division engine.
//!
//! This crate computes the mapping between a numeric value range and a
//! physical pixel length, chooses "nice" evenly spaced tick divisions
//! (linear or logarithmic), and produces grid points and subdivision marks
//! for a rendering layer to draw.

pub mod core;
pub mod error;
pub mod telemetry;

pub use core::{Axis, AxisOptions, GridPoint, LinearAxis, LogAxisOptions, LogarithmicAxis};
pub use error::{AxisError, AxisResult};
