//! The capability contract both axis variants honor.

use crate::core::types::GridPoint;
use crate::error::AxisResult;

/// A mapping between a numeric value range and a pixel length, plus the
/// logic to choose tick positions within it.
///
/// Implementations memoize their scale on first use: every query after the
/// first returns identical results without re-running the division search.
pub trait Axis {
    /// Pixel position of `value`, already direction-signed.
    ///
    /// `None` marks an off-axis value (only the logarithmic variant
    /// produces these, for zero or values below the axis floor).
    fn position(&mut self, value: f64) -> AxisResult<Option<f64>>;

    /// Data value at pixel `position`. Inverse of [`Axis::position`].
    fn value(&mut self, position: f64) -> AxisResult<f64>;

    /// Pixels per data unit (per log unit for the logarithmic variant).
    fn unit(&mut self) -> AxisResult<f64>;

    /// Pixel offset of value zero - or of the end nearest zero, for
    /// negative-only logarithmic axes where true zero is unrepresentable.
    fn zero(&mut self) -> AxisResult<f64>;

    /// Tick positions with values and labels, ordered by direction.
    ///
    /// A `None` start is the sentinel "just compute the scale": the memo is
    /// populated and no points are built.
    fn grid_points(&mut self, start: Option<f64>) -> AxisResult<Vec<GridPoint>>;

    /// Unlabeled finer marks between grid points.
    ///
    /// Fails with [`crate::AxisError::UnsetScale`] when called before the
    /// grid spacing has been computed.
    fn grid_subdivisions(
        &mut self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<u32>,
    ) -> AxisResult<Vec<GridPoint>>;

    /// Flips the direction positions increase in.
    fn reverse(&mut self);

    /// Widens the range by one `min_unit` for bar-chart semantics.
    /// Idempotent.
    fn bar(&mut self);

    /// Rescales the physical extent. Discards any memoized scale.
    fn set_length(&mut self, length: f64) -> AxisResult<()>;

    /// Whether the chosen division could not tile the full length, so the
    /// grid carries one extra boundary point.
    fn is_uneven(&self) -> bool;
}
