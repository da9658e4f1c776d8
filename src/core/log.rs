use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::core::axis::Axis;
use crate::core::division::{is_integral, is_multiple_of};
use crate::core::types::{
    GRID_POINT_CAP, GridPoint, LabelFormatter, LogAxisOptions, NumericFormatter, ensure_finite,
};
use crate::error::{AxisError, AxisResult};

const TOLERANCE: f64 = 1e-9;

/// Memoized log-space bounds for a logarithmic axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LogScale {
    /// Log-space lower bound, snapped to a whole decade.
    lg_min: f64,
    /// Log-space upper bound, snapped to a whole decade.
    lg_max: f64,
    /// Pixels per log unit.
    lg_mul: f64,
    /// Chosen intra-decade mark step, when one fits. Marks sit at
    /// multiples of this divisor of the base.
    split: Option<u32>,
}

/// An axis whose divisions are spaced by powers of a configurable base.
///
/// Value 0 is unrepresentable and mixed-sign ranges are rejected.
/// Negative-only ranges work on absolute values and mirror positions
/// through the far end of the axis.
pub struct LogarithmicAxis {
    length: f64,
    min_value: f64,
    max_value: f64,
    options: LogAxisOptions,
    negative: bool,
    direction: f64,
    bar_applied: bool,
    formatter: Box<dyn LabelFormatter>,
    scale: Option<LogScale>,
}

impl fmt::Debug for LogarithmicAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogarithmicAxis")
            .field("length", &self.length)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("options", &self.options)
            .field("negative", &self.negative)
            .field("direction", &self.direction)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl LogarithmicAxis {
    /// Creates a base-10 logarithmic axis with default tuning.
    pub fn new(length: f64, min_value: f64, max_value: f64) -> AxisResult<Self> {
        Self::with_options(length, min_value, max_value, LogAxisOptions::default())
    }

    /// Creates a logarithmic axis with explicit tuning and base.
    pub fn with_options(
        length: f64,
        min_value: f64,
        max_value: f64,
        options: LogAxisOptions,
    ) -> AxisResult<Self> {
        let options = options.validate()?;
        ensure_finite(min_value, "axis min_value")?;
        ensure_finite(max_value, "axis max_value")?;
        if !length.is_finite() || length <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis length must be finite and > 0".to_owned(),
            ));
        }
        if max_value < min_value {
            return Err(AxisError::DegenerateRange {
                min: min_value,
                max: max_value,
            });
        }
        if min_value == 0.0 || max_value == 0.0 || (min_value < 0.0) != (max_value < 0.0) {
            return Err(AxisError::InvalidLogRange {
                min: min_value,
                max: max_value,
            });
        }

        Ok(Self {
            length,
            min_value,
            max_value,
            options,
            negative: max_value < 0.0,
            direction: 1.0,
            bar_applied: false,
            formatter: Box::new(NumericFormatter::default()),
            scale: None,
        })
    }

    /// Replaces the label formatter used for grid point text.
    pub fn set_formatter(&mut self, formatter: Box<dyn LabelFormatter>) {
        self.formatter = formatter;
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.options.base
    }

    fn log_of(&self, value: f64) -> f64 {
        value.ln() / self.options.base.ln()
    }

    /// Absolute-value bounds: the magnitude closest to zero first.
    fn abs_bounds(&self) -> (f64, f64) {
        let a = self.min_value.abs();
        let b = self.max_value.abs();
        (a.min(b), a.max(b))
    }

    fn scale(&mut self) -> AxisResult<LogScale> {
        if let Some(scale) = self.scale {
            return Ok(scale);
        }
        let scale = self.compute_scale()?;
        self.scale = Some(scale);
        Ok(scale)
    }

    fn compute_scale(&self) -> AxisResult<LogScale> {
        // bar() can push max_value onto or across zero after construction;
        // the range invariants must hold whenever the scale is computed.
        if self.min_value == 0.0
            || self.max_value == 0.0
            || (self.min_value < 0.0) != (self.max_value < 0.0)
        {
            return Err(AxisError::InvalidLogRange {
                min: self.min_value,
                max: self.max_value,
            });
        }

        let base = self.options.base;
        let (a_min, a_max) = self.abs_bounds();

        let (lg_min, mut lg_max) = if self.options.axis.fit && is_integral(base) {
            // Snap by exact power comparison; naive log rounding can waste
            // a whole decade on values like 1000 with base 10.
            (power_floor(a_min, base) as f64, power_ceil(a_max, base) as f64)
        } else {
            (
                floor_guarded(self.log_of(a_min)),
                ceil_guarded(self.log_of(a_max)),
            )
        };
        if lg_max <= lg_min {
            // All-equal data at a power of the base; widen by one decade.
            lg_max = lg_min + 1.0;
        }

        let lg_mul = self.length / (lg_max - lg_min);
        let split = self.find_decade_split(lg_mul, self.options.axis.min_space, None);

        debug!(lg_min, lg_max, lg_mul, split = ?split, "logarithmic axis scale computed");

        Ok(LogScale {
            lg_min,
            lg_max,
            lg_mul,
            split,
        })
    }

    /// Searches for an intra-decade mark step.
    ///
    /// Tests divisors of the base from the finest (most divisions) upward
    /// and accepts the first whose worst-case gap, the one just below the
    /// top of the decade, still satisfies `min_space`. Returns `None` when
    /// no subdivision fits or the base is not an integer.
    fn find_decade_split(&self, space: f64, min_space: f64, coarser_than: Option<u32>) -> Option<u32> {
        let base = self.options.base;
        if !is_integral(base) {
            return None;
        }
        let base_int = base.round() as u32;
        for divisor in 1..base_int {
            if base_int % divisor != 0 {
                continue;
            }
            if let Some(limit) = coarser_than {
                if divisor >= limit {
                    return None;
                }
            }
            let worst_gap = space - space * self.log_of(base - divisor as f64);
            if worst_gap >= min_space - TOLERANCE {
                return Some(divisor);
            }
        }
        None
    }

    /// Multiples of `divisor` marking the inside of one decade.
    fn decade_marks(&self, divisor: u32) -> SmallVec<[u32; 8]> {
        let base_int = self.options.base.round() as u32;
        let mut marks: SmallVec<[u32; 8]> = SmallVec::new();
        let mut m = if divisor == 1 { 2 } else { divisor };
        while m < base_int {
            marks.push(m);
            m += divisor;
        }
        marks
    }

    /// Raw pixel position for a value known to be on-axis, pre-direction.
    fn raw_position(&self, scale: LogScale, abs_value: f64) -> f64 {
        let raw = (self.log_of(abs_value) - scale.lg_min) * scale.lg_mul;
        if self.negative { self.length - raw } else { raw }
    }

    fn signed(&self, magnitude: f64) -> f64 {
        if self.negative { -magnitude } else { magnitude }
    }

    fn make_point(&self, start: f64, raw: f64, value: f64, text: String) -> GridPoint {
        GridPoint::new(start + self.direction * raw, value, text)
    }

    fn sort_points(&self, points: &mut [GridPoint]) {
        points.sort_by(|a, b| a.position.total_cmp(&b.position));
        if self.direction < 0.0 {
            points.reverse();
        }
    }

    fn decade_count(scale: LogScale) -> u32 {
        (scale.lg_max - scale.lg_min).round() as u32
    }
}

impl Axis for LogarithmicAxis {
    fn position(&mut self, value: f64) -> AxisResult<Option<f64>> {
        ensure_finite(value, "value")?;
        let scale = self.scale()?;
        if value == 0.0 || (value < 0.0) != self.negative {
            return Ok(None);
        }
        let abs_value = value.abs();
        let floor_value = self.options.base.powf(scale.lg_min);
        if abs_value < floor_value * (1.0 - TOLERANCE) {
            return Ok(None);
        }
        let raw = self.raw_position(scale, abs_value);
        Ok(Some(self.direction * raw))
    }

    fn value(&mut self, position: f64) -> AxisResult<f64> {
        ensure_finite(position, "position")?;
        let scale = self.scale()?;
        let mut raw = self.direction * position;
        if self.negative {
            raw = self.length - raw;
        }
        let magnitude = self.options.base.powf(scale.lg_min + raw / scale.lg_mul);
        Ok(self.signed(magnitude))
    }

    fn unit(&mut self) -> AxisResult<f64> {
        Ok(self.scale()?.lg_mul)
    }

    fn zero(&mut self) -> AxisResult<f64> {
        self.scale()?;
        // True zero is unrepresentable; report the end the values approach
        // it from.
        Ok(if self.negative { self.length } else { 0.0 })
    }

    fn grid_points(&mut self, start: Option<f64>) -> AxisResult<Vec<GridPoint>> {
        let Some(start) = start else {
            self.scale()?;
            return Ok(Vec::new());
        };
        ensure_finite(start, "start")?;

        let projected = (self.length / self.options.axis.min_space).ceil() as u64;
        if projected > GRID_POINT_CAP {
            return Err(AxisError::ExcessiveGridDensity {
                projected,
                cap: GRID_POINT_CAP,
            });
        }

        let scale = self.scale()?;
        let decades = Self::decade_count(scale);
        let marks = scale
            .split
            .map(|divisor| self.decade_marks(divisor))
            .unwrap_or_default();

        let projected = (decades as u64 + 1) + decades as u64 * marks.len() as u64;
        if projected > GRID_POINT_CAP {
            return Err(AxisError::ExcessiveGridDensity {
                projected,
                cap: GRID_POINT_CAP,
            });
        }

        let base = self.options.base;
        let mut points = Vec::with_capacity(projected as usize);
        for d in 0..=decades {
            let exponent = scale.lg_min + d as f64;
            let decade_value = base.powf(exponent);
            let value = self.signed(decade_value);
            let raw = self.raw_position(scale, decade_value);
            let text = self.formatter.format(value, None);
            points.push(self.make_point(start, raw, value, text));

            if d < decades {
                for &m in &marks {
                    let mark_value = decade_value * m as f64;
                    let value = self.signed(mark_value);
                    let raw = self.raw_position(scale, mark_value);
                    let text = self.formatter.format(value, None);
                    points.push(self.make_point(start, raw, value, text));
                }
            }
        }
        self.sort_points(&mut points);
        Ok(points)
    }

    fn grid_subdivisions(
        &mut self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<u32>,
    ) -> AxisResult<Vec<GridPoint>> {
        let Some(scale) = self.scale else {
            return Err(AxisError::UnsetScale);
        };
        ensure_finite(start, "start")?;
        if !min_space.is_finite() || min_space <= 0.0 {
            return Err(AxisError::InvalidData(
                "subdivision min_space must be finite and > 0".to_owned(),
            ));
        }

        let base = self.options.base;
        let divisor = if let Some(count) = fixed {
            if count < 2 || !is_integral(base) {
                return Ok(Vec::new());
            }
            let base_int = base.round() as u32;
            if base_int % count != 0 {
                return Ok(Vec::new());
            }
            Some(base_int / count)
        } else {
            // Only marks finer than the grid's own split qualify.
            self.find_decade_split(scale.lg_mul, min_space, scale.split)
        };
        let Some(divisor) = divisor else {
            return Ok(Vec::new());
        };

        let decades = Self::decade_count(scale);
        let marks = self.decade_marks(divisor);
        let existing: SmallVec<[u32; 8]> = scale
            .split
            .map(|s| self.decade_marks(s))
            .unwrap_or_default();

        let projected = decades as u64 * marks.len() as u64;
        if projected > GRID_POINT_CAP {
            return Err(AxisError::ExcessiveGridDensity {
                projected,
                cap: GRID_POINT_CAP,
            });
        }

        let mut points = Vec::new();
        for d in 0..decades {
            let decade_value = base.powf(scale.lg_min + d as f64);
            for &m in &marks {
                if existing.contains(&m) {
                    continue;
                }
                let mark_value = decade_value * m as f64;
                if min_unit > 0.0 && !is_multiple_of(mark_value, min_unit) {
                    continue;
                }
                let value = self.signed(mark_value);
                let raw = self.raw_position(scale, mark_value);
                points.push(self.make_point(start, raw, value, String::new()));
            }
        }
        self.sort_points(&mut points);
        Ok(points)
    }

    fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    fn bar(&mut self) {
        if !self.bar_applied {
            self.max_value += self.options.axis.min_unit;
            self.bar_applied = true;
            self.scale = None;
        }
    }

    fn set_length(&mut self, length: f64) -> AxisResult<()> {
        if !length.is_finite() || length <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis length must be finite and > 0".to_owned(),
            ));
        }
        self.length = length;
        self.scale = None;
        Ok(())
    }

    fn is_uneven(&self) -> bool {
        false
    }
}

/// Largest `k` with `base^k <= value`, by exact power comparison.
fn power_floor(value: f64, base: f64) -> i32 {
    let mut k = (value.ln() / base.ln()).floor() as i32;
    while base.powi(k + 1) <= value * (1.0 + TOLERANCE) {
        k += 1;
    }
    while base.powi(k) > value * (1.0 + TOLERANCE) {
        k -= 1;
    }
    k
}

/// Smallest `k` with `base^k >= value`, by exact power comparison.
fn power_ceil(value: f64, base: f64) -> i32 {
    let mut k = (value.ln() / base.ln()).ceil() as i32;
    while base.powi(k - 1) >= value * (1.0 - TOLERANCE) {
        k -= 1;
    }
    while base.powi(k) < value * (1.0 - TOLERANCE) {
        k += 1;
    }
    k
}

/// `floor` that forgives log noise just below whole numbers.
fn floor_guarded(value: f64) -> f64 {
    if is_integral(value) { value.round() } else { value.floor() }
}

/// `ceil` that forgives log noise just above whole numbers.
fn ceil_guarded(value: f64) -> f64 {
    if is_integral(value) { value.round() } else { value.ceil() }
}
