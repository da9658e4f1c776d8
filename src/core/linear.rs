use std::fmt;

use tracing::debug;

use crate::core::axis::Axis;
use crate::core::division::{DivisionRequest, find_division, find_subdivision, is_integral};
use crate::core::types::{
    AxisOptions, GRID_POINT_CAP, GridPoint, LabelFormatter, NumericFormatter, ensure_finite,
};
use crate::error::{AxisError, AxisResult};

const TOLERANCE: f64 = 1e-9;

/// Memoized outcome of the division search for a linear axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearScale {
    /// Pixels per data unit.
    unit_size: f64,
    /// Pixel offset of value zero.
    zero: f64,
    /// Pixel width of one grid interval.
    spacing: f64,
    /// Data width of one grid interval.
    magnitude: f64,
    /// Full grid steps that fit inside the length.
    steps: u32,
    /// Data value at raw pixel 0.
    value_origin: f64,
    /// Data value at raw pixel `length`.
    end_value: f64,
    /// The chosen division does not tile the length; the grid carries one
    /// extra boundary point at the far end.
    uneven: bool,
}

/// An axis mapping `[min_value, max_value]` onto `[0, length]` pixels with
/// evenly spaced divisions in natural units.
pub struct LinearAxis {
    length: f64,
    min_value: f64,
    max_value: f64,
    options: AxisOptions,
    direction: f64,
    bar_applied: bool,
    formatter: Box<dyn LabelFormatter>,
    scale: Option<LinearScale>,
}

impl fmt::Debug for LinearAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearAxis")
            .field("length", &self.length)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("options", &self.options)
            .field("direction", &self.direction)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl LinearAxis {
    /// Creates a linear axis with default tuning.
    pub fn new(length: f64, min_value: f64, max_value: f64) -> AxisResult<Self> {
        Self::with_options(length, min_value, max_value, AxisOptions::default())
    }

    /// Creates a linear axis with explicit tuning.
    pub fn with_options(
        length: f64,
        min_value: f64,
        max_value: f64,
        options: AxisOptions,
    ) -> AxisResult<Self> {
        let options = options.validate()?;
        ensure_finite(min_value, "axis min_value")?;
        ensure_finite(max_value, "axis max_value")?;
        if !length.is_finite() || length <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis length must be finite and > 0".to_owned(),
            ));
        }
        if max_value < min_value || (max_value == min_value && options.min_unit == 0.0) {
            return Err(AxisError::DegenerateRange {
                min: min_value,
                max: max_value,
            });
        }

        Ok(Self {
            length,
            min_value,
            max_value,
            options,
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
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Computes the scale once and memoizes it.
    fn scale(&mut self) -> AxisResult<LinearScale> {
        if let Some(scale) = self.scale {
            return Ok(scale);
        }
        let scale = self.compute_scale()?;
        self.scale = Some(scale);
        Ok(scale)
    }

    fn compute_scale(&self) -> AxisResult<LinearScale> {
        let options = self.options;
        let min = self.min_value;
        let mut max = self.max_value;
        if max == min {
            // Degenerate zero-width range, auto-widened by one min_unit.
            // Construction already rejected the unconstrained case.
            max += options.min_unit;
        }
        let span = max - min;

        let mut magnitude = 10f64.powf(span.log10().floor());
        if options.min_unit > 0.0 {
            magnitude = magnitude.max(options.min_unit);
        }

        let count_for = |mag: f64| -> u32 {
            let count = if min >= 0.0 || options.fit {
                (span / mag).ceil()
            } else {
                (max / mag).ceil() - (min / mag).floor()
            };
            count.max(1.0) as u32
        };

        let mut count = count_for(magnitude);
        if count <= 5 && magnitude > options.min_unit {
            // Degenerately coarse seed; refine by one order of magnitude.
            magnitude /= 10.0;
            if options.min_unit > 0.0 {
                magnitude = magnitude.max(options.min_unit);
            }
            count = count_for(magnitude);
        }

        let mut neg_count = if min < 0.0 {
            (min.abs() / magnitude).ceil()
        } else {
            0.0
        };

        let mut attempts = 0;
        loop {
            let satisfied = self.length / count as f64 >= options.min_space - TOLERANCE;
            if (satisfied && attempts > 0) || attempts >= 10 {
                break;
            }
            let request = DivisionRequest {
                length: self.length,
                min_space: options.min_space,
                count,
                neg_count,
                magnitude,
                min_unit: options.min_unit,
                fit: options.fit,
                tightness: options.tightness,
            };
            match find_division(request) {
                Some(division) => {
                    count = division.count;
                    neg_count = division.neg_count;
                    magnitude = division.magnitude;
                }
                None => break,
            }
            attempts += 1;
        }

        let value_origin = if min < 0.0 { -neg_count * magnitude } else { min };
        // Data units across the full pixel length; the anchor the fallback
        // coarsening keeps frozen.
        let covered = magnitude * count as f64;
        let unit_size = self.length / covered;

        let mut uneven = false;
        if self.length / (count as f64) < options.min_space - TOLERANCE {
            // No clean division exists; degrade by doubling the division
            // width until the spacing floor holds or one division remains.
            while magnitude * unit_size < options.min_space - TOLERANCE
                && covered / magnitude > 1.0 + TOLERANCE
            {
                magnitude *= 2.0;
            }
            uneven = !is_integral(covered / magnitude);
        }

        let spacing = magnitude * unit_size;
        let ratio = covered / magnitude;
        let steps = if is_integral(ratio) {
            ratio.round() as u32
        } else {
            ratio.floor() as u32
        };
        let zero = -value_origin * unit_size;

        debug!(
            count,
            magnitude,
            spacing,
            neg_count,
            uneven,
            "linear axis scale computed"
        );

        Ok(LinearScale {
            unit_size,
            zero,
            spacing,
            magnitude,
            steps,
            value_origin,
            end_value: value_origin + covered,
            uneven,
        })
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
}

impl Axis for LinearAxis {
    fn position(&mut self, value: f64) -> AxisResult<Option<f64>> {
        ensure_finite(value, "value")?;
        let scale = self.scale()?;
        Ok(Some(self.direction * (scale.zero + value * scale.unit_size)))
    }

    fn value(&mut self, position: f64) -> AxisResult<f64> {
        ensure_finite(position, "position")?;
        let scale = self.scale()?;
        Ok((self.direction * position - scale.zero) / scale.unit_size)
    }

    fn unit(&mut self) -> AxisResult<f64> {
        Ok(self.scale()?.unit_size)
    }

    fn zero(&mut self) -> AxisResult<f64> {
        Ok(self.scale()?.zero)
    }

    fn grid_points(&mut self, start: Option<f64>) -> AxisResult<Vec<GridPoint>> {
        let Some(start) = start else {
            self.scale()?;
            return Ok(Vec::new());
        };
        ensure_finite(start, "start")?;

        // Fail fast before any search or allocation: spacing can never drop
        // below the requested floor, so length over floor bounds the count.
        let projected = (self.length / self.options.min_space).ceil() as u64;
        if projected > GRID_POINT_CAP {
            return Err(AxisError::ExcessiveGridDensity {
                projected,
                cap: GRID_POINT_CAP,
            });
        }

        let scale = self.scale()?;
        let mut points = Vec::with_capacity(scale.steps as usize + 2);
        for k in 0..=scale.steps {
            let raw = k as f64 * scale.spacing;
            if raw >= self.length + scale.spacing * 0.5 {
                break;
            }
            let value = scale.value_origin + k as f64 * scale.magnitude;
            let text = self.formatter.format(value, None);
            points.push(self.make_point(start, raw, value, text));
        }
        if scale.uneven {
            let text = self.formatter.format(scale.end_value, None);
            points.push(self.make_point(start, self.length, scale.end_value, text));
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

        let Some(split) = find_subdivision(scale.spacing, scale.magnitude, min_space, min_unit, fixed)
        else {
            return Ok(Vec::new());
        };

        let sub_spacing = scale.spacing / split as f64;
        let projected = (self.length / sub_spacing).ceil() as u64;
        if projected > GRID_POINT_CAP {
            return Err(AxisError::ExcessiveGridDensity {
                projected,
                cap: GRID_POINT_CAP,
            });
        }

        // Subdivide whole grid intervals only; an uneven tail stays bare.
        let limit = scale.steps as f64 * scale.spacing;
        let sub_magnitude = scale.magnitude / split as f64;
        let mut points = Vec::new();
        let mut j: u64 = 1;
        loop {
            let raw = j as f64 * sub_spacing;
            if raw >= limit + sub_spacing * 0.5 || raw > self.length + TOLERANCE {
                break;
            }
            if j % split as u64 != 0 {
                let value = scale.value_origin + j as f64 * sub_magnitude;
                points.push(self.make_point(start, raw, value, String::new()));
            }
            j += 1;
        }
        self.sort_points(&mut points);
        Ok(points)
    }

    fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    fn bar(&mut self) {
        if !self.bar_applied {
            self.max_value += self.options.min_unit;
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
        self.scale.map(|scale| scale.uneven).unwrap_or(false)
    }
}
