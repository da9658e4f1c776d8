use std::rc::Weak;

use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Safety cap on how many grid points one request may produce.
pub(crate) const GRID_POINT_CAP: u64 = 10_000;

/// A data record a grid point can refer back to for label lookups.
///
/// Grid points never own their items; the owning data set decides the
/// lifetime and points are built with [`Weak`] references only.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub key: String,
    pub value: f64,
}

/// One tick mark: a pixel position, the data value it represents and an
/// optional display label.
#[derive(Debug, Clone, Default)]
pub struct GridPoint {
    /// Pixel coordinate along the axis, already including direction and the
    /// caller-supplied start offset.
    pub position: f64,
    /// The numeric data value the point represents.
    pub value: f64,
    /// Display label. Empty for subdivision marks.
    pub text: String,
    /// Back-reference to the contributing data record, if any.
    pub item: Option<Weak<GridItem>>,
}

impl GridPoint {
    #[must_use]
    pub fn new(position: f64, value: f64, text: String) -> Self {
        Self {
            position,
            value,
            text,
            item: None,
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: Weak<GridItem>) -> Self {
        self.item = Some(item);
        self
    }
}

/// Produces display text for grid point values.
///
/// The `key` is the data-source key for category axes; value axes pass
/// `None` and format the number itself.
pub trait LabelFormatter {
    fn format(&self, value: f64, key: Option<&str>) -> String;
}

/// Default numeric formatter with configurable decimal digits and
/// unit prefix/suffix strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFormatter {
    pub decimals: usize,
    pub prefix: String,
    pub suffix: String,
}

impl Default for NumericFormatter {
    fn default() -> Self {
        Self {
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl LabelFormatter for NumericFormatter {
    fn format(&self, value: f64, key: Option<&str>) -> String {
        if let Some(key) = key {
            return key.to_owned();
        }
        // Drop the sign on negative zero so labels read "0", not "-0".
        let value = if value == 0.0 { 0.0 } else { value };
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimals, value, self.suffix
        )
    }
}

/// Tuning controls shared by both axis variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Smallest permitted division size in data units; 0 = unconstrained.
    pub min_unit: f64,
    /// Smallest permitted division size in pixels.
    pub min_space: f64,
    /// Forbid growing the apparent axis length past the data range.
    pub fit: bool,
    /// 0 = loose division search, > 0 = tight search branch.
    pub tightness: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min_unit: 0.0,
            min_space: 20.0,
            fit: false,
            tightness: 0.0,
        }
    }
}

impl AxisOptions {
    pub fn validate(self) -> AxisResult<Self> {
        if !self.min_unit.is_finite() || self.min_unit < 0.0 {
            return Err(AxisError::InvalidData(
                "axis min_unit must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_space.is_finite() || self.min_space <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis min_space must be finite and > 0".to_owned(),
            ));
        }
        if !self.tightness.is_finite() || !(0.0..=1.0).contains(&self.tightness) {
            return Err(AxisError::InvalidData(
                "axis tightness must lie in 0..=1".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Options for the logarithmic axis variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogAxisOptions {
    pub axis: AxisOptions,
    /// Multiplicative step of one decade.
    pub base: f64,
}

impl Default for LogAxisOptions {
    fn default() -> Self {
        Self {
            axis: AxisOptions::default(),
            base: 10.0,
        }
    }
}

impl LogAxisOptions {
    pub fn validate(self) -> AxisResult<Self> {
        let axis = self.axis.validate()?;
        if !self.base.is_finite() || self.base <= 1.0 {
            return Err(AxisError::InvalidData(
                "log axis base must be finite and > 1".to_owned(),
            ));
        }
        Ok(Self { axis, base: self.base })
    }
}

pub(crate) fn ensure_finite(value: f64, what: &str) -> AxisResult<f64> {
    if !value.is_finite() {
        return Err(AxisError::InvalidData(format!("{what} must be finite")));
    }
    Ok(value)
}
