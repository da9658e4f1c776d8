use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("degenerate value range: min={min}, max={max} and no min_unit to widen by")]
    DegenerateRange { min: f64, max: f64 },

    #[error("invalid logarithmic range: min={min}, max={max} (zero or mixed signs)")]
    InvalidLogRange { min: f64, max: f64 },

    #[error("grid density over safety cap: {projected} projected points, cap {cap}")]
    ExcessiveGridDensity { projected: u64, cap: u64 },

    #[error("grid subdivisions requested before the axis scale was computed")]
    UnsetScale,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
