pub mod axis;
pub mod division;
pub mod linear;
pub mod log;
pub mod niceness;
pub mod types;

pub use axis::Axis;
pub use linear::LinearAxis;
pub use log::LogarithmicAxis;
pub use types::{AxisOptions, GridItem, GridPoint, LabelFormatter, LogAxisOptions, NumericFormatter};
