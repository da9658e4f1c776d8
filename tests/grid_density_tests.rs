use axis_rs::core::AxisOptions;
use axis_rs::{Axis, AxisError, LinearAxis};

#[test]
fn oversized_point_requests_fail_fast() {
    let options = AxisOptions {
        min_space: 0.0001,
        ..AxisOptions::default()
    };
    let mut axis = LinearAxis::with_options(1_000_000.0, 0.0, 1.0, options).expect("axis");
    let result = axis.grid_points(Some(0.0));
    assert!(matches!(
        result,
        Err(AxisError::ExcessiveGridDensity { .. })
    ));
}

#[test]
fn density_errors_report_the_projection() {
    let options = AxisOptions {
        min_space: 0.0001,
        ..AxisOptions::default()
    };
    let mut axis = LinearAxis::with_options(1_000_000.0, 0.0, 1.0, options).expect("axis");
    match axis.grid_points(Some(0.0)) {
        Err(AxisError::ExcessiveGridDensity { projected, cap }) => {
            assert_eq!(cap, 10_000);
            assert!(projected > cap);
        }
        other => panic!("expected density error, got {other:?}"),
    }
}

#[test]
fn subdivision_requests_share_the_cap() {
    let mut axis = LinearAxis::new(500_000.0, 0.0, 100.0).expect("axis");
    axis.grid_points(None).expect("scale");
    let result = axis.grid_subdivisions(0.001, 0.0, 0.0, Some(100_000));
    assert!(matches!(
        result,
        Err(AxisError::ExcessiveGridDensity { .. })
    ));
}

#[test]
fn reasonable_requests_stay_under_the_cap() {
    let mut axis = LinearAxis::new(2_000.0, 0.0, 1_000.0).expect("axis");
    let points = axis.grid_points(Some(0.0)).expect("points");
    assert!(points.len() < 10_000);
}
