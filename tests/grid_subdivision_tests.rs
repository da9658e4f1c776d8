use approx::assert_relative_eq;
use axis_rs::core::AxisOptions;
use axis_rs::{Axis, AxisError, LinearAxis, LogarithmicAxis};

fn linear_axis() -> LinearAxis {
    let options = AxisOptions {
        min_space: 40.0,
        ..AxisOptions::default()
    };
    LinearAxis::with_options(500.0, 0.0, 100.0, options).expect("axis")
}

#[test]
fn subdivisions_before_scale_computation_fail() {
    let mut axis = linear_axis();
    let result = axis.grid_subdivisions(20.0, 0.0, 0.0, None);
    assert!(matches!(result, Err(AxisError::UnsetScale)));
}

#[test]
fn subdivisions_halve_nice_intervals() {
    let mut axis = linear_axis();
    axis.grid_points(None).expect("scale");
    let subdivisions = axis.grid_subdivisions(20.0, 0.0, 0.0, None).expect("subdivisions");

    // Grid intervals of 20 data units / 100px split into halves of 10.
    assert_eq!(subdivisions.len(), 5);
    for (index, point) in subdivisions.iter().enumerate() {
        assert_relative_eq!(point.position, 50.0 + index as f64 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(point.value, 10.0 + index as f64 * 20.0, epsilon = 1e-9);
        assert!(point.text.is_empty());
    }
}

#[test]
fn subdivision_marks_never_land_on_grid_lines() {
    let mut axis = linear_axis();
    let grid = axis.grid_points(Some(0.0)).expect("points");
    let subdivisions = axis.grid_subdivisions(10.0, 0.0, 0.0, None).expect("subdivisions");

    for sub in &subdivisions {
        for main in &grid {
            assert!((sub.position - main.position).abs() > 1e-6);
        }
    }
}

#[test]
fn fixed_count_overrides_the_search() {
    let mut axis = linear_axis();
    axis.grid_points(None).expect("scale");
    let subdivisions = axis
        .grid_subdivisions(20.0, 0.0, 0.0, Some(4))
        .expect("subdivisions");

    // Four steps per 100px interval leave three interior marks each.
    assert_eq!(subdivisions.len(), 15);
    assert_relative_eq!(subdivisions[0].position, 25.0, epsilon = 1e-9);
}

#[test]
fn min_unit_blocks_fractional_subdivision_steps() {
    let mut axis = linear_axis();
    axis.grid_points(None).expect("scale");
    // Steps of 10 are allowed, anything finer would break the unit grid.
    let subdivisions = axis.grid_subdivisions(5.0, 10.0, 0.0, None).expect("subdivisions");
    for point in &subdivisions {
        let ratio = point.value / 10.0;
        assert_relative_eq!(ratio, ratio.round(), epsilon = 1e-9);
    }
}

#[test]
fn too_tight_spacing_yields_no_subdivisions() {
    let mut axis = linear_axis();
    axis.grid_points(None).expect("scale");
    let subdivisions = axis.grid_subdivisions(80.0, 0.0, 0.0, None).expect("subdivisions");
    assert!(subdivisions.is_empty());
}

#[test]
fn log_subdivisions_fill_in_finer_marks() {
    let options = axis_rs::core::LogAxisOptions {
        axis: AxisOptions {
            min_space: 40.0,
            ..AxisOptions::default()
        },
        base: 10.0,
    };
    let mut axis = LogarithmicAxis::with_options(600.0, 1.0, 100.0, options).expect("axis");
    let grid = axis.grid_points(Some(0.0)).expect("points");
    let subdivisions = axis.grid_subdivisions(5.0, 0.0, 0.0, None).expect("subdivisions");

    assert!(!subdivisions.is_empty());
    for sub in &subdivisions {
        assert!(sub.text.is_empty());
        for main in &grid {
            assert!((sub.position - main.position).abs() > 1e-6);
        }
    }
}

#[test]
fn log_subdivisions_before_scale_computation_fail() {
    let mut axis = LogarithmicAxis::new(300.0, 1.0, 1000.0).expect("axis");
    let result = axis.grid_subdivisions(10.0, 0.0, 0.0, None);
    assert!(matches!(result, Err(AxisError::UnsetScale)));
}
