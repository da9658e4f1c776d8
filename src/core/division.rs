//! Search for "nice" axis divisions.
//!
//! Given a seed division of the value range, the finder walks candidate
//! division counts and magnitude multipliers, scores each candidate by the
//! niceness of the resulting magnitude and of the positive/negative
//! boundaries, and returns the cheapest one that still honors the pixel
//! spacing floor. The caller keeps its seed when no candidate qualifies.

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::niceness::niceness;

const TOLERANCE: f64 = 1e-9;

/// Seed division plus the constraints the search must honor.
#[derive(Debug, Clone, Copy)]
pub struct DivisionRequest {
    /// Physical axis extent in pixels.
    pub length: f64,
    /// Smallest permitted division size in pixels.
    pub min_space: f64,
    /// Seed division count.
    pub count: u32,
    /// Seed divisions below zero. Fractional after a loose acceptance.
    pub neg_count: f64,
    /// Seed width of one division in data units.
    pub magnitude: f64,
    /// Smallest permitted division size in data units; 0 = unconstrained.
    pub min_unit: f64,
    /// Forbid growing the apparent axis length.
    pub fit: bool,
    /// 0 = loose cost branch, > 0 = tight cost branch.
    pub tightness: f64,
}

/// An accepted division: count, magnitude and divisions below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    pub count: u32,
    pub neg_count: f64,
    pub magnitude: f64,
}

pub(crate) fn is_integral(value: f64) -> bool {
    (value - value.round()).abs() <= TOLERANCE * value.abs().max(1.0)
}

pub(crate) fn is_multiple_of(value: f64, unit: f64) -> bool {
    unit > 0.0 && is_integral(value / unit)
}

/// Searches for a nicer division of the range.
///
/// Returns `None` when no candidate both satisfies the spacing floor and
/// passes the negative-boundary rules; the seed stands in that case.
/// When the seed already satisfies the floor and the tight branch is
/// active, the seed is kept without searching.
#[must_use]
pub fn find_division(request: DivisionRequest) -> Option<Division> {
    let DivisionRequest {
        length,
        min_space,
        count,
        neg_count,
        magnitude,
        min_unit,
        fit,
        tightness,
    } = request;

    if count < 2 || length <= 0.0 || magnitude <= 0.0 {
        return None;
    }

    let tight = tightness > 0.0;
    if tight && length / count as f64 >= min_space - TOLERANCE {
        return None;
    }

    // How far the effective division count may exceed the physical one,
    // i.e. how much the axis may grow past the data range.
    let max_inc = if fit {
        0
    } else if tight {
        count / 5
    } else {
        count / 2
    };

    let (inc_penalty, nice_divisor) = if tight { (1.5, 50.0) } else { (0.5, 100.0) };

    let mut best: Option<(OrderedFloat<f64>, Division)> = None;

    for c in (2..count).rev() {
        if length / (c as f64) < min_space - TOLERANCE {
            continue;
        }

        for inc in 0..=max_inc {
            let m_mult = (count + inc) as f64 / c as f64;
            let new_magnitude = m_mult * magnitude;

            if min_unit > 0.0 && !is_multiple_of(new_magnitude, min_unit) {
                continue;
            }

            let mut cost =
                m_mult + inc_penalty * inc as f64 - niceness(new_magnitude) / nice_divisor;

            let mut new_neg = 0.0;
            if neg_count > 0.0 {
                let mut nc = neg_count / m_mult;
                let mut integral = is_integral(nc);
                if !integral {
                    // A few extra divisions below zero may restore an even
                    // split of the negative portion.
                    for add in 1..=inc {
                        let candidate = (neg_count + add as f64) / m_mult;
                        if is_integral(candidate) {
                            nc = candidate;
                            integral = true;
                            break;
                        }
                    }
                }

                let neg_boundary = nc * new_magnitude;
                let pos_boundary = (c as f64 - nc) * new_magnitude;
                if integral {
                    if niceness(neg_boundary) > 0.0 {
                        cost -= 0.5;
                    } else {
                        cost += 3.0;
                    }
                } else {
                    if tightness != 0.0 {
                        continue;
                    }
                    if niceness(neg_boundary) <= 0.0 && niceness(pos_boundary) <= 0.0 {
                        continue;
                    }
                    if niceness(neg_boundary) <= 0.0 {
                        cost += 3.0;
                    }
                }
                new_neg = nc;
            }

            let candidate = Division {
                count: c,
                neg_count: new_neg,
                magnitude: new_magnitude,
            };
            if best
                .as_ref()
                .map(|(best_cost, _)| OrderedFloat(cost) < *best_cost)
                .unwrap_or(true)
            {
                best = Some((OrderedFloat(cost), candidate));
            }
        }
    }

    if let Some((cost, division)) = &best {
        trace!(
            cost = cost.0,
            count = division.count,
            magnitude = division.magnitude,
            "division search accepted candidate"
        );
    }
    best.map(|(_, division)| division)
}

/// Finds an even subdivision count for one grid interval.
///
/// `spacing` is the pixel width of a grid interval, `magnitude` its width in
/// data units. The count whose per-step magnitude scores best on the
/// niceness table wins; ties go to the finer split. `fixed` bypasses the
/// search entirely.
#[must_use]
pub fn find_subdivision(
    spacing: f64,
    magnitude: f64,
    min_space: f64,
    min_unit: f64,
    fixed: Option<u32>,
) -> Option<u32> {
    if let Some(count) = fixed {
        return (count >= 2).then_some(count);
    }
    if spacing <= 0.0 || magnitude <= 0.0 || min_space <= 0.0 {
        return None;
    }

    let max_count = (spacing / min_space).floor() as u32;
    let mut best: Option<(f64, u32)> = None;
    for count in 2..=max_count {
        let step = magnitude / count as f64;
        if min_unit > 0.0 && !is_multiple_of(step, min_unit) {
            continue;
        }
        let score = niceness(step);
        if score <= 0.0 {
            continue;
        }
        if best.map(|(s, _)| score >= s).unwrap_or(true) {
            best = Some((score, count));
        }
    }
    best.map(|(_, count)| count)
}

#[cfg(test)]
mod tests {
    use super::{DivisionRequest, find_division, find_subdivision, is_integral, is_multiple_of};

    fn request(length: f64, min_space: f64, count: u32, neg_count: f64) -> DivisionRequest {
        DivisionRequest {
            length,
            min_space,
            count,
            neg_count,
            magnitude: 10.0,
            min_unit: 0.0,
            fit: false,
            tightness: 0.0,
        }
    }

    #[test]
    fn integral_checks_absorb_float_noise() {
        assert!(is_integral(3.000000000001));
        assert!(!is_integral(3.5));
        assert!(is_multiple_of(25.0, 5.0));
        assert!(!is_multiple_of(26.0, 5.0));
    }

    #[test]
    fn loose_search_prefers_a_nicer_magnitude_over_a_satisfied_seed() {
        let division = find_division(request(500.0, 40.0, 10, 0.0)).expect("candidate");
        assert_eq!(division.count, 5);
        assert!((division.magnitude - 20.0).abs() < 1e-9);
    }

    #[test]
    fn tight_search_keeps_a_satisfied_seed() {
        let mut req = request(500.0, 40.0, 10, 0.0);
        req.tightness = 1.0;
        assert!(find_division(req).is_none());
    }

    #[test]
    fn min_unit_rejects_fractional_magnitudes() {
        let mut req = request(500.0, 40.0, 10, 0.0);
        req.min_unit = 3.0;
        if let Some(division) = find_division(req) {
            assert!(is_multiple_of(division.magnitude, 3.0));
        }
    }

    #[test]
    fn negative_ranges_keep_an_even_negative_split() {
        // 20 divisions of 10 covering -50..150 on 400px with a 20px floor.
        let division = find_division(request(400.0, 20.0, 20, 5.0)).expect("candidate");
        let ratio = division.neg_count;
        assert!((ratio - ratio.round()).abs() < 1e-9, "neg_count {ratio} not integral");
        assert!(division.neg_count > 0.0);
    }

    #[test]
    fn subdivision_picks_the_nicest_step() {
        // 100px interval of magnitude 20 with a 20px floor: halves of 10 win.
        let split = find_subdivision(100.0, 20.0, 20.0, 0.0, None).expect("split");
        assert_eq!(split, 2);
        let step = 20.0 / split as f64;
        assert!(super::niceness(step) > 0.0);
        assert!(100.0 / split as f64 >= 20.0);
    }

    #[test]
    fn subdivision_honors_fixed_override() {
        assert_eq!(find_subdivision(100.0, 20.0, 20.0, 0.0, Some(8)), Some(8));
        assert_eq!(find_subdivision(100.0, 20.0, 20.0, 0.0, Some(1)), None);
    }

    #[test]
    fn subdivision_gives_up_when_nothing_fits() {
        assert_eq!(find_subdivision(30.0, 20.0, 20.0, 0.0, None), None);
    }
}
