//! Monotone cubic interpolation of cumulative adult deaths.
//!
//! Adult classes recorded in wide steps (10 or 20 years) are re-split into 5-year classes. The
//! cumulative number of deaths is interpolated with a Fritsch–Carlson monotone cubic Hermite
//! spline, so the interpolated counts stay non-negative and the total is preserved.

use crate::LTResult;
use crate::helpers::class_start_ages;

/// Age from which classes count as adult and are interpolated.
pub const ADULT_AGE: u32 = 20;

/// Width of the interpolated classes.
pub const SPLINE_CLASS_WIDTH: u32 = 5;

/// Re-split adult classes of width `step` into 5-year classes.
///
/// Returns new `(a, Dx)` vectors; classes starting before age 20 are copied unchanged.
pub fn spline_adult_classes(
    widths: &[u32],
    deaths: &[f64],
    step: u32,
) -> LTResult<(Vec<u32>, Vec<f64>)> {
    let starts = class_start_ages(widths);
    let first_adult = match starts.iter().position(|&x| x >= ADULT_AGE) {
        Some(i) => i,
        None => return Ok((widths.to_vec(), deaths.to_vec())),
    };

    if let Some(&bad) = widths[first_adult..].iter().find(|&&a| a != step) {
        return Err(format!(
            "option_spline {step} expects every adult age class (age >= {ADULT_AGE}) to be {step} years wide, found {bad}"
        )
        .into());
    }

    // Knots: adult class boundaries and the cumulative deaths reached at each
    let mut knots_x = vec![starts[first_adult] as f64];
    let mut knots_y = vec![0.0];
    for (&a, &d) in widths[first_adult..].iter().zip(&deaths[first_adult..]) {
        let last_x = knots_x[knots_x.len() - 1];
        let last_y = knots_y[knots_y.len() - 1];
        knots_x.push(last_x + a as f64);
        knots_y.push(last_y + d);
    }

    let spline = MonotoneCubic::new(knots_x, knots_y);

    let mut new_widths = widths[..first_adult].to_vec();
    let mut new_deaths = deaths[..first_adult].to_vec();

    let start = starts[first_adult];
    let end = widths[first_adult..]
        .iter()
        .fold(start, |age, &a| age.saturating_add(a));
    let mut lower = start;
    while lower < end {
        let upper = lower.saturating_add(SPLINE_CLASS_WIDTH).min(end);
        let dx = spline.eval(upper as f64) - spline.eval(lower as f64);
        new_widths.push(upper - lower);
        new_deaths.push(dx.max(0.0));
        lower = upper;
    }

    Ok((new_widths, new_deaths))
}

/// Fritsch–Carlson monotone cubic Hermite interpolant.
#[derive(Debug, Clone)]
struct MonotoneCubic {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl MonotoneCubic {
    /// `x` strictly increasing, `y` non-decreasing, at least two knots.
    fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        let n = x.len();
        let secants: Vec<f64> = (0..n - 1)
            .map(|k| (y[k + 1] - y[k]) / (x[k + 1] - x[k]))
            .collect();

        let mut slopes = vec![0.0; n];
        slopes[0] = secants[0];
        slopes[n - 1] = secants[n - 2];
        for k in 1..n - 1 {
            slopes[k] = if secants[k - 1] * secants[k] <= 0.0 {
                0.0
            } else {
                (secants[k - 1] + secants[k]) / 2.0
            };
        }

        // Limit slopes so each segment stays monotone
        for k in 0..n - 1 {
            if secants[k] == 0.0 {
                slopes[k] = 0.0;
                slopes[k + 1] = 0.0;
                continue;
            }
            let alpha = slopes[k] / secants[k];
            let beta = slopes[k + 1] / secants[k];
            let norm = alpha.hypot(beta);
            if norm > 3.0 {
                let tau = 3.0 / norm;
                slopes[k] = tau * alpha * secants[k];
                slopes[k + 1] = tau * beta * secants[k];
            }
        }

        Self { x, y, slopes }
    }

    fn eval(&self, at: f64) -> f64 {
        let n = self.x.len();
        if at <= self.x[0] {
            return self.y[0];
        }
        if at >= self.x[n - 1] {
            return self.y[n - 1];
        }

        let k = self.x.partition_point(|&knot| knot <= at) - 1;
        let h = self.x[k + 1] - self.x[k];
        let t = (at - self.x[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.y[k]
            + h10 * h * self.slopes[k]
            + h01 * self.y[k + 1]
            + h11 * h * self.slopes[k + 1]
    }
}
