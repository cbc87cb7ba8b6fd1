//! # Life Table Indices
//!
//! Ratios of deaths between age ranges, after Bocquet-Appel & Masset (1977), used as the input
//! of the correction regressions.
//!
//! Death sums are taken over the source classes of the life table. A class overlapping an age
//! range only in part contributes the overlapping share of its deaths.

use crate::LTResult;
use crate::life_table::LifeTable;
use bon::builder;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeTableIndices {
    /// D(5-9) / D(10-14)
    pub child_i: f64,

    /// D(5-14) / D(20+)
    pub juvenile_i: f64,

    /// D(60+) / D(20+)
    pub senility_i: f64,

    /// D(0-14) / D
    pub d0_14_d: f64,

    /// D(15-49) / D(15+)
    pub d15_49_d15plus: f64,

    /// Life expectancy at birth of the table.
    pub e0: f64,
}

/// Extract the index ratios of a life table.
///
/// A ratio whose denominator is zero is `NaN`.
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = ltdf! {
///     "a" => [5_u32, 5, 5, 5, 40, 20],
///     "Dx" => [10.0_f64, 6.0, 4.0, 5.0, 50.0, 25.0],
/// }?;
/// let lt = life_table().data(&data).call()?;
/// let indices = lt_indices().lt(&lt).call()?;
/// assert_eq!(indices.juvenile_i, 10.0 / 75.0);
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn lt_indices(lt: &LifeTable) -> LTResult<LifeTableIndices> {
    let widths = lt.source.widths()?;
    let deaths = lt.source.deaths()?;
    let starts = lt.source.ages()?;

    let sum = |lower: f64, upper: f64| deaths_between(&starts, &widths, &deaths, lower, upper);
    let inf = f64::INFINITY;

    let indices = LifeTableIndices {
        child_i: sum(5.0, 10.0) / sum(10.0, 15.0),
        juvenile_i: sum(5.0, 15.0) / sum(20.0, inf),
        senility_i: sum(60.0, inf) / sum(20.0, inf),
        d0_14_d: sum(0.0, 15.0) / sum(0.0, inf),
        d15_49_d15plus: sum(15.0, 50.0) / sum(15.0, inf),
        e0: lt.e0()?,
    };

    debug!(
        "life table indices: juvenile_i = {}, senility_i = {}",
        indices.juvenile_i, indices.senility_i
    );

    Ok(indices)
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

/// Deaths between `lower` (inclusive) and `upper` (exclusive) ages, assuming deaths are
/// spread evenly within a class.
fn deaths_between(starts: &[u32], widths: &[u32], deaths: &[f64], lower: f64, upper: f64) -> f64 {
    starts
        .iter()
        .zip(widths)
        .zip(deaths)
        .map(|((&x, &a), &d)| {
            let from = f64::from(x);
            let to = from + f64::from(a);
            let overlap = (to.min(upper) - from.max(lower)).max(0.0);
            d * overlap / f64::from(a)
        })
        .sum()
}
