//! # Life Table Correction
//!
//! Skeletal series systematically lack infants and young children. This module estimates what
//! the youngest age classes should contain and rebuilds the life table accordingly:
//!
//! 1. The juvenility and senility indices of the table ([`crate::indices::lt_indices`])
//! 2. Regression estimates of e0, 1q0, 5q0, m and r with fixed ranges ([`estimator`])
//! 3. Corrected death counts for the 0-4 class or the 0 / 1-4 pair ([`redistribute`])
//! 4. A new life table from the corrected counts ([`crate::life_table::life_table`])
//!
//! ## Submodules
//! - [`estimator`]: regression formulas and the reported index rows
//! - [`redistribute`]: death-count redistribution over the youngest class(es)
//! - [`input`]: dispatch over a single life table or a named collection
//!
//! ## Usage Example
//! ```rust
//! # use ltcorrection::prelude::*;
//! let data = ltdf! {
//!     "a" => [5_u32, 5, 5, 5, 20, 20, 20],
//!     "Dx" => [8.0_f64, 9.0, 6.0, 5.0, 30.0, 27.0, 15.0],
//! }?;
//! let lt = life_table().data(&data).call()?;
//!
//! let result = lt_correction().lt(&lt).call()?;
//! let q5_0 = result.index(IndexName::Q5_0);
//! println!("5q0 = {} [{}, {}]", q5_0.value, q5_0.range_start, q5_0.range_end);
//! # LTResult::Ok(())
//! ```

pub mod estimator;
pub mod input;
pub mod redistribute;

use self::estimator::{CorrectionIndex, IndexName, correction_indices};
use self::redistribute::redistribute_deaths;
use crate::LTResult;
use crate::indices::lt_indices;
use crate::life_table::{LifeTable, LifeTableConfig, life_table};
use bon::builder;
use log::debug;
use polars::prelude::*;

/// Reported indices and the corrected life table.
#[derive(Debug, Clone)]
pub struct CorrectionResult {
    /// Rows e0, 1q0, 5q0, m, r in this order.
    pub indices: [CorrectionIndex; 5],
    pub life_table: LifeTable,
}

impl CorrectionResult {
    pub fn index(&self, name: IndexName) -> &CorrectionIndex {
        // One row per IndexName, in declaration order
        &self.indices[name as usize]
    }

    /// Index table with columns `index`, `value`, `range_start`, `range_end`.
    pub fn indices_table(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.indices.iter().map(|i| i.name.label()).collect();
        let values: Vec<f64> = self.indices.iter().map(|i| i.value).collect();
        let starts: Vec<f64> = self.indices.iter().map(|i| i.range_start).collect();
        let ends: Vec<f64> = self.indices.iter().map(|i| i.range_end).collect();

        df! {
            "index" => labels,
            "value" => values,
            "range_start" => starts,
            "range_end" => ends,
        }
    }
}

/// Correct a life table for the under-representation of infants and young children.
///
/// The configuration is forwarded unchanged to the rebuilt life table; without one the
/// defaults apply (`agecor = true`, no `agecorfac`, no spline).
///
/// # Errors
/// - [`crate::errors::CorrectionError::Domain`] when the juvenility or senility index puts a
///   regression outside its domain
/// - [`crate::errors::CorrectionError::UnsupportedLayout`] when the table neither starts with a
///   5-year class nor with a 1-year class followed by a 4-year class
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = ltdf! {
///     "a" => [1_u32, 4, 5, 5, 5, 20, 20, 20],
///     "Dx" => [3.0_f64, 4.0, 9.0, 6.0, 5.0, 30.0, 27.0, 15.0],
/// }?;
/// let lt = life_table().data(&data).call()?;
/// let config = LifeTableConfig::builder().agecor(false).build()?;
///
/// let result = lt_correction().lt(&lt).config(&config).call()?;
/// let corrected = result.life_table.column("Dx")?;
/// assert_eq!(&corrected[2..], &[9.0, 6.0, 5.0, 30.0, 27.0, 15.0]);
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn lt_correction(
    lt: &LifeTable,
    config: Option<&LifeTableConfig>,
) -> LTResult<CorrectionResult> {
    let default_config = LifeTableConfig::default();
    let config = config.unwrap_or(&default_config);

    let indices = lt_indices().lt(lt).call()?;
    let estimates = correction_indices()
        .juvenile_i(indices.juvenile_i)
        .senility_i(indices.senility_i)
        .call()?;

    let corrected_data = redistribute_deaths()
        .data(&lt.source)
        .q1_0(estimates.q1_0)
        .q5_0(estimates.q5_0)
        .call()?;

    let corrected_lt = life_table().data(&corrected_data).config(config).call()?;
    debug!(
        "corrected life table: e0 {:.3} -> {:.3}",
        indices.e0,
        corrected_lt.e0()?
    );

    Ok(CorrectionResult {
        indices: estimates.to_indices(),
        life_table: corrected_lt,
    })
}
