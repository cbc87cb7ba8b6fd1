//! # ltcorrection Prelude
//!
//! Conveniently re-exports the most common types and functions for life-table correction.
//! Import this module to access all primary features with a single `use` statement.
//!
//! ## Example
//!
//! ```rust
//! # use ltcorrection::prelude::*;
//! use polars::prelude::*;
//! let df = df! {
//!     "a" => [5_u32, 5, 5, 5, 20, 20, 20],
//!     "Dx" => [8.0, 9.0, 6.0, 5.0, 30.0, 27.0, 15.0]
//! }?;
//! let data = DeathData::from_df(df)?;
//! let config = LifeTableConfig::builder()
//!     .agecor(true)
//!     .build()?;
//! let lt = life_table().data(&data).config(&config).call()?;
//! let result = lt_correction().lt(&lt).config(&config).call()?;
//! println!("{}", result.indices_table()?);
//! # LTResult::Ok(())
//! ```

// Package Result type
pub use crate::LTResult;

// Macros
pub use crate::ltdf;

// Errors
pub use crate::errors::CorrectionError;

// Death-count data
pub use crate::dx_data::DeathData;

// Life tables and their configuration
pub use crate::life_table::{LifeTable, LifeTableConfig, life_table};

// Indices
pub use crate::indices::{LifeTableIndices, lt_indices};

// Correction
pub use crate::correction::estimator::{
    CorrectionEstimates, CorrectionIndex, IndexName, correction_indices,
};
pub use crate::correction::input::{CorrectionOutput, LifeTableInput, lt_correction_input};
pub use crate::correction::redistribute::{CorrectionPlan, redistribute_deaths};
pub use crate::correction::{CorrectionResult, lt_correction};

// Most commonly used Polars types for working with life tables
pub use polars::prelude::{DataFrame, PolarsError, PolarsResult, Series};
