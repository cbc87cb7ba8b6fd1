//! # ltcorrection
//!
//! Demographic correction of skeletal life tables for the under-representation of infants and
//! young children in archaeological assemblages.
//!
//! ## Features
//! - **Life Tables**: Build a full abridged life table (`Ax`, `dx`, `lx`, `qx`, `Lx`, `Tx`, `ex`, `rel_popx`) from an age/death-count table
//! - **Flexible Data**: Load death counts from DataFrames, plain vectors or spreadsheets (ODS/XLSX)
//! - **Indices**: Juvenility, senility and child indices after Bocquet-Appel & Masset
//! - **Correction**: Regression estimates of `e0`, `1q0`, `5q0`, `m` and `r` with their published ranges
//! - **Redistribution**: Corrected death counts for the youngest age class(es) and a recomputed life table
//! - **Builder Pattern**: All functions use builder pattern with automatic parameter validation
//!
//! ## Quick Start
//!
//! ```rust
//! use ltcorrection::prelude::*;
//!
//! let data = ltdf! {
//!     "a" => [1_u32, 4, 5, 5, 5, 5, 10, 10, 10, 10, 10],
//!     "Dx" => [4.0_f64, 6.0, 5.0, 6.0, 8.0, 9.0, 14.0, 16.0, 15.0, 12.0, 5.0],
//! }?;
//!
//! let config = LifeTableConfig::default();
//! let lt = life_table().data(&data).config(&config).call()?;
//!
//! let result = lt_correction().lt(&lt).call()?;
//! println!("e0 = {}", result.index(IndexName::E0).value);
//! println!("{}", result.indices_table()?);
//! # LTResult::Ok(())
//! ```
//!
//! ## Notes
//! - Life-table quantities are expressed per 100 individuals (radix 100)
//! - The uncertainty ranges are fixed published offsets, not confidence intervals
//! - All calculations are pure; the input life table is never mutated

pub type LTResult<T> = Result<T, Box<dyn std::error::Error>>;
pub mod correction;
pub mod dx_data;
pub mod errors;
pub mod helpers;
pub mod indices;
pub mod life_table;
mod macros;
pub mod params;
pub mod prelude;
