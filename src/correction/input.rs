use super::{CorrectionResult, lt_correction};
use crate::LTResult;
use crate::errors::CorrectionError;
use crate::life_table::{LifeTable, LifeTableConfig};
use bon::builder;
use polars::prelude::DataFrame;

/// What a caller hands to the correction, resolved once at the boundary.
#[derive(Debug, Clone)]
pub enum LifeTableInput {
    Single(LifeTable),
    /// Named life tables, e.g. one per site or sex.
    Collection(Vec<(String, LifeTable)>),
    /// Anything that is not a life table; carries a description of what was found.
    Invalid(String),
}

impl From<LifeTable> for LifeTableInput {
    fn from(lt: LifeTable) -> Self {
        LifeTableInput::Single(lt)
    }
}

impl From<Vec<(String, LifeTable)>> for LifeTableInput {
    fn from(tables: Vec<(String, LifeTable)>) -> Self {
        LifeTableInput::Collection(tables)
    }
}

impl From<DataFrame> for LifeTableInput {
    fn from(df: DataFrame) -> Self {
        match LifeTable::from_df(df) {
            Ok(lt) => LifeTableInput::Single(lt),
            Err(err) => match err.downcast_ref::<CorrectionError>() {
                Some(CorrectionError::TypeMismatch { found }) => {
                    LifeTableInput::Invalid(found.clone())
                }
                _ => {
                    LifeTableInput::Invalid(format!("DataFrame that is not a life table ({err})"))
                }
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum CorrectionOutput {
    Single(CorrectionResult),
    /// Results in the order of the input collection.
    Collection(Vec<(String, CorrectionResult)>),
}

/// Correct a single life table or every table of a collection.
///
/// Tables of a collection are corrected independently; the first failure aborts the batch.
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = ltdf! {
///     "a" => [5_u32, 5, 5, 5, 20, 20, 20],
///     "Dx" => [8.0_f64, 9.0, 6.0, 5.0, 30.0, 27.0, 15.0],
/// }?;
/// let lt = life_table().data(&data).call()?;
/// let tables = vec![("north".to_string(), lt.clone()), ("south".to_string(), lt)];
///
/// let output = lt_correction_input().input(tables.into()).call()?;
/// assert!(matches!(output, CorrectionOutput::Collection(ref results) if results.len() == 2));
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn lt_correction_input(
    input: LifeTableInput,
    config: Option<&LifeTableConfig>,
) -> LTResult<CorrectionOutput> {
    match input {
        LifeTableInput::Single(lt) => {
            let result = lt_correction().lt(&lt).maybe_config(config).call()?;
            Ok(CorrectionOutput::Single(result))
        }
        LifeTableInput::Collection(tables) => {
            let results = tables
                .into_iter()
                .map(|(name, lt)| {
                    let result = lt_correction().lt(&lt).maybe_config(config).call()?;
                    Ok((name, result))
                })
                .collect::<LTResult<Vec<_>>>()?;
            Ok(CorrectionOutput::Collection(results))
        }
        LifeTableInput::Invalid(found) => Err(Box::new(CorrectionError::TypeMismatch { found })),
    }
}
