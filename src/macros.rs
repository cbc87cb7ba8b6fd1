/// Macro to create a DeathData from class widths and death counts.
/// Usage:
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = ltdf! {
///     "a" => [1_u32, 4, 5, 10],
///     "Dx" => [3.0_f64, 2.0, 1.0, 4.0],
/// }?;
/// # LTResult::Ok(())
/// ```
#[macro_export]
macro_rules! ltdf {
    ($($name:expr => $val:expr),+ $(,)?) => {{
        use $crate::dx_data::DeathData;
        use polars::prelude::df;
        let df_result = df! { $($name => $val),+ };
        match df_result {
            Ok(df) => DeathData::from_df(df),
            Err(e) => Err(e.into()),
        }
    }};
}
