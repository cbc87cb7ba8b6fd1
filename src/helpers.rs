use crate::LTResult;
use polars::prelude::*;

// ================================================
// PUBLIC FUNCTIONS
// ================================================

/// Round to 3 decimal places, half away from zero.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Read a column as `Vec<f64>`, casting numeric types. Nulls are rejected.
pub fn column_to_f64_vec(df: &DataFrame, name: &str) -> LTResult<Vec<f64>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| format!("Column '{name}' contains null values"))?;
    Ok(values)
}

/// Read a column as `Vec<u32>`, casting numeric types. Nulls are rejected.
pub fn column_to_u32_vec(df: &DataFrame, name: &str) -> LTResult<Vec<u32>> {
    let column = df.column(name)?.cast(&DataType::UInt32)?;
    let values = column
        .u32()?
        .into_iter()
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| format!("Column '{name}' contains null values"))?;
    Ok(values)
}

/// Start age of every class: 0, a₀, a₀ + a₁, ...
///
/// Ages saturate at `u32::MAX`.
pub fn class_start_ages(widths: &[u32]) -> Vec<u32> {
    widths
        .iter()
        .scan(0_u32, |start, &a| {
            let x = *start;
            *start = start.saturating_add(a);
            Some(x)
        })
        .collect()
}

/// Whether the DataFrame carries every listed column.
pub fn has_columns(df: &DataFrame, names: &[&str]) -> bool {
    let present = df.get_column_names();
    names
        .iter()
        .all(|name| present.iter().any(|col| col.as_str() == *name))
}
