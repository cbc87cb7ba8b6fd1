//! # Death-Count Data (DeathData)
//!
//! The raw input of every life table: an ordered list of age classes, each with a width `a`
//! in years and an observed number of deaths `Dx`.
//!
//! ## Quick Start
//! ```rust
//! # use ltcorrection::prelude::*;
//! let data = DeathData::from_columns()
//!     .a(vec![5, 5, 10, 10, 10, 20])
//!     .dx(vec![12.0, 4.0, 9.0, 21.0, 30.0, 24.0])
//!     .call()?;
//! assert_eq!(data.total_deaths()?, 100.0);
//! # LTResult::Ok(())
//! ```

mod spreadsheet_helpers;

use self::spreadsheet_helpers::*;
use crate::LTResult;
use crate::helpers::{class_start_ages, column_to_f64_vec, column_to_u32_vec};
use bon::bon;
use calamine::{Reader, open_workbook_auto};
use polars::prelude::*;
use spreadsheet_ods::read_ods;

#[derive(Debug, Clone)]
pub struct DeathData {
    pub description: String,
    pub dataframe: DataFrame,
}

#[bon]
impl DeathData {
    /// Create a new DeathData instance from a DataFrame.
    ///
    /// # Schema Requirements
    /// - Columns "a" and "Dx" (any other column is dropped)
    /// - "a": class width in years, whole numbers greater than 0
    /// - "Dx": number of deaths, finite and non-negative, with at least one positive value
    /// - At least one row
    ///
    /// # Examples
    /// ```rust
    /// # use ltcorrection::prelude::*;
    /// use polars::prelude::*;
    ///
    /// let df = df! {
    ///     "a" => [5_u32, 5, 10],
    ///     "Dx" => [10.0_f64, 3.0, 7.0]
    /// }?;
    ///
    /// let data = DeathData::new("Cemetery A".to_string(), df)?;
    /// # LTResult::Ok(())
    /// ```
    pub fn new(description: String, dataframe: DataFrame) -> LTResult<Self> {
        validate_df_schema(&dataframe)?;
        let dataframe = setup_dataframe_to_correct_schema(&dataframe)?;
        Ok(Self {
            description,
            dataframe,
        })
    }

    pub fn from_df(df: DataFrame) -> LTResult<Self> {
        Self::new("Custom Death Data".to_string(), df)
    }

    /// Create DeathData from plain vectors of class widths and death counts.
    #[builder]
    pub fn from_columns(
        a: Vec<u32>,
        dx: Vec<f64>,
        #[builder(default = "Custom Death Data".to_string())] description: String,
    ) -> LTResult<Self> {
        if a.len() != dx.len() {
            return Err(format!(
                "Columns 'a' and 'Dx' must have equal length ({} vs {})",
                a.len(),
                dx.len()
            )
            .into());
        }

        let df = df! {
            "a" => a,
            "Dx" => dx,
        }?;

        Self::new(description, df)
    }

    /// Load death counts from an ODS spreadsheet.
    ///
    /// The first row holds headers; columns named `a` and `Dx` (case-insensitive) are used.
    pub fn from_ods(ods_file_path_str: &str, sheet_name: &str) -> LTResult<Self> {
        let workbook = read_ods(ods_file_path_str).map_err(|e| -> Box<dyn std::error::Error> {
            format!("Failed to open ODS file '{ods_file_path_str}': {e}").into()
        })?;

        let sheet = (0..workbook.num_sheets())
            .map(|i| workbook.sheet(i))
            .find(|sheet| sheet.name() == sheet_name)
            .ok_or_else(|| format!("Sheet '{sheet_name}' not found in ODS file"))?;

        let (max_row, _) = sheet.used_grid_size();
        if max_row < 1 {
            return Err(format!("Sheet '{sheet_name}' is empty").into());
        }

        let headers = parse_ods_headers(sheet, 0)?;
        let data_cols = parse_ods_data(sheet, 1, headers.len())?;
        let df = build_dataframe(&headers, &data_cols)?;

        let description = format!("Created from ODS file {ods_file_path_str}, sheet {sheet_name}.");
        Self::new(description, df)
    }

    /// Load death counts from an XLSX (or XLS) spreadsheet.
    ///
    /// The first row holds headers; columns named `a` and `Dx` (case-insensitive) are used.
    pub fn from_xlsx(xlsx_file_path_str: &str, sheet_name: &str) -> LTResult<Self> {
        let mut workbook = open_workbook_auto(xlsx_file_path_str)
            .map_err(|e| format!("Failed to open XLSX file '{xlsx_file_path_str}': {e}"))?;

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet '{sheet_name}': {e}"))?;

        if range.is_empty() {
            return Err(format!("Sheet '{sheet_name}' is empty").into());
        }

        let headers = parse_excel_headers(&range, 0)?;
        let data_cols = parse_excel_data(&range, 1, headers.len())?;
        let df = build_dataframe(&headers, &data_cols)?;

        let description =
            format!("Created from XLSX file {xlsx_file_path_str}, sheet {sheet_name}.");
        Self::new(description, df)
    }

    /// Width `a` of every age class.
    pub fn widths(&self) -> LTResult<Vec<u32>> {
        column_to_u32_vec(&self.dataframe, "a")
    }

    /// Number of deaths `Dx` in every age class.
    pub fn deaths(&self) -> LTResult<Vec<f64>> {
        column_to_f64_vec(&self.dataframe, "Dx")
    }

    pub fn total_deaths(&self) -> LTResult<f64> {
        Ok(self.deaths()?.iter().sum())
    }

    /// Start age of every class, the first class starting at birth.
    pub fn ages(&self) -> LTResult<Vec<u32>> {
        Ok(class_start_ages(&self.widths()?))
    }

    pub fn len(&self) -> usize {
        self.dataframe.height()
    }

    pub fn is_empty(&self) -> bool {
        self.dataframe.height() == 0
    }

    /// Copy of this data with the death counts replaced. `self` is left untouched.
    pub fn with_deaths(&self, dx: Vec<f64>) -> LTResult<Self> {
        if dx.len() != self.len() {
            return Err(format!(
                "Expected {} death counts, got {}",
                self.len(),
                dx.len()
            )
            .into());
        }

        let df = df! {
            "a" => self.widths()?,
            "Dx" => dx,
        }?;

        Self::new(self.description.clone(), df)
    }
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

fn validate_df_schema(df: &DataFrame) -> LTResult<()> {
    if df.height() == 0 {
        return Err("DataFrame must contain at least one row of data".into());
    }

    let col_names = df.get_column_names();
    for required in ["a", "Dx"] {
        if !col_names.iter().any(|name| name.as_str() == required) {
            return Err(format!(
                "DataFrame must contain columns ['a', 'Dx'], '{required}' is missing"
            )
            .into());
        }
    }

    // a: whole positive numbers
    let a = column_to_f64_vec(df, "a")?;
    if a.iter().any(|&w| !w.is_finite() || w <= 0.0 || w.fract() != 0.0) {
        return Err("Column 'a' must contain whole numbers greater than 0".into());
    }

    // Dx: finite, non-negative, not all zero
    let dx = column_to_f64_vec(df, "Dx")?;
    if dx.iter().any(|&d| !d.is_finite() || d < 0.0) {
        return Err("Column 'Dx' must be finite and non-negative".into());
    }
    if dx.iter().sum::<f64>() <= 0.0 {
        return Err("Column 'Dx' must contain at least one death".into());
    }

    Ok(())
}

fn setup_dataframe_to_correct_schema(df: &DataFrame) -> PolarsResult<DataFrame> {
    // Assumes the DataFrame has already been validated
    let a = df.column("a")?.cast(&DataType::UInt32)?;
    let dx = df.column("Dx")?.cast(&DataType::Float64)?;
    DataFrame::new(vec![a, dx])
}

fn build_dataframe(headers: &[String], data_cols: &[Vec<f64>]) -> LTResult<DataFrame> {
    if data_cols.is_empty() || data_cols[0].is_empty() {
        return Err("No data rows found in sheet".into());
    }

    // Headers are lowercased by the parsers
    let mut columns = Vec::new();
    for (header, data_col) in headers.iter().zip(data_cols.iter()) {
        let name = match header.as_str() {
            "a" => "a",
            "dx" => "Dx",
            _ => continue,
        };
        columns.push(Series::new(name.into(), data_col.clone()).into_column());
    }

    let df = DataFrame::new(columns).map_err(|e| format!("Failed to create DataFrame: {e}"))?;
    Ok(df)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use spreadsheet_ods::{Sheet, WorkBook, write_ods};

    #[test]
    fn test_from_df_keeps_a_and_dx_only() {
        let df = df! {
            "x" => [0_u32, 5, 10],
            "a" => [5_i64, 5, 10],
            "Dx" => [4_i64, 2, 6],
        }
        .unwrap();
        let data = DeathData::from_df(df).expect("valid death data");
        assert_eq!(data.dataframe.get_column_names(), vec!["a", "Dx"]);
        assert_eq!(data.widths().unwrap(), vec![5, 5, 10]);
        assert_eq!(data.deaths().unwrap(), vec![4.0, 2.0, 6.0]);
        assert_eq!(data.ages().unwrap(), vec![0, 5, 10]);
    }

    #[test]
    fn test_schema_rejections() {
        let missing = df! { "a" => [5_u32, 5] }.unwrap();
        assert!(DeathData::from_df(missing).is_err());

        let negative = df! { "a" => [5_u32, 5], "Dx" => [1.0_f64, -1.0] }.unwrap();
        assert!(DeathData::from_df(negative).is_err());

        let zero_width = df! { "a" => [0_u32, 5], "Dx" => [1.0_f64, 1.0] }.unwrap();
        assert!(DeathData::from_df(zero_width).is_err());

        let fractional = df! { "a" => [2.5_f64, 5.0], "Dx" => [1.0_f64, 1.0] }.unwrap();
        assert!(DeathData::from_df(fractional).is_err());

        let no_deaths = df! { "a" => [5_u32, 5], "Dx" => [0.0_f64, 0.0] }.unwrap();
        assert!(DeathData::from_df(no_deaths).is_err());
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let result = DeathData::from_columns()
            .a(vec![5, 5])
            .dx(vec![1.0])
            .call();
        assert!(result.is_err());
    }

    #[test]
    fn test_with_deaths_returns_new_instance() {
        let data = DeathData::from_columns()
            .a(vec![1, 4, 5])
            .dx(vec![2.0, 3.0, 5.0])
            .call()
            .unwrap();
        let revised = data.with_deaths(vec![7.0, 1.0, 5.0]).unwrap();
        assert_eq!(revised.deaths().unwrap(), vec![7.0, 1.0, 5.0]);
        assert_eq!(data.deaths().unwrap(), vec![2.0, 3.0, 5.0]);
        assert!(data.with_deaths(vec![1.0]).is_err());
    }

    #[test]
    fn test_from_ods_round_trip() {
        let mut sheet = Sheet::new("deaths");
        sheet.set_value(0, 0, "A");
        sheet.set_value(0, 1, "Dx");
        sheet.set_value(0, 2, "note");
        for (row, (a, dx)) in [(5.0, 12.0), (5.0, 4.0), (10.0, 9.0)].iter().enumerate() {
            let row = row as u32 + 1;
            sheet.set_value(row, 0, *a);
            sheet.set_value(row, 1, *dx);
            sheet.set_value(row, 2, "ok");
        }
        let mut workbook = WorkBook::new_empty();
        workbook.push_sheet(sheet);

        let path = std::env::temp_dir().join("ltcorrection_from_ods_round_trip.ods");
        write_ods(&mut workbook, &path).expect("Failed to write ODS file");

        let path_str = path.to_str().unwrap();
        let data = DeathData::from_ods(path_str, "deaths").expect("Failed to read ODS file");
        assert_eq!(data.widths().unwrap(), vec![5, 5, 10]);
        assert_eq!(data.deaths().unwrap(), vec![12.0, 4.0, 9.0]);

        assert!(DeathData::from_ods(path_str, "missing").is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_from_xlsx_missing_file() {
        let result = DeathData::from_xlsx("does/not/exist.xlsx", "Sheet1");
        assert!(result.is_err());
    }
}
