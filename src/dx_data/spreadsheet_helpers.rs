use crate::LTResult;
use calamine::{Data, Range};
use spreadsheet_ods::Value;

// ========= ODS Using spreadsheet_ods =========

pub fn parse_ods_headers(
    sheet: &spreadsheet_ods::Sheet,
    header_row: u32, // Base 0
) -> LTResult<Vec<String>> {
    let mut headers = Vec::new();
    let mut col = 0;

    loop {
        let header = match sheet.value(header_row, col) {
            Value::Empty => break,
            Value::Text(s) => s.trim().to_lowercase(),
            Value::Number(f) => f.to_string(),
            _ => String::new(),
        };
        headers.push(header);
        col += 1;
    }

    if headers.is_empty() {
        return Err("Header row is empty".into());
    }
    Ok(headers)
}

pub fn parse_ods_data(
    sheet: &spreadsheet_ods::Sheet,
    start_row: usize,
    ncols: usize,
) -> LTResult<Vec<Vec<f64>>> {
    collect_columns(start_row, ncols, |row, col| {
        ods_cell_to_f64(sheet.value(row as u32, col as u32))
    })
}

// ========= XLSX - Using Calamine=========

pub fn parse_excel_headers(range: &Range<Data>, start_row: usize) -> LTResult<Vec<String>> {
    if range.get((start_row, 0)).is_none() {
        return Err("Header row is empty".into());
    }

    let mut headers = Vec::new();
    let mut col = 0;

    loop {
        match range.get((start_row, col)) {
            Some(Data::String(s)) if !s.trim().is_empty() => headers.push(s.trim().to_lowercase()),
            Some(Data::Empty) | None => return Ok(headers),
            Some(other) => headers.push(other.to_string()),
        }
        col += 1;
    }
}

pub fn parse_excel_data(
    range: &Range<Data>,
    start_row: usize,
    ncols: usize,
) -> LTResult<Vec<Vec<f64>>> {
    collect_columns(start_row, ncols, |row, col| {
        excel_cell_to_f64(range.get((row, col)))
    })
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

/// Read rows from `start_row` until a row without any numeric cell, transposed to columns.
/// Cells that are not numeric become NaN.
fn collect_columns<F>(start_row: usize, ncols: usize, cell: F) -> LTResult<Vec<Vec<f64>>>
where
    F: Fn(usize, usize) -> Option<f64>,
{
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); ncols];
    let mut row = start_row;

    loop {
        let values: Vec<f64> = (0..ncols)
            .map(|col| cell(row, col).unwrap_or(f64::NAN))
            .collect();

        if values.iter().all(|v| v.is_nan()) {
            break;
        }

        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
        row += 1;
    }

    Ok(columns)
}

fn ods_cell_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(f) => Some(*f),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn excel_cell_to_f64(cell: Option<&Data>) -> Option<f64> {
    match cell {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(v)) => Some(*v as f64),
        Some(Data::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
