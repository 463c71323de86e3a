//! Unit-row stripping and numeric coercion

use polars::prelude::*;

use super::error::PipelineResult;

/// Number of rows between the header and the first observation: the units
/// row and the dashed separator row.
pub const DEFAULT_HEADER_ROWS: usize = 2;

/// Drop the leading unit/separator rows and coerce every cell to `Float64`.
///
/// Cells that do not parse become nulls; this never fails on cell content.
/// A table shorter than `header_rows` yields an empty table with the same
/// columns.
pub fn strip_unit_rows(raw: &DataFrame, header_rows: usize) -> PipelineResult<DataFrame> {
    let data_rows = raw.height().saturating_sub(header_rows);
    let stripped = raw.slice(header_rows as i64, data_rows);
    coerce_numeric(&stripped)
}

/// Coerce every column of `df` to `Float64`.
///
/// Text columns go through [`parse_numeric`]; numeric columns are cast.
/// Running this on an already-numeric table returns an equal table.
pub fn coerce_numeric(df: &DataFrame) -> PipelineResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(coerce_column)
        .collect::<PipelineResult<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}

fn coerce_column(col: &Column) -> PipelineResult<Column> {
    let name = col.name().clone();

    let values: Vec<Option<f64>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|cell| cell.and_then(parse_numeric))
            .collect(),
        DataType::Float64 => col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect(),
        _ => col
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect(),
    };

    Ok(Column::new(name, values))
}

/// Parse a single cell as a number.
///
/// Surrounding whitespace is ignored and a single decimal comma is accepted
/// (`"1,5"` is 1.5), since regional exports write decimals that way. Empty
/// cells, text, NaN and infinities are missing.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    let value = match cell.parse::<f64>() {
        Ok(v) => v,
        Err(_) if cell.matches(',').count() == 1 && !cell.contains('.') => {
            cell.replacen(',', ".", 1).parse::<f64>().ok()?
        }
        Err(_) => return None,
    };

    value.is_finite().then_some(value)
}
