use arrow::{
    array::{Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::constants::TEXT_COLUMNS;

/// Narrowest type a single cell fits in.
fn infer_cell_type(cell: &str) -> DataType {
    let cell = cell.trim();
    if cell.parse::<i64>().is_ok() {
        DataType::Int64
    } else if cell.parse::<f64>().is_ok() {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Widen two candidate types: Int64 < Float64 < Utf8.
fn widen(a: DataType, b: DataType) -> DataType {
    match (a, b) {
        (DataType::Int64, DataType::Int64) => DataType::Int64,
        (DataType::Int64 | DataType::Float64, DataType::Int64 | DataType::Float64) => {
            DataType::Float64
        }
        _ => DataType::Utf8,
    }
}

/// Scan every non-null cell of a text column and pick the narrowest type
/// that holds all of them. A column with any non-numeric cell stays text,
/// and so does a column with no values at all.
pub fn derive_column_type(values: &StringArray) -> DataType {
    let mut derived: Option<DataType> = None;
    for cell in values.iter().flatten() {
        let cell_type = infer_cell_type(cell);
        let next = match derived.take() {
            None => cell_type,
            Some(prev) => widen(prev, cell_type),
        };
        if next == DataType::Utf8 {
            return DataType::Utf8;
        }
        derived = Some(next);
    }
    derived.unwrap_or(DataType::Utf8)
}

/// Derive the final schema for a batch that was read entirely as text.
/// Identity and address columns are pinned to text.
pub fn derive_schema(batch: &RecordBatch) -> Schema {
    let fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, column)| {
            let name = field.name();
            let ty = if TEXT_COLUMNS.contains(&name.as_str()) {
                DataType::Utf8
            } else {
                match column.as_any().downcast_ref::<StringArray>() {
                    Some(values) => derive_column_type(values),
                    None => column.data_type().clone(),
                }
            };
            debug!(column = %name, ?ty, nulls = column.null_count(), "derived column type");
            Field::new(name, ty, true)
        })
        .collect();

    Schema::new(fields)
}
