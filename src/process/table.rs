//! Column-level helpers over a single in-memory `RecordBatch`.
//!
//! Every helper takes the batch by reference and returns a new one; nothing
//! here mutates its input.

use arrow::{
    array::{Array, ArrayRef, StringArray},
    datatypes::{DataType, Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::error::{PipelineError, Result};

/// Look up a column by name. A missing column is fatal.
pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: name.to_string(),
        })
}

/// Look up a text column by name.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let col = column(batch, name)?;
    col.as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PipelineError::ColumnType {
            column: name.to_string(),
            expected: DataType::Utf8,
            found: col.data_type().clone(),
        })
}

/// Add `array` as column `name`, replacing any existing column of that name
/// in place; otherwise it is appended.
pub fn with_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns = batch.columns().to_vec();
    let field = Arc::new(Field::new(name, array.data_type().clone(), true));

    match schema.index_of(name) {
        Ok(i) => {
            fields[i] = field;
            columns[i] = array;
        }
        Err(_) => {
            fields.push(field);
            columns.push(array);
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Remove column `name`. Dropping a column that is not there is a no-op.
pub fn drop_column(batch: &RecordBatch, name: &str) -> Result<RecordBatch> {
    let schema = batch.schema();
    if schema.index_of(name).is_err() {
        return Ok(batch.clone());
    }
    let keep: Vec<usize> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.name() != name)
        .map(|(i, _)| i)
        .collect();
    Ok(batch.project(&keep)?)
}

/// Project `names` in the given order, whatever the order in `batch`.
pub fn select_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let indices = names
        .iter()
        .map(|name| {
            schema
                .index_of(name)
                .map_err(|_| PipelineError::MissingColumn {
                    column: name.to_string(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;
    Ok(batch.project(&indices)?)
}

/// First `n` rows (fewer if the batch is shorter).
pub fn head(batch: &RecordBatch, n: usize) -> RecordBatch {
    batch.slice(0, n.min(batch.num_rows()))
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}
