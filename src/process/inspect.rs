use arrow::{
    array::Array, datatypes::DataType, record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};
use std::fmt;

use crate::{constants::HEAD_ROWS, process::table};

/// Per-column diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub null_count: usize,
}

/// Read-only snapshot of a freshly loaded table.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub num_rows: usize,
    pub head: RecordBatch,
    pub columns: Vec<ColumnProfile>,
}

pub fn inspect(batch: &RecordBatch) -> Inspection {
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, array)| ColumnProfile {
            name: field.name().clone(),
            data_type: field.data_type().clone(),
            null_count: array.null_count(),
        })
        .collect();

    Inspection {
        num_rows: batch.num_rows(),
        head: table::head(batch, HEAD_ROWS),
        columns,
    }
}

impl Inspection {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn null_count(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.null_count)
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(f, "First {} rows:", HEAD_ROWS)?;
        let head = pretty_format_batches(std::slice::from_ref(&self.head)).map_err(|_| fmt::Error)?;
        writeln!(f, "{}", head)?;
        writeln!(
            f,
            "Shape: {} rows × {} columns",
            self.num_rows,
            self.num_columns()
        )?;

        writeln!(f, "\nColumn data types:")?;
        for c in &self.columns {
            writeln!(f, "{:<width$}  {}", c.name, c.data_type, width = width)?;
        }

        writeln!(f, "\nMissing values per column:")?;
        for c in &self.columns {
            writeln!(f, "{:<width$}  {}", c.name, c.null_count, width = width)?;
        }
        Ok(())
    }
}
