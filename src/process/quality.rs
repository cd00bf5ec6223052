use arrow::{
    array::{Array, ArrayRef, BooleanArray},
    compute::{is_null, or},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    constants::{NEEDS_MANUAL_REVIEW, REVIEW_COLUMNS},
    error::{PipelineError, Result},
    process::table,
};

/// Add `needs_manual_review`: true when any of NAME, STREET, CITY or
/// ASSET_AMT is missing. Must run on the full table, before any filter.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn flag_manual_review(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut flags: Option<BooleanArray> = None;
    for name in REVIEW_COLUMNS {
        let missing = is_null(table::column(batch, name)?.as_ref())?;
        flags = Some(match flags {
            None => missing,
            Some(acc) => or(&acc, &missing)?,
        });
    }
    let flags = flags.unwrap_or_else(|| BooleanArray::from(vec![false; batch.num_rows()]));

    info!(flagged = flags.true_count(), "flagged records for manual review");
    table::with_column(batch, NEEDS_MANUAL_REVIEW, Arc::new(flags) as ArrayRef)
}

/// Number of rows flagged by `flag_manual_review`.
pub fn count_flagged(batch: &RecordBatch) -> Result<usize> {
    let col = table::column(batch, NEEDS_MANUAL_REVIEW)?;
    let flags = col
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| PipelineError::ColumnType {
            column: NEEDS_MANUAL_REVIEW.to_string(),
            expected: arrow::datatypes::DataType::Boolean,
            found: col.data_type().clone(),
        })?;
    Ok(flags.true_count())
}
