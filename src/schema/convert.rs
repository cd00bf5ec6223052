use arrow::{
    array::{Array, ArrayRef, Float64Builder, Int64Builder, StringArray},
    datatypes::{DataType, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::error::Result;

/// Convert text columns into the types chosen by `derive_schema`.
/// Cells that fail to parse become null; `derive_schema` only picks a
/// numeric type when every cell parses, so this never drops data.
pub fn convert_to_final_types(batch: &RecordBatch, schema: &Schema) -> Result<RecordBatch> {
    let mut out = Vec::with_capacity(batch.num_columns());

    for (arr, fld) in batch.columns().iter().zip(schema.fields()) {
        match (arr.as_any().downcast_ref::<StringArray>(), fld.data_type()) {
            (Some(sarr), DataType::Int64) => {
                let mut b = Int64Builder::with_capacity(sarr.len());
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.trim().parse().ok()));
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            (Some(sarr), DataType::Float64) => {
                let mut b = Float64Builder::with_capacity(sarr.len());
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.trim().parse().ok()));
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            _ => out.push(arr.clone()),
        }
    }

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), out)?)
}
