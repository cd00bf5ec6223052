use arrow::{
    array::{Array, StringArray, UInt64Array},
    compute::take_record_batch,
    csv::WriterBuilder,
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{cmp::Ordering, fs, path::Path};
use tracing::{info, instrument};

use crate::{
    constants::{CITY, CONTACT_COLUMNS},
    error::{PipelineError, Result},
    process::table,
};

/// Project the contact columns in their fixed order and sort by raw CITY.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn build_contact_list(batch: &RecordBatch) -> Result<RecordBatch> {
    let projected = table::select_columns(batch, &CONTACT_COLUMNS)?;
    sort_by_city(&projected)
}

/// Stable ascending sort on the untouched CITY text, byte-wise and
/// case-sensitive, with missing cities last.
pub fn sort_by_city(batch: &RecordBatch) -> Result<RecordBatch> {
    let cities = table::string_column(batch, CITY)?;
    Ok(take_record_batch(batch, &city_order(cities))?)
}

/// Take indices that put `cities` in ascending order, nulls last.
fn city_order(cities: &StringArray) -> UInt64Array {
    let mut order: Vec<usize> = (0..cities.len()).collect();
    order.sort_by(|&a, &b| compare_nulls_last(city_at(cities, a), city_at(cities, b)));
    UInt64Array::from(order.into_iter().map(|i| i as u64).collect::<Vec<u64>>())
}

fn city_at(cities: &StringArray, i: usize) -> Option<&str> {
    cities.is_valid(i).then(|| cities.value(i))
}

fn compare_nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Render a batch as CSV with a header row. Missing cells are empty.
pub fn encode_csv(batch: &RecordBatch) -> std::result::Result<Vec<u8>, ArrowError> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);
        writer.write(batch)?;
    }
    Ok(buf)
}

/// Create or overwrite `path` with the CSV rendering of `batch`. The parent
/// directory must already exist.
#[instrument(level = "info", skip(path, batch), fields(path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(path: P, batch: &RecordBatch) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source: ArrowError| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = encode_csv(batch).map_err(write_err)?;
    fs::write(path, &bytes).map_err(|e| write_err(ArrowError::from(e)))?;

    info!(rows = batch.num_rows(), bytes = bytes.len(), "wrote contact list");
    Ok(())
}
