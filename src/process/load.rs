use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fs,
    io::{Cursor, ErrorKind},
    path::Path,
    sync::Arc,
};
use tracing::{info, instrument};

use crate::{
    constants::NULL_PATTERN,
    error::{PipelineError, Result},
    schema::{convert_to_final_types, derive_schema},
};

static NULL_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(NULL_PATTERN).expect("null token pattern is a valid regex"));

const BATCH_SIZE: usize = 8192;

/// Load a comma-delimited registry with a header row.
///
/// Every column is read as text first and only typed afterwards, once all
/// of its values have been seen, so a column that mixes numbers and text is
/// never half-coerced.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PipelineError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let raw = read_text_batch(&data)
        .map_err(|source| PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| PipelineError::MissingHeader {
            path: path.to_path_buf(),
        })?;

    let schema = derive_schema(&raw);
    let typed = convert_to_final_types(&raw, &schema)?;
    info!(
        rows = typed.num_rows(),
        columns = typed.num_columns(),
        "loaded registry"
    );
    Ok(typed)
}

/// Parse CSV bytes into one all-`Utf8` batch. `None` when there is no header.
/// Short rows are padded with nulls; rows with extra fields are an error.
fn read_text_batch(data: &[u8]) -> std::result::Result<Option<RecordBatch>, ArrowError> {
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(data), Some(0))?;
    if header.fields().is_empty() {
        return Ok(None);
    }

    let fields: Vec<Field> = header
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_truncated_rows(true)
        .with_null_regex(NULL_TOKENS.clone())
        .build(Cursor::new(data))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;

    concat_batches(&schema, &batches).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{table, test_util::init_test_logging};
    use anyhow::Result;
    use arrow::array::{Array, Int64Array};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        Ok(tmp)
    }

    #[test]
    fn loads_typed_columns_with_nulls() -> Result<()> {
        init_test_logging();
        let tmp = write_fixture(
            "NAME,CITY,ZIP,ASSET_AMT,NTEE_CD\n\
             Food Pantry,New Bedford,02740,1000,K31\n\
             ,Dartmouth,02747-1234,,NaN\n",
        )?;

        let batch = load_csv(tmp.path())?;
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);

        let zip = table::string_column(&batch, "ZIP")?;
        assert_eq!(zip.value(0), "02740");
        assert_eq!(zip.value(1), "02747-1234");

        let assets = table::column(&batch, "ASSET_AMT")?
            .as_any()
            .downcast_ref::<Int64Array>()
            .expect("ASSET_AMT should be Int64");
        assert_eq!(assets.value(0), 1000);
        assert!(assets.is_null(1));

        assert!(table::string_column(&batch, "NAME")?.is_null(1));
        assert!(table::string_column(&batch, "NTEE_CD")?.is_null(1));
        Ok(())
    }

    #[test]
    fn mixed_column_stays_text() -> Result<()> {
        let tmp = write_fixture("NAME,FILING_REQ_CD\nA,1\nB,N/R\n")?;
        let batch = load_csv(tmp.path())?;
        let col = table::string_column(&batch, "FILING_REQ_CD")?;
        assert_eq!(col.value(0), "1");
        assert_eq!(col.value(1), "N/R");
        Ok(())
    }

    #[test]
    fn header_only_file_loads_empty_table() -> Result<()> {
        let tmp = write_fixture("NAME,CITY\n")?;
        let batch = load_csv(tmp.path())?;
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
        Ok(())
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let err = load_csv("/definitely/not/here/eo_ma.csv").unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound { .. }));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() -> Result<()> {
        let tmp = write_fixture("NAME,CITY\nA,B,C\n")?;
        let err = load_csv(tmp.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }), "{err}");
        Ok(())
    }

    #[test]
    fn short_row_pads_trailing_cells_with_null() -> Result<()> {
        let tmp = write_fixture("NAME,CITY,ICO\nA,Marion\n")?;
        let batch = load_csv(tmp.path())?;
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(table::string_column(&batch, "NAME")?.value(0), "A");
        assert_eq!(table::string_column(&batch, "CITY")?.value(0), "Marion");
        assert!(table::string_column(&batch, "ICO")?.is_null(0));
        Ok(())
    }

    #[test]
    fn empty_file_has_no_header() -> Result<()> {
        let tmp = write_fixture("")?;
        let err = load_csv(tmp.path()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingHeader { .. }), "{err}");
        Ok(())
    }
}
