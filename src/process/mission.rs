use arrow::{
    array::{Array, ArrayRef, StringArray},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    constants::{MISSION, MISSION_CODE, MISSION_MAP, NTEE_CD},
    error::Result,
    process::table,
};

/// Mission label for an NTEE code, keyed on its first character only.
/// Lowercase or non-letter prefixes have no label.
pub fn mission_for_code(code: &str) -> Option<&'static str> {
    code.chars()
        .next()
        .and_then(|letter| MISSION_MAP.get(&letter).copied())
}

/// How many records carry no NTEE code at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingCodes {
    pub missing: usize,
    pub total: usize,
}

impl MissingCodes {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.missing as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn count_missing_codes(batch: &RecordBatch) -> Result<MissingCodes> {
    let codes = table::column(batch, NTEE_CD)?;
    Ok(MissingCodes {
        missing: codes.null_count(),
        total: batch.num_rows(),
    })
}

/// Derive `Mission` from `NTEE_CD`, keep the raw code as `Mission_Code`, and
/// drop `NTEE_CD`.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn classify_missions(batch: &RecordBatch) -> Result<RecordBatch> {
    let codes = table::string_column(batch, NTEE_CD)?;
    let missions: StringArray = codes
        .iter()
        .map(|code| code.and_then(mission_for_code))
        .collect();
    debug!(
        unlabelled = missions.null_count(),
        "derived mission labels"
    );

    let raw_codes: ArrayRef = Arc::new(codes.clone());
    let out = table::with_column(batch, MISSION, Arc::new(missions))?;
    let out = table::with_column(&out, MISSION_CODE, raw_codes)?;
    let out = table::drop_column(&out, NTEE_CD)?;

    info!(columns = ?table::column_names(&out), "classified missions");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PipelineError, process::test_util::text_batch};
    use anyhow::Result;

    #[test]
    fn uses_only_the_leading_letter() {
        assert_eq!(mission_for_code("B100"), Some("Education"));
        assert_eq!(mission_for_code("B"), Some("Education"));
        assert_eq!(mission_for_code("P20"), Some("Human Services – Multipurpose & Other"));
        assert_eq!(mission_for_code("Z99"), Some("Unknown / Unclassified"));
    }

    #[test]
    fn unmapped_prefixes_have_no_mission() {
        assert_eq!(mission_for_code(""), None);
        assert_eq!(mission_for_code("b20"), None);
        assert_eq!(mission_for_code("9"), None);
        assert_eq!(mission_for_code(" B20"), None);
    }

    #[test]
    fn replaces_code_column_with_mission_and_code() -> Result<()> {
        let batch = text_batch(&[
            ("NAME", vec![Some("School"), Some("Mystery"), Some("Lower")]),
            ("NTEE_CD", vec![Some("B100"), None, Some("l20")]),
        ])?;

        let classified = classify_missions(&batch)?;
        assert_eq!(
            table::column_names(&classified),
            vec!["NAME", "Mission", "Mission_Code"]
        );

        let missions = table::string_column(&classified, MISSION)?;
        assert_eq!(missions.value(0), "Education");
        assert!(missions.is_null(1));
        assert!(missions.is_null(2));

        let codes = table::string_column(&classified, MISSION_CODE)?;
        assert_eq!(codes.value(0), "B100");
        assert!(codes.is_null(1));
        assert_eq!(codes.value(2), "l20");
        Ok(())
    }

    #[test]
    fn counts_missing_codes() -> Result<()> {
        let batch = text_batch(&[("NTEE_CD", vec![Some("A"), None, None, Some("S20")])])?;
        let missing = count_missing_codes(&batch)?;
        assert_eq!(missing, MissingCodes { missing: 2, total: 4 });
        assert!((missing.percent() - 50.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn empty_table_has_zero_percent_missing() {
        let missing = MissingCodes { missing: 0, total: 0 };
        assert_eq!(missing.percent(), 0.0);
    }

    #[test]
    fn missing_code_column_is_fatal() -> Result<()> {
        let batch = text_batch(&[("NAME", vec![Some("A")])])?;
        assert!(matches!(
            classify_missions(&batch),
            Err(PipelineError::MissingColumn { .. })
        ));
        Ok(())
    }
}
