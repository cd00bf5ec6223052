use arrow::{
    array::{ArrayRef, BooleanArray, StringArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    constants::{CITY, CITY_CLEAN, FOCUS_MISSIONS, MISSION, TOWNS},
    error::Result,
    process::table,
};

/// Keep rows whose mission is one of the five focus areas. Rows without a
/// mission never match.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn filter_focus_missions(batch: &RecordBatch) -> Result<RecordBatch> {
    let missions = table::string_column(batch, MISSION)?;
    let mask: BooleanArray = missions
        .iter()
        .map(|m| Some(m.is_some_and(|m| FOCUS_MISSIONS.contains(m))))
        .collect();

    let aligned = filter_record_batch(batch, &mask)?;
    info!(aligned = aligned.num_rows(), "filtered to focus missions");
    Ok(aligned)
}

/// Normalized town name used for matching: trimmed and lowercased.
pub fn clean_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Add `CITY_CLEAN` and keep rows whose cleaned city is a Greater New
/// Bedford town. A missing city has no cleaned form and never matches.
#[instrument(level = "info", skip_all, fields(rows = batch.num_rows()))]
pub fn filter_service_area(batch: &RecordBatch) -> Result<RecordBatch> {
    let cities = table::string_column(batch, CITY)?;
    let cleaned: StringArray = cities.iter().map(|c| c.map(clean_city)).collect();
    let mask: BooleanArray = cleaned
        .iter()
        .map(|c| Some(c.is_some_and(|c| TOWNS.contains(c))))
        .collect();

    let with_clean = table::with_column(batch, CITY_CLEAN, Arc::new(cleaned) as ArrayRef)?;
    let local = filter_record_batch(&with_clean, &mask)?;
    info!(local = local.num_rows(), "filtered to service area");
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::test_util::text_batch;
    use anyhow::Result;
    use arrow::array::Array;

    #[test]
    fn keeps_only_focus_missions() -> Result<()> {
        let batch = text_batch(&[
            ("NAME", vec![Some("a"), Some("b"), Some("c"), Some("d"), Some("e"), Some("f"), Some("g")]),
            (
                "Mission",
                vec![
                    Some("Education"),
                    Some("Unknown / Unclassified"),
                    None,
                    Some("Housing & Shelter"),
                    Some("Food, Agriculture & Nutrition"),
                    Some("Community Improvement & Capacity Building"),
                    Some("Human Services – Multipurpose & Other"),
                ],
            ),
        ])?;

        let aligned = filter_focus_missions(&batch)?;
        let names = table::string_column(&aligned, "NAME")?;
        let kept: Vec<&str> = names.iter().flatten().collect();
        assert_eq!(kept, vec!["a", "d", "e", "f", "g"]);
        Ok(())
    }

    #[test]
    fn clean_city_trims_and_lowercases() {
        assert_eq!(clean_city("New Bedford "), "new bedford");
        assert_eq!(clean_city("  FAIRHAVEN"), "fairhaven");
        assert_eq!(clean_city("\tMarion\n"), "marion");
    }

    #[test]
    fn keeps_only_greater_new_bedford() -> Result<()> {
        let batch = text_batch(&[
            ("NAME", vec![Some("a"), Some("b"), Some("c"), Some("d"), Some("e")]),
            (
                "CITY",
                vec![
                    Some("New Bedford "),
                    Some("Boston"),
                    None,
                    Some("WAREHAM"),
                    Some("North Dartmouth"),
                ],
            ),
        ])?;

        let local = filter_service_area(&batch)?;
        let names: Vec<&str> = table::string_column(&local, "NAME")?
            .iter()
            .flatten()
            .collect();
        assert_eq!(names, vec!["a", "d"]);

        let cleaned = table::string_column(&local, CITY_CLEAN)?;
        assert_eq!(cleaned.value(0), "new bedford");
        assert_eq!(cleaned.value(1), "wareham");

        // raw CITY text is left untouched
        assert_eq!(table::string_column(&local, CITY)?.value(0), "New Bedford ");
        assert_eq!(local.num_rows(), 2);
        assert!(!cleaned.is_null(0));
        Ok(())
    }

    #[test]
    fn literal_nan_city_is_not_a_town() -> Result<()> {
        let batch = text_batch(&[("CITY", vec![Some("nan"), None])])?;
        assert_eq!(filter_service_area(&batch)?.num_rows(), 0);
        Ok(())
    }
}
