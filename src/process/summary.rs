use arrow::{array::Array, record_batch::RecordBatch};
use std::{collections::BTreeMap, fmt};

use crate::{
    constants::{ICO, MISSION},
    error::Result,
    process::{quality::count_flagged, table},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionCount {
    pub mission: String,
    pub count: usize,
}

/// Headline numbers for one run.
///
/// `mission_aligned` is counted before the service-area filter and
/// `exported` after it; the breakdown describes the mission-aligned rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub mission_aligned: usize,
    pub exported: usize,
    pub missing_mission: usize,
    pub missing_ico: usize,
    pub needs_manual_review: usize,
    pub breakdown: Vec<MissionCount>,
}

/// `classified` is the full table after flagging and classification,
/// `aligned` the focus-mission subset and `exported` the final contact rows.
pub fn summarize(
    classified: &RecordBatch,
    aligned: &RecordBatch,
    exported: &RecordBatch,
) -> Result<Summary> {
    Ok(Summary {
        total: classified.num_rows(),
        mission_aligned: aligned.num_rows(),
        exported: exported.num_rows(),
        missing_mission: table::column(classified, MISSION)?.null_count(),
        missing_ico: table::column(classified, ICO)?.null_count(),
        needs_manual_review: count_flagged(classified)?,
        breakdown: mission_breakdown(aligned)?,
    })
}

/// Count of each mission label, most common first; ties by label.
pub fn mission_breakdown(batch: &RecordBatch) -> Result<Vec<MissionCount>> {
    let missions = table::string_column(batch, MISSION)?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for mission in missions.iter().flatten() {
        *counts.entry(mission).or_default() += 1;
    }

    let mut breakdown: Vec<MissionCount> = counts
        .into_iter()
        .map(|(mission, count)| MissionCount {
            mission: mission.to_string(),
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(breakdown)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nSummary:")?;
        writeln!(
            f,
            "{} out of {} organizations align with PACE's mission.",
            self.mission_aligned, self.total
        )?;
        writeln!(
            f,
            "{} out of {} are missing mission codes and need further research.",
            self.missing_mission, self.total
        )?;
        writeln!(
            f,
            "{} out of {} are missing 'In Care Of (ICO)' information.",
            self.missing_ico, self.total
        )?;
        writeln!(
            f,
            "{} out of {} are flagged for manual review.",
            self.needs_manual_review, self.total
        )?;
        writeln!(
            f,
            "{} of the {} mission-aligned organizations are in the Greater New Bedford area.",
            self.exported, self.mission_aligned
        )?;

        writeln!(f, "\nPACE Mission Alignment Breakdown:")?;
        let width = self
            .breakdown
            .iter()
            .map(|m| m.mission.chars().count())
            .max()
            .unwrap_or(0);
        for m in &self.breakdown {
            writeln!(f, "{:<width$}  {}", m.mission, m.count, width = width)?;
        }
        Ok(())
    }
}
