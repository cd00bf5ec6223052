//! The outreach run, start to finish: load, inspect, flag, classify, filter,
//! summarize, export. Each stage takes the previous table by reference and
//! returns a new one.

use arrow::{record_batch::RecordBatch, util::pretty::pretty_format_batches};
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::{
    config::PipelineConfig,
    constants::{FINANCIAL_COLUMNS, OVERVIEW_ROWS},
    error::Result,
    process::{
        build_contact_list, classify_missions, count_missing_codes, filter_focus_missions,
        filter_service_area, flag_manual_review, inspect, load_csv, summarize, table, write_csv,
        Inspection, MissingCodes, Summary,
    },
};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    pub inspection: Inspection,
    pub missing_codes: MissingCodes,
    pub summary: Summary,
    pub contacts: RecordBatch,
    pub output_path: PathBuf,
}

#[instrument(level = "info", skip(config), fields(input = %config.input_path.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    // ─── 1) load + inspect ───────────────────────────────────────────
    let registry = load_csv(&config.input_path)?;
    let inspection = inspect(&registry);
    print!("{}", inspection);

    // ─── 2) flag incomplete records on the full table ───────────────
    let flagged = flag_manual_review(&registry)?;
    let missing_codes = count_missing_codes(&flagged)?;
    println!(
        "{} of {} missing → {:.2}%",
        missing_codes.missing,
        missing_codes.total,
        missing_codes.percent()
    );

    // ─── 3) classify missions ────────────────────────────────────────
    let classified = classify_missions(&flagged)?;
    println!("{:?}", table::column_names(&classified));

    // ─── 4) mission-aligned, then service-area rows ──────────────────
    let aligned = filter_focus_missions(&classified)?;
    println!(
        "{} organizations align with PACE focus areas.",
        aligned.num_rows()
    );
    let local = filter_service_area(&aligned)?;
    let contacts = build_contact_list(&local)?;

    // ─── 5) summary ──────────────────────────────────────────────────
    let summary = summarize(&classified, &aligned, &contacts)?;
    print!("{}", summary);

    let financial = table::select_columns(&aligned, &FINANCIAL_COLUMNS)?;
    println!("\nFinancial overview of PACE-aligned organizations:");
    println!(
        "{}",
        pretty_format_batches(&[table::head(&financial, OVERVIEW_ROWS)])?
    );

    // ─── 6) export ───────────────────────────────────────────────────
    write_csv(&config.output_path, &contacts)?;
    println!(
        "\nPACE-aligned contact list exported to: {}",
        config.output_path.display()
    );
    println!(
        "{}",
        pretty_format_batches(&[table::head(&contacts, OVERVIEW_ROWS)])?
    );

    info!(
        total = summary.total,
        aligned = summary.mission_aligned,
        exported = summary.exported,
        "run complete"
    );

    Ok(RunReport {
        inspection,
        missing_codes,
        summary,
        contacts,
        output_path: config.output_path.clone(),
    })
}
