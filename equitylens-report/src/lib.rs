//! EquityLens Report — reports, artifact export, and batch summaries.
//!
//! This crate builds on `equitylens-core` to provide:
//! - `Report`: statistics, round trips, and chart series for one result
//! - Loading results from JSON files
//! - JSON / CSV / Markdown export and artifact bundles
//! - Parallel batch summaries over many result files

pub mod batch;
pub mod export;
pub mod loader;
pub mod report;

pub use batch::{summarize_files, BatchEntry};
pub use export::{
    export_equity_csv, export_report_json, export_round_trips_csv, fmt_pct, import_report_json,
    render_markdown, save_artifacts,
};
pub use loader::load_result;
pub use report::{Report, SCHEMA_VERSION};
