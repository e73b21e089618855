//! Parallel summaries over many result files.

use std::path::{Path, PathBuf};

use equitylens_core::chart::ChartCanvas;
use rayon::prelude::*;

use crate::loader::load_result;
use crate::report::Report;

/// One file's outcome in a batch. Failures are kept per file.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: Result<Report, String>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Build a report for every file in parallel, preserving input order.
///
/// A file that cannot be read or parsed yields an `Err` entry; the rest of
/// the batch still runs.
pub fn summarize_files(paths: &[PathBuf], canvas: &ChartCanvas) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = paths
        .par_iter()
        .map(|path| BatchEntry {
            path: path.clone(),
            outcome: summarize_one(path, canvas),
        })
        .collect();

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    tracing::debug!(files = entries.len(), failed, "batch summary complete");
    entries
}

fn summarize_one(path: &Path, canvas: &ChartCanvas) -> Result<Report, String> {
    load_result(path)
        .map(|result| Report::build(&result, canvas))
        .map_err(|e| format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_result(dir: &Path, name: &str, values: &[f64]) -> PathBuf {
        let curve: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| format!(r#"{{"t":"d{i}","v":{v}}}"#))
            .collect();
        let json = format!(
            r#"{{"ticker":"{name}","equity_curve":[{}],"trades":[]}}"#,
            curve.join(",")
        );
        let path = dir.join(format!("{name}.json"));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn preserves_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_result(dir.path(), "AAA", &[100.0, 110.0]);
        let missing = dir.path().join("missing.json");
        let c = write_result(dir.path(), "CCC", &[100.0]);

        let paths = vec![a.clone(), missing.clone(), c.clone()];
        let entries = summarize_files(&paths, &ChartCanvas::default());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, a);
        assert_eq!(entries[1].path, missing);
        assert_eq!(entries[2].path, c);

        let first = entries[0].outcome.as_ref().unwrap();
        assert_eq!(first.ticker, "AAA");
        assert!((first.stats.as_ref().unwrap().total_return_pct - 10.0).abs() < 1e-9);

        assert!(entries[1].outcome.as_ref().unwrap_err().contains("missing.json"));

        let third = entries[2].outcome.as_ref().unwrap();
        assert!(third.stats.is_none());
    }

    #[test]
    fn empty_batch() {
        assert!(summarize_files(&[], &ChartCanvas::default()).is_empty());
    }
}
