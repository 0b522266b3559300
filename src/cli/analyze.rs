use crate::chunkset::list_sorted;
use crate::error::Result;
use crate::operation::OperationResult;
use crate::pipeline::{validate, ValidationReport};
use crate::upload::Upload;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, trace};

/// Validate an upload's content against the allowed-character policy.
///
/// Returns `ANALYSIS_COMPLETE` whether or not violations were found; the
/// description holds the report and is absent for clean content.
#[tracing::instrument(skip_all, fields(file = %upload.name()))]
pub fn analyze<R: Read>(upload: Upload<R>) -> OperationResult {
    info!("[{}] Start file analysis.", upload.name());
    if upload.is_empty() {
        let result = OperationResult::no_content(upload.name());
        error!("{}", result.description().unwrap_or_default());
        return result;
    }

    let name = upload.name().to_string();
    match upload.read_all() {
        Ok(content) => report_result(&validate(&content)),
        Err(e) => {
            error!("[{}] Error analyzing file: {}", name, e);
            e.into()
        }
    }
}

/// Validate every file in `directory`, reporting only the failures.
///
/// Each failing entry becomes `Error in file [<path>]: <report>`, ending in
/// the report's own trailing `\r\n`; entries are concatenated with no blank
/// line between them. An entry that cannot be read counts as failing, with
/// the I/O error as its one-line report. The result is
/// `SUCCESS` either way; only an unreadable directory is an `ERROR`.
#[tracing::instrument(fields(dir = %directory.display()))]
pub fn analyze_all(directory: &Path) -> OperationResult {
    info!("Analyzing all files in {} folder", directory.display());
    match analyze_entries(directory) {
        Ok(result) => result,
        Err(e) => {
            error!("Error analyzing files in [{}]: {}", directory.display(), e);
            e.into()
        }
    }
}

fn analyze_entries(directory: &Path) -> Result<OperationResult> {
    let outcomes: Vec<(PathBuf, Result<ValidationReport>)> = list_sorted(directory)?
        .into_iter()
        .map(|path| {
            trace!("Analyzing file {}", path.display());
            let outcome = fs::read(&path)
                .map(|content| validate(&content))
                .map_err(Into::into);
            (path, outcome)
        })
        .collect();

    let failures: String = outcomes
        .iter()
        .filter_map(|(path, outcome)| match outcome {
            Ok(report) if report.is_clean() => None,
            Ok(report) => Some(failure_entry(path, &report.render())),
            Err(e) => Some(failure_entry(path, &format!("{}\r\n", e))),
        })
        .collect();

    Ok(OperationResult::success(Some(failures)))
}

/// `detail` already ends in `\r\n`
fn failure_entry(path: &Path, detail: &str) -> String {
    format!("Error in file [{}]: {}", path.display(), detail)
}

fn report_result(report: &ValidationReport) -> OperationResult {
    trace!("Analysis result: {} violations", report.len());
    OperationResult::analysis_complete(report.render())
}
