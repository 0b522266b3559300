use crate::chunkset::{assembled_name, list_sorted, parse_part_name};
use crate::error::{ChunkError, Result};
use std::fs;
use std::path::Path;

/// Missing counters listed individually before the report only counts them
pub const MISSING_LISTED: usize = 20;

/// Summary of a chunk directory as the assembler would see it
#[derive(Debug, Clone, Default)]
pub struct ChunkSetSummary {
    pub assembled_name: String,
    pub parts: usize,
    pub total_bytes: u64,
    pub smallest_part: u64,
    pub largest_part: u64,
    /// First counters absent between 1 and the highest counter seen
    pub missing: Vec<u64>,
    /// How many counters are absent in total
    pub missing_count: u64,
    /// Entries that are not parts of the assembled name
    pub foreign: Vec<String>,
    /// Path order disagrees with counter order
    pub misordered: bool,
}

/// Inspect the chunk directory without modifying it
pub fn summarize(directory: &Path) -> Result<ChunkSetSummary> {
    if !directory.is_dir() {
        return Err(ChunkError::NotADirectory(directory.to_path_buf()));
    }
    let entries = list_sorted(directory)?;
    if entries.is_empty() {
        return Err(ChunkError::EmptyDirectory(directory.to_path_buf()));
    }

    let mut summary = ChunkSetSummary {
        assembled_name: assembled_name(directory, &entries)?,
        smallest_part: u64::MAX,
        ..Default::default()
    };
    let mut counters = Vec::with_capacity(entries.len());

    for path in &entries {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let counter = match parse_part_name(&file_name) {
            Some((name, counter)) if name == summary.assembled_name => counter,
            _ => {
                summary.foreign.push(file_name);
                continue;
            }
        };
        let len = fs::metadata(path)?.len();
        summary.parts += 1;
        summary.total_bytes += len;
        summary.smallest_part = summary.smallest_part.min(len);
        summary.largest_part = summary.largest_part.max(len);
        counters.push(counter);
    }

    if summary.parts == 0 {
        summary.smallest_part = 0;
    }
    summary.misordered = counters.windows(2).any(|w| w[0] > w[1]);

    counters.sort_unstable();
    counters.dedup();
    let (missing, missing_count) = find_gaps(&counters);
    summary.missing = missing;
    summary.missing_count = missing_count;

    Ok(summary)
}

/// Gaps in sorted, deduplicated counters: the first few, plus the total
fn find_gaps(counters: &[u64]) -> (Vec<u64>, u64) {
    let mut listed = Vec::new();
    let mut next = 1u64;
    for &counter in counters {
        while next < counter && listed.len() < MISSING_LISTED {
            listed.push(next);
            next += 1;
        }
        next = next.max(counter.saturating_add(1));
    }

    let highest = counters.last().copied().unwrap_or(0);
    let present = counters.iter().filter(|&&c| c >= 1).count() as u64;
    (listed, highest.saturating_sub(present))
}

/// Display information about a chunk directory
pub fn show_info(directory: &Path) -> Result<String> {
    let summary = summarize(directory)?;

    let mut output = String::new();
    output.push_str("Chunk Set Information\n");
    output.push_str("=====================\n\n");

    output.push_str(&format!("Directory: {}\n", directory.display()));
    output.push_str(&format!("Assembles into: {}\n", summary.assembled_name));
    output.push_str(&format!("Parts: {}\n", summary.parts));
    output.push_str(&format!(
        "Total size: {}\n",
        format_size(summary.total_bytes)
    ));
    if summary.parts > 0 {
        output.push_str(&format!(
            "Part size: {} - {}\n",
            format_size(summary.smallest_part),
            format_size(summary.largest_part)
        ));
    }
    output.push('\n');

    if summary.missing_count > 0 {
        let missing: Vec<String> = summary.missing.iter().map(|c| c.to_string()).collect();
        let more = summary.missing_count - summary.missing.len() as u64;
        if more > 0 {
            output.push_str(&format!(
                "Warning: {} missing parts: {} and {} more\n",
                summary.missing_count,
                missing.join(", "),
                more
            ));
        } else {
            output.push_str(&format!("Warning: missing parts {}\n", missing.join(", ")));
        }
    }
    if summary.misordered {
        output.push_str("Warning: part names do not sort in counter order; assembly will misorder them\n");
    }
    if !summary.foreign.is_empty() {
        output.push_str(&format!(
            "Warning: {} entries are not parts and will be appended as-is: {}\n",
            summary.foreign.len(),
            summary.foreign.join(", ")
        ));
    }

    Ok(output)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
