//! Naming rules for chunk sets on disk.
//!
//! A chunk set lives in a directory named after the source file with every
//! `.` replaced by `_`. That transform is lossy (`a_b.txt` and `a.b.txt`
//! collide), so the exact source name is carried by every part instead:
//! parts are named `<originalName>.<counter>` and the name is recovered by
//! stripping the numeric counter.
//!
//! A name without any `.` would encode to itself, making the chunk
//! directory and the assembled file the same path. Such names get a
//! `.parts` suffix instead; an encoded dotted name never contains a `.`,
//! so the suffix cannot collide with one.
//!
//! Two splits of the same name into the same storage root share one
//! directory and will overwrite each other's parts. Nothing locks it.

use crate::error::{ChunkError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reduce an uploaded name to a bare file name
pub fn sanitize_name(raw: &str) -> Result<String> {
    let name = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(ChunkError::InvalidName(raw.to_string()));
    }
    Ok(name.to_string())
}

/// Suffix of the chunk directory for names without a `.`
pub const DOTLESS_DIR_SUFFIX: &str = ".parts";

/// Directory name holding the parts of `name`
pub fn encode_dir_name(name: &str) -> String {
    if name.contains('.') {
        name.replace('.', "_")
    } else {
        format!("{}{}", name, DOTLESS_DIR_SUFFIX)
    }
}

/// Best-effort inverse of [`encode_dir_name`]: the last `_` becomes the
/// extension separator
pub fn decode_dir_name(dir_name: &str) -> String {
    if let Some(stem) = dir_name.strip_suffix(DOTLESS_DIR_SUFFIX) {
        if !stem.is_empty() {
            return stem.to_string();
        }
    }
    match dir_name.rsplit_once('_') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!("{}.{}", stem, ext),
        _ => dir_name.to_string(),
    }
}

/// File name of part `counter` (1-based), zero padded to `width`
pub fn part_name(name: &str, counter: u64, width: usize) -> String {
    format!("{}.{:0width$}", name, counter, width = width)
}

/// Split a part file name into the source name and its counter
pub fn parse_part_name(file_name: &str) -> Option<(&str, u64)> {
    let (name, counter) = file_name.rsplit_once('.')?;
    if name.is_empty() || counter.is_empty() || !counter.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((name, counter.parse().ok()?))
}

/// Entries of `dir` sorted by their full path string
pub fn list_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(entries)
}

/// Name of the file a chunk directory assembles into.
///
/// Taken from the name most entries parse to as parts, the earliest in
/// sort order on a tie; falls back to decoding the directory name.
pub fn assembled_name(dir: &Path, entries: &[PathBuf]) -> Result<String> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for name in entries.iter().filter_map(|path| {
        let file_name = path.file_name()?.to_str()?;
        parse_part_name(file_name).map(|(name, _)| name)
    }) {
        match tally.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => tally.push((name, 1)),
        }
    }
    // max_by_key keeps the last maximum, so scan in reverse
    if let Some((name, _)) = tally.iter().rev().max_by_key(|(_, count)| *count) {
        return Ok(name.to_string());
    }

    dir.file_name()
        .and_then(|n| n.to_str())
        .map(decode_dir_name)
        .ok_or_else(|| ChunkError::InvalidName(dir.display().to_string()))
}
