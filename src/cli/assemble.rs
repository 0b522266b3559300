use crate::chunkset::{assembled_name, list_sorted};
use crate::error::{ChunkError, Result};
use crate::operation::OperationResult;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, trace};

/// Options for the assemble command
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    /// Remove each part once its bytes are in the output
    pub delete_source: bool,
}

/// Why a single part did not make it cleanly into the output
#[derive(Debug)]
enum PartFailure {
    Append(io::Error),
    Delete(io::Error),
}

impl PartFailure {
    fn describe(&self, part: &Path) -> String {
        match self {
            Self::Append(e) => format!("Skipped part [{}]: {}", part.display(), e),
            Self::Delete(e) => format!("Could not delete part [{}]: {}", part.display(), e),
        }
    }
}

/// Concatenate the parts in `directory` into one file next to it.
///
/// Parts are appended in ascending path order by a single writer. A part
/// that cannot be read, written or deleted is logged and left out; the
/// call still succeeds and lists such parts in its description.
#[tracing::instrument(skip(options), fields(dir = %directory.display()))]
pub fn assemble(directory: &Path, options: &AssembleOptions) -> OperationResult {
    if !directory.is_dir() {
        return ChunkError::NotADirectory(directory.to_path_buf()).into();
    }
    match assemble_parts(directory, options) {
        Ok(result) => result,
        Err(e) => {
            error!("Error building file from path [{}]: {}", directory.display(), e);
            e.into()
        }
    }
}

fn assemble_parts(directory: &Path, options: &AssembleOptions) -> Result<OperationResult> {
    let entries = list_sorted(directory)?;
    if entries.is_empty() {
        return Ok(ChunkError::EmptyDirectory(directory.to_path_buf()).into());
    }

    let name = assembled_name(directory, &entries)?;
    let absolute = directory.canonicalize()?;
    let parent = absolute
        .parent()
        .ok_or_else(|| ChunkError::NoParent(directory.to_path_buf()))?;
    let target = parent.join(&name);
    if target.is_dir() {
        return Ok(ChunkError::OutputIsDirectory(target).into());
    }
    info!("Building file [{}] from chunks", name);

    if target.exists() {
        fs::remove_file(&target)?;
    }
    let mut output = File::create(&target)?;

    let outcomes: Vec<(PathBuf, std::result::Result<(), PartFailure>)> = entries
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            trace!("Building file, part {}", i + 1);
            let outcome = append_part(&mut output, &part, options.delete_source);
            (part, outcome)
        })
        .collect();
    output.flush()?;

    let failures: Vec<String> = outcomes
        .iter()
        .filter_map(|(part, outcome)| outcome.as_ref().err().map(|e| (part, e)))
        .map(|(part, e)| {
            let line = e.describe(part);
            error!("{}", line);
            line
        })
        .collect();

    info!(
        "Built [{}] from {} parts",
        target.display(),
        outcomes.len() - failures.len()
    );
    Ok(OperationResult::success(Some(failures.join("\r\n"))))
}

fn append_part(
    output: &mut File,
    part: &Path,
    delete_source: bool,
) -> std::result::Result<(), PartFailure> {
    let bytes = fs::read(part).map_err(PartFailure::Append)?;
    output.write_all(&bytes).map_err(PartFailure::Append)?;
    if delete_source {
        fs::remove_file(part).map_err(PartFailure::Delete)?;
    }
    Ok(())
}
