use crate::chunkset::{encode_dir_name, part_name, sanitize_name};
use crate::error::Result;
use crate::operation::OperationResult;
use crate::pipeline::{chunk_count, counter_width, read_chunk, ChunkSize};
use crate::upload::Upload;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

/// Options for the split command
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Base directory that receives one chunk directory per source file
    pub storage_root: PathBuf,
    pub chunk_size: ChunkSize,
}

impl SplitOptions {
    /// Build options from a chunk size in KB
    pub fn with_kb(storage_root: impl Into<PathBuf>, chunk_size_kb: u64) -> Result<Self> {
        Ok(Self {
            storage_root: storage_root.into(),
            chunk_size: ChunkSize::from_kb(chunk_size_kb)?,
        })
    }
}

/// Split an upload into `<name>.<counter>` files under
/// `storage_root/<name with dots replaced>`.
///
/// An empty upload yields `NO_CONTENT` and touches nothing on disk. On an
/// I/O failure the parts already written are left in place.
#[tracing::instrument(skip_all, fields(file = %upload.name()))]
pub fn split<R: Read>(upload: Upload<R>, options: &SplitOptions) -> OperationResult {
    if upload.is_empty() {
        return empty_upload(upload.name());
    }
    let name = upload.name().to_string();
    match write_parts(upload, options) {
        Ok(result) => result,
        Err(e) => {
            error!("[{}] Error splitting file into parts: {}", name, e);
            e.into()
        }
    }
}

/// Like [`split`], taking the chunk size in KB.
/// Sizes that leave no room after the reserved bytes are an `ERROR`.
pub fn split_kb<R: Read>(
    upload: Upload<R>,
    storage_root: &Path,
    chunk_size_kb: u64,
) -> OperationResult {
    if upload.is_empty() {
        return empty_upload(upload.name());
    }
    match SplitOptions::with_kb(storage_root, chunk_size_kb) {
        Ok(options) => split(upload, &options),
        Err(e) => {
            error!("[{}] {}", upload.name(), e);
            e.into()
        }
    }
}

fn empty_upload(name: &str) -> OperationResult {
    let result = OperationResult::no_content(name);
    error!("{}", result.description().unwrap_or_default());
    result
}

fn write_parts<R: Read>(upload: Upload<R>, options: &SplitOptions) -> Result<OperationResult> {
    let name = sanitize_name(upload.name())?;
    let buffer_size = options.chunk_size.bytes();
    let expected = chunk_count(upload.size(), options.chunk_size);
    let width = counter_width(expected);
    let destination = options.storage_root.join(encode_dir_name(&name));

    info!("[{}] Start splitting file.", name);
    info!("[{}] File size: {}", name, upload.size());
    debug!("Chunk size: {}", buffer_size);
    info!("[{}] Split into {} chunks by {} bytes", name, expected, buffer_size);

    let mut reader = upload.into_reader();
    let mut buffer = Vec::with_capacity(buffer_size.min(1024 * 1024));
    let mut written: u64 = 0;

    while read_chunk(&mut reader, buffer_size, &mut buffer)? > 0 {
        if written == 0 {
            create_dir_if_missing(&destination)?;
        }
        written += 1;
        let part = destination.join(part_name(&name, written, width));
        trace!("Splitting file {}, part {}", name, written);
        let mut out = File::create(&part)?;
        out.write_all(&buffer)?;
    }

    if written == 0 {
        // Declared size was non-zero but the stream had nothing in it
        return Ok(empty_upload(&name));
    }
    if written != expected {
        warn!(
            "[{}] Declared size implied {} parts but {} were written",
            name, expected, written
        );
    }
    if part_name(&name, written, width).len() != part_name(&name, 1, width).len() {
        warn!(
            "[{}] Part counter outgrew {} digits; lexicographic order no longer matches part order",
            name, width
        );
    }

    Ok(OperationResult::success(Some(format!(
        "File [{}] was split into {} parts",
        name, expected
    ))))
}

fn create_dir_if_missing(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Created directory {}", dir.display());
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunkset::list_sorted;
    use crate::operation::OperationStatus;
    use std::io;
    use tempfile::tempdir;

    fn options(root: &Path, bytes: usize) -> SplitOptions {
        SplitOptions {
            storage_root: root.to_path_buf(),
            chunk_size: ChunkSize::from_bytes(bytes).unwrap(),
        }
    }

    #[test]
    fn test_split_empty_upload() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");
        let result = split(Upload::from_bytes("empty.txt", vec![]), &options(&root, 16));

        assert_eq!(result.status(), OperationStatus::NoContent);
        assert_eq!(result.description(), Some("File [empty.txt] has no content."));
        assert!(!root.exists());
    }

    #[test]
    fn test_split_one_byte_parts() {
        let dir = tempdir().unwrap();
        let data: Vec<u8> = (0..10).collect();
        let result = split(Upload::from_bytes("digits.bin", data), &options(dir.path(), 1));

        assert_eq!(result.status(), OperationStatus::Success);
        assert_eq!(
            result.description(),
            Some("File [digits.bin] was split into 10 parts")
        );

        let parts = list_sorted(&dir.path().join("digits_bin")).unwrap();
        assert_eq!(parts.len(), 10);
        for (i, part) in parts.iter().enumerate() {
            let expected_name = format!("digits.bin.{:03}", i + 1);
            assert_eq!(part.file_name().unwrap().to_str().unwrap(), expected_name);
            assert_eq!(fs::read(part).unwrap(), vec![i as u8]);
        }
    }

    #[test]
    fn test_split_short_final_part() {
        let dir = tempdir().unwrap();
        let data = vec![7u8; 2500];
        let result = split(Upload::from_bytes("seven.dat", data), &options(dir.path(), 1000));
        assert_eq!(
            result.description(),
            Some("File [seven.dat] was split into 3 parts")
        );

        let sizes: Vec<u64> = list_sorted(&dir.path().join("seven_dat"))
            .unwrap()
            .iter()
            .map(|p| fs::metadata(p).unwrap().len())
            .collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
    }

    #[test]
    fn test_split_exact_multiple_has_no_trailing_part() {
        let dir = tempdir().unwrap();
        let result = split(Upload::from_bytes("even.dat", vec![1u8; 300]), &options(dir.path(), 100));
        assert!(result.description().unwrap().ends_with("split into 3 parts"));
        assert_eq!(list_sorted(&dir.path().join("even_dat")).unwrap().len(), 3);
    }

    #[test]
    fn test_split_into_existing_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("again_txt")).unwrap();
        let result = split(Upload::from_bytes("again.txt", b"abc".to_vec()), &options(dir.path(), 2));
        assert_eq!(result.status(), OperationStatus::Success);
        assert_eq!(list_sorted(&dir.path().join("again_txt")).unwrap().len(), 2);
    }

    #[test]
    fn test_split_widens_counter_past_999() {
        let dir = tempdir().unwrap();
        let result = split(Upload::from_bytes("wide.bin", vec![0u8; 1000]), &options(dir.path(), 1));
        assert_eq!(result.status(), OperationStatus::Success);

        let parts = list_sorted(&dir.path().join("wide_bin")).unwrap();
        assert_eq!(parts.len(), 1000);
        assert!(parts[0].ends_with("wide.bin.0001"));
        assert!(parts[999].ends_with("wide.bin.1000"));
    }

    #[test]
    fn test_split_kb_rejects_small_chunk_size() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("store");
        let result = split_kb(Upload::from_bytes("a.txt", b"abc".to_vec()), &root, 0);
        assert!(result.is_error());
        assert!(result.description().unwrap().contains("Invalid chunk size"));
        assert!(!root.exists());
    }

    #[test]
    fn test_split_kb_default_size() {
        let dir = tempdir().unwrap();
        let result = split_kb(Upload::from_bytes("small.txt", b"hello".to_vec()), dir.path(), 1);
        assert_eq!(
            result.description(),
            Some("File [small.txt] was split into 1 parts")
        );
    }

    #[test]
    fn test_split_dotless_name_uses_suffixed_directory() {
        let dir = tempdir().unwrap();
        let result = split(Upload::from_bytes("LICENSE", b"MIT".to_vec()), &options(dir.path(), 2));
        assert_eq!(result.status(), OperationStatus::Success);
        assert!(dir.path().join("LICENSE.parts").join("LICENSE.001").exists());
        assert!(!dir.path().join("LICENSE").exists());
    }

    #[test]
    fn test_split_rejects_bad_name() {
        let dir = tempdir().unwrap();
        let result = split(Upload::from_bytes("..", b"abc".to_vec()), &options(dir.path(), 2));
        assert!(result.is_error());
        assert!(result.description().unwrap().contains("Invalid file name"));
    }

    /// Yields `good` bytes, then fails
    struct Failing {
        good: usize,
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            let n = self.good.min(buf.len());
            buf[..n].fill(b'x');
            self.good -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_split_keeps_parts_written_before_failure() {
        let dir = tempdir().unwrap();
        let upload = Upload::new("broken.txt", 100, Failing { good: 25 });
        let result = split(upload, &options(dir.path(), 10));

        assert!(result.is_error());
        assert!(result.description().unwrap().contains("disk on fire"));
        // Two full parts made it out; the third read failed
        assert_eq!(list_sorted(&dir.path().join("broken_txt")).unwrap().len(), 2);
    }
}
