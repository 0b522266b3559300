use chunkanalyzer::chunkset::{encode_dir_name, list_sorted};
use chunkanalyzer::cli::{analyze_all, assemble, split, AssembleOptions, SplitOptions};
use chunkanalyzer::pipeline::{validate, ChunkSize};
use chunkanalyzer::{OperationStatus, Upload};
use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn split_then_assemble_restores_bytes(
        data in prop::collection::vec(any::<u8>(), 1..2048),
        buffer in 1usize..600,
        name in prop::sample::select(vec!["blob.bin", "README", "archive.tar.gz", "x"]),
    ) {
        let dir = tempdir().unwrap();
        let options = SplitOptions {
            storage_root: dir.path().to_path_buf(),
            chunk_size: ChunkSize::from_bytes(buffer).unwrap(),
        };

        let result = split(Upload::from_bytes(name, data.clone()), &options);
        prop_assert_eq!(result.status(), OperationStatus::Success);

        let chunks = dir.path().join(encode_dir_name(name));
        let parts = list_sorted(&chunks).unwrap();
        prop_assert_eq!(parts.len(), data.len().div_ceil(buffer));

        let sizes: Vec<usize> = parts
            .iter()
            .map(|p| fs::metadata(p).unwrap().len() as usize)
            .collect();
        prop_assert!(sizes.iter().all(|&s| s > 0 && s <= buffer));
        prop_assert_eq!(sizes.iter().sum::<usize>(), data.len());

        let assembled = assemble(&chunks, &AssembleOptions::default());
        prop_assert_eq!(assembled.status(), OperationStatus::Success);
        prop_assert_eq!(fs::read(dir.path().join(name)).unwrap(), data);
    }

    #[test]
    fn printable_ascii_is_always_clean(data in prop::collection::vec(32u8..=126, 0..2048)) {
        prop_assert!(validate(&data).is_clean());
    }

    #[test]
    fn every_violation_is_a_rejected_byte(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let report = validate(&data);
        let expected: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|&(_, &b)| !(b > 31 && b < 128) && !matches!(b, b'\t' | b'\n' | b'\r'))
            .map(|(i, _)| i)
            .collect();
        let found: Vec<usize> = report.violations().iter().map(|v| v.index).collect();
        prop_assert_eq!(found, expected);
    }
}

#[test]
fn analyze_all_flags_only_the_second_of_three_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), b"all good here").unwrap();
    fs::write(dir.path().join("two.txt"), b"tab\tok, bell\x07 not").unwrap();
    fs::write(dir.path().join("zzz.txt"), b"fine too").unwrap();

    let first = analyze_all(dir.path());
    assert_eq!(first.status(), OperationStatus::Success);
    let description = first.description().unwrap();
    assert_eq!(description.matches("Error in file [").count(), 1);
    assert!(description.contains("two.txt"));
    assert!(description.contains("at index [12]"));

    let second = analyze_all(dir.path());
    assert_eq!(first.description(), second.description());
}
