//! Chunkanalyzer - split files into ordered chunk sets, reassemble them,
//! and validate plain-text content
//!
//! ## Operations
//!
//! ```text
//! split:        Upload → fixed-size reads → <root>/<name_ext>/<name.ext>.001, .002, ...
//! assemble:     <dir>/* (sorted by path) → append → <dir>/../<name.ext>
//! analyze:      Upload → byte-per-symbol scan → violation report
//! analyze_all:  <dir>/* (sorted by path) → analyze each → failures only
//! ```
//!
//! Every operation returns an [`OperationResult`] instead of an error:
//! `SUCCESS`, `ERROR`, `NO_CONTENT` (empty input) or `ANALYSIS_COMPLETE`
//! (validator ran; an absent description means the content is clean).
//!
//! Chunks hold `chunk_size_kb * 1024 - 400` bytes; the 400 bytes are
//! reserved for a future per-chunk header.
//!
//! ## Example
//!
//! ```no_run
//! use chunkanalyzer::cli::{assemble, split_kb, AssembleOptions};
//! use chunkanalyzer::Upload;
//! use std::path::Path;
//!
//! let upload = Upload::open(Path::new("input.log")).unwrap();
//! let result = split_kb(upload, Path::new("/srv/chunks"), 1024);
//! println!("{}", result);
//!
//! let result = assemble(Path::new("/srv/chunks/input_log"), &AssembleOptions::default());
//! assert!(!result.is_error());
//! ```

pub mod chunkset;
pub mod cli;
pub mod config;
pub mod error;
pub mod operation;
pub mod pipeline;
pub mod upload;

pub use config::Config;
pub use error::{ChunkError, Result};
pub use operation::{OperationResult, OperationStatus};
pub use upload::Upload;
