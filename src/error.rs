use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid chunk size: {0} KB. Must leave a positive buffer after the 400 reserved bytes")]
    InvalidChunkSize(u64),

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("{} is not a directory!", .0.display())]
    NotADirectory(PathBuf),

    #[error("Directory [{}] is empty", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("{} has no parent directory to assemble into", .0.display())]
    NoParent(PathBuf),

    #[error("Output [{}] is a directory", .0.display())]
    OutputIsDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, ChunkError>;

impl From<toml::de::Error> for ChunkError {
    fn from(e: toml::de::Error) -> Self {
        ChunkError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_messages() {
        let not_dir = ChunkError::NotADirectory(PathBuf::from("/tmp/file.txt"));
        assert_eq!(not_dir.to_string(), "/tmp/file.txt is not a directory!");

        let empty = ChunkError::EmptyDirectory(PathBuf::from("/tmp/parts"));
        assert_eq!(empty.to_string(), "Directory [/tmp/parts] is empty");

        let output = ChunkError::OutputIsDirectory(PathBuf::from("/tmp/README"));
        assert_eq!(output.to_string(), "Output [/tmp/README] is a directory");
    }
}
