use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A named byte stream with a declared length, as handed over by the
/// upload layer
#[derive(Debug)]
pub struct Upload<R> {
    name: String,
    size: u64,
    reader: R,
}

impl<R: Read> Upload<R> {
    pub fn new(name: impl Into<String>, size: u64, reader: R) -> Self {
        Self {
            name: name.into(),
            size,
            reader,
        }
    }

    /// Logical name of the stream, usually the original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared length in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Replace the logical name, keeping the stream
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    /// Consume the stream into memory
    pub fn read_all(self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.size.min(64 * 1024 * 1024) as usize);
        let mut reader = self.reader;
        reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl Upload<BufReader<File>> {
    /// Open a file on disk, named after its final path component
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, size, BufReader::new(file)))
    }
}

impl Upload<Cursor<Vec<u8>>> {
    /// In-memory upload
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self::new(name, size, Cursor::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_reads_name_and_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"twelve bytes").unwrap();

        let upload = Upload::open(&path).unwrap();
        assert_eq!(upload.name(), "notes.txt");
        assert_eq!(upload.size(), 12);
        assert_eq!(upload.read_all().unwrap(), b"twelve bytes");
    }

    #[test]
    fn test_from_bytes() {
        let upload = Upload::from_bytes("a.bin", vec![]);
        assert!(upload.is_empty());

        let upload = Upload::from_bytes("a.bin", vec![1, 2, 3]).with_name("b.bin");
        assert_eq!(upload.name(), "b.bin");
        assert_eq!(upload.size(), 3);
    }
}
