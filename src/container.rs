//! ZIP container access.
//!
//! ODT and DOCX files are ZIP packages. This module opens the package over a
//! caller-supplied random-access source and hands out a forward-only stream for
//! a single entry; nothing is decompressed up front.

use crate::common::{Error, Result};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// A random-access source cut to its declared size.
///
/// Offsets start at 0 and `SeekFrom::End` is relative to `size`, so the archive
/// directory is looked up at the declared end of the document even when the
/// underlying source is longer.
#[derive(Debug)]
pub struct SizedSource<R> {
    inner: R,
    size: u64,
    pos: u64,
    synced: bool,
}

impl<R> SizedSource<R> {
    pub fn new(inner: R, size: u64) -> Self {
        Self { inner, size, pos: 0, synced: false }
    }

    /// Declared size of the source in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl<R: Read + Seek> Read for SizedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.size || buf.is_empty() {
            return Ok(0);
        }
        if !self.synced {
            self.inner.seek(SeekFrom::Start(self.pos))?;
            self.synced = true;
        }
        let max = (self.size - self.pos).min(buf.len() as u64) as usize;
        let n = self.inner.read(&mut buf[..max])?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Read + Seek> Seek for SizedSource<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.size.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "invalid seek to a negative or overflowing position")
        })?;
        self.pos = target;
        self.synced = false;
        Ok(target)
    }
}

/// An opened document package.
pub struct Container<R> {
    archive: ZipArchive<SizedSource<R>>,
}

impl<R: Read + Seek> Container<R> {
    /// Open the package stored in the first `total_size` bytes of `source`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidContainer`] if the bytes are not a ZIP archive.
    pub fn open(source: R, total_size: u64) -> Result<Self> {
        let archive = ZipArchive::new(SizedSource::new(source, total_size))
            .map_err(|e| Error::InvalidContainer(format!("not a ZIP archive: {}", e)))?;
        debug!(entries = archive.len(), total_size, "opened container");
        Ok(Self { archive })
    }

    /// Number of entries in the package, directories included.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the package has no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Open the entry named exactly `path` (case-sensitive) as a stream.
    ///
    /// The stream decompresses on the fly and is released when dropped.
    ///
    /// # Errors
    ///
    /// [`Error::ContentNotFound`] if there is no such entry,
    /// [`Error::InvalidContainer`] if it exists but cannot be opened.
    pub fn entry(&mut self, path: &str) -> Result<impl Read + '_> {
        match self.archive.by_name(path) {
            Ok(file) => {
                debug!(path, size = file.size(), compressed = file.compressed_size(), "located content entry");
                Ok(file)
            },
            Err(ZipError::FileNotFound) => Err(Error::ContentNotFound(path.to_string())),
            Err(e) => Err(Error::InvalidContainer(format!("cannot open {}: {}", path, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_package(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_sized_source_clamps_reads() {
        let mut source = SizedSource::new(Cursor::new(b"0123456789".to_vec()), 4);
        let mut out = Vec::new();
        source.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"0123");
        assert_eq!(source.size(), 4);
    }

    #[test]
    fn test_sized_source_seek_from_end() {
        let mut source = SizedSource::new(Cursor::new(b"0123456789".to_vec()), 6);
        assert_eq!(source.seek(SeekFrom::End(-2)).unwrap(), 4);
        let mut out = Vec::new();
        source.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"45");

        assert_eq!(source.seek(SeekFrom::Current(-3)).unwrap(), 3);
        assert!(source.seek(SeekFrom::End(-7)).is_err());
    }

    #[test]
    fn test_entry_found() {
        let data = create_package(&[("mimetype", "application/vnd.oasis.opendocument.text"), ("content.xml", "<x/>")]);
        let size = data.len() as u64;
        let mut container = Container::open(Cursor::new(data), size).unwrap();
        assert_eq!(container.len(), 2);
        assert!(!container.is_empty());

        let mut content = String::new();
        container.entry("content.xml").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "<x/>");
    }

    #[test]
    fn test_entry_name_is_exact() {
        let data = create_package(&[("Content.xml", "<x/>")]);
        let size = data.len() as u64;
        let mut container = Container::open(Cursor::new(data), size).unwrap();
        match container.entry("content.xml") {
            Err(Error::ContentNotFound(path)) => assert_eq!(path, "content.xml"),
            Err(other) => panic!("expected ContentNotFound, got {:?}", other),
            Ok(_) => panic!("expected ContentNotFound"),
        }
    }

    #[test]
    fn test_not_an_archive() {
        let data = b"This is definitely not a ZIP file".to_vec();
        let size = data.len() as u64;
        assert!(matches!(Container::open(Cursor::new(data), size), Err(Error::InvalidContainer(_))));
    }

    #[test]
    fn test_declared_size_too_small() {
        let data = create_package(&[("content.xml", "<x/>")]);
        let size = data.len() as u64 / 2;
        assert!(matches!(Container::open(Cursor::new(data), size), Err(Error::InvalidContainer(_))));
    }

    #[test]
    fn test_declared_size_excludes_trailing_bytes() {
        let mut data = create_package(&[("content.xml", "<x/>")]);
        let size = data.len() as u64;
        data.extend_from_slice(&[0u8; 512]);
        let mut container = Container::open(Cursor::new(data), size).unwrap();
        assert!(container.entry("content.xml").is_ok());
    }
}
