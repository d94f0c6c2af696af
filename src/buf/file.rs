//! File-backed conduit.
//!
//! The conduit interface carries only the [`EOF`] sentinel, so I/O errors and
//! zero-length transfers both fold into `EOF` here. Callers needing richer
//! diagnostics should drive the file through `std::io` themselves and hand
//! the buffer a custom conduit.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use super::conduit::{Conduit, EOF};

const PREFERRED: usize = 8 * 1024;

pub struct FileConduit {
    file: File,
}

impl FileConduit {
    /// Opens an existing file for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: File::open(path)?,
        })
    }

    /// Creates (or truncates) a file for writing.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Wraps an already-opened file.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }
}

impl Conduit for FileConduit {
    fn buffer_size(&self) -> usize {
        PREFERRED
    }

    fn is_textual(&self) -> bool {
        false
    }

    fn read(&mut self, dst: &mut [u8]) -> usize {
        match self.file.read(dst) {
            Ok(0) if !dst.is_empty() => EOF,
            Ok(count) => count,
            Err(_) => EOF,
        }
    }

    fn write(&mut self, src: &[u8]) -> usize {
        match self.file.write(src) {
            Ok(0) if !src.is_empty() => EOF,
            Ok(count) => count,
            Err(_) => EOF,
        }
    }
}
