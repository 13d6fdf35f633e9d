//! Size-rotated append-only trace file.
//!
//! When the live file reaches the size limit it is shifted to `<file>.1`,
//! `<file>.1` to `<file>.2` and so on. The oldest backup past the retention
//! count is deleted.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the live file is rotated (5 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Numbered backups kept next to the live file.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Line-oriented file writer with numbered backups.
pub struct RotatingSink {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on first write, dropped on rotation.
    file: Mutex<Option<File>>,
}

impl RotatingSink {
    /// Creates a sink with the default limits. Nothing is opened yet.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `index`-th backup, `1` being the most recent.
    #[must_use]
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Appends one line, rotating first if the live file is full.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from rotating, opening or writing the file, or
    /// `Other` if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("sink lock poisoned: {e}")))?;

        let full = fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_bytes);
        if full {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingSink")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RotatingSink::new(dir.path().join("trace.json"));

        sink.write_line("a").unwrap();
        sink.write_line("b").unwrap();

        assert_eq!(read(sink.path()), "a\nb\n");
    }

    #[test]
    fn full_file_shifts_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RotatingSink::with_limits(dir.path().join("trace.json"), 4, 3);

        for line in ["one", "two", "three", "four", "five"] {
            sink.write_line(line).unwrap();
        }

        assert_eq!(read(sink.path()), "five\n");
        assert_eq!(read(&sink.backup_path(1)), "four\n");
        assert_eq!(read(&sink.backup_path(2)), "three\n");
        assert_eq!(read(&sink.backup_path(3)), "two\n");
        assert!(!sink.backup_path(4).exists());
    }

    #[test]
    fn backup_names_extend_the_file_name() {
        let sink = RotatingSink::new(PathBuf::from("/data/feed-otlp.json"));

        assert_eq!(sink.backup_path(2), PathBuf::from("/data/feed-otlp.json.2"));
    }
}
