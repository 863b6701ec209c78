//! File writer for the logger

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Open the configured log file, creating its directory if needed.
///
/// The returned mutex implements `MakeWriter`, so it can be handed to a
/// `fmt` layer directly.
pub(crate) fn file_writer(config: &FileConfig) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = open_log_file(&config.path, config.append)?;
    Ok(Mutex::new(file))
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("nested/logs/app.log"),
            ..Default::default()
        };

        let writer = file_writer(&config).unwrap();
        writer.lock().unwrap().write_all(b"hello\n").unwrap();

        let content = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_file_writer_truncates_without_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old contents\n").unwrap();

        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            append: false,
            ..Default::default()
        };
        let writer = file_writer(&config).unwrap();
        writer.lock().unwrap().write_all(b"new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_file_writer_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "first\n").unwrap();

        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            append: true,
            ..Default::default()
        };
        let writer = file_writer(&config).unwrap();
        writer.lock().unwrap().write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
