//! Delimited report log.
//!
//! One line per call, fields joined by the configured delimiter, flushed
//! immediately. Optionally echoes each line to stdout.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::config::ReportConfig;

/// Line-oriented sink for report rows.
#[derive(Debug)]
pub struct ReportLog<W> {
    writer: Mutex<W>,
    delimiter: String,
    verbose: bool,
}

impl ReportLog<BufWriter<File>> {
    /// Open (and truncate) the configured log file.
    pub fn create(config: &ReportConfig) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(Path::new(&config.path))?;
        Ok(Self::new(BufWriter::new(file), &config.delimiter, config.verbose))
    }
}

impl<W: Write> ReportLog<W> {
    pub fn new(writer: W, delimiter: &str, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            delimiter: delimiter.to_string(),
            verbose,
        }
    }

    pub fn format_row<S: AsRef<str>>(&self, fields: &[S]) -> String {
        fields
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }

    /// Append one already formatted row.
    pub fn write_line(&self, row: &str) -> io::Result<()> {
        if self.verbose {
            println!("{}", row);
        }
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{}", row)?;
        writer.flush()
    }

    /// Format, append and return one row.
    pub fn log<S: AsRef<str>>(&self, fields: &[S]) -> io::Result<String> {
        let row = self.format_row(fields);
        self.write_line(&row)?;
        Ok(row)
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_delimited_lines() {
        let log = ReportLog::new(Vec::new(), "\t", false);
        let row = log.log(&["a", "b", "c"]).unwrap();
        assert_eq!(row, "a\tb\tc");
        log.log(&["1".to_string(), "2".to_string()]).unwrap();

        let written = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(written, "a\tb\tc\n1\t2\n");
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("http.log");
        std::fs::write(&path, "stale contents\n").unwrap();

        let config = ReportConfig {
            path: path.to_string_lossy().into_owned(),
            delimiter: ",".to_string(),
            verbose: false,
        };
        let log = ReportLog::create(&config).unwrap();
        log.log(&["x", "y"]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x,y\n");
    }
}
