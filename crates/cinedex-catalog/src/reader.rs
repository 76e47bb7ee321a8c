//! Catalog file reader.

use cinedex_common::{CatalogConfig, Record, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Reads delimiter-separated catalog files into ordered record
/// sequences.
///
/// Each non-empty line is one record of exactly seven fields: title,
/// release date, runtime, status, popularity, vote average, vote count.
/// Source order is preserved.
pub struct CatalogReader {
    config: CatalogConfig,
}

/// Outcome of a catalog read.
#[derive(Debug)]
pub struct ReadReport {
    /// Records in source order.
    pub records: Vec<Record>,
    /// Lines dropped because they failed to parse. Only ever non-zero
    /// when the configuration sets `skip_malformed`.
    pub skipped: usize,
}

impl CatalogReader {
    /// Creates a reader for the given configuration.
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Reads every record from the configured catalog file.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        Ok(self.read_report()?.records)
    }

    /// Reads the catalog file and reports how many lines were dropped.
    ///
    /// With `skip_malformed` unset, the first bad line fails the whole
    /// read; with it set, bad lines are counted and skipped.
    pub fn read_report(&self) -> Result<ReadReport> {
        let file = File::open(&self.config.catalog_path)?;
        let mut records = Vec::new();
        let mut skipped = 0;

        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(self.config.field_delimiter).collect();
            match Record::from_fields(&fields) {
                Ok(record) => records.push(record),
                Err(_) if self.config.skip_malformed => skipped += 1,
                Err(err) => return Err(err),
            }
        }

        Ok(ReadReport { records, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_common::CinedexError;
    use std::io::Write;
    use std::path::PathBuf;

    fn catalog_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn test_read_all_preserves_source_order() {
        let file = catalog_file(&[
            "Memento\t11/10/2000\t113\tReleased\t15.45\t8.1\t4168",
            "Alien\t25/05/1979\t117\tReleased\t18.0\t8.4\t9100",
            "Solaris\t26/03/1972\t167\tReleased\t7.3\t7.9\t701",
        ]);

        let reader = CatalogReader::new(CatalogConfig::for_path(file.path()));
        let records = reader.read_all().unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Memento", "Alien", "Solaris"]);
        assert_eq!(records[0].runtime_min, 113);
        assert_eq!(records[2].vote_count, 701);
    }

    #[test]
    fn test_read_skips_empty_lines() {
        let file = catalog_file(&[
            "Memento\t11/10/2000\t113\tReleased\t15.45\t8.1\t4168",
            "",
            "Alien\t25/05/1979\t117\tReleased\t18.0\t8.4\t9100",
        ]);

        let reader = CatalogReader::new(CatalogConfig::for_path(file.path()));
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_line_fails_the_read() {
        let file = catalog_file(&[
            "Memento\t11/10/2000\t113\tReleased\t15.45\t8.1\t4168",
            "Alien\t25/05/1979",
        ]);

        let reader = CatalogReader::new(CatalogConfig::for_path(file.path()));
        assert!(matches!(
            reader.read_all(),
            Err(CinedexError::MalformedRecord {
                expected: 7,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_skip_malformed_counts_dropped_lines() {
        let file = catalog_file(&[
            "Memento\t11/10/2000\t113\tReleased\t15.45\t8.1\t4168",
            "Alien\t25/05/1979",
            "Solaris\t26/03/1972\t167\tReleased\t7.3\t7.9\t701",
            "Heat\t15/12/1995\tlong\tReleased\t17.9\t7.9\t3890",
        ]);

        let config = CatalogConfig {
            skip_malformed: true,
            ..CatalogConfig::for_path(file.path())
        };
        let report = CatalogReader::new(config).read_report().unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.records[0].title, "Memento");
        assert_eq!(report.records[1].title, "Solaris");
    }

    #[test]
    fn test_custom_delimiter() {
        let file = catalog_file(&["Memento;11/10/2000;113;Released;15.45;8.1;4168"]);

        let config = CatalogConfig {
            field_delimiter: ';',
            ..CatalogConfig::for_path(file.path())
        };
        let records = CatalogReader::new(config).read_all().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Memento");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let config = CatalogConfig::for_path(PathBuf::from("/nonexistent/catalog.tsv"));
        let reader = CatalogReader::new(config);
        assert!(matches!(reader.read_all(), Err(CinedexError::Io(_))));
    }
}
