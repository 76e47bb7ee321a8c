//! Catalog loading for Cinedex.
//!
//! Reads tab-separated movie catalogs and bulk-builds the ordered
//! title index from them.

mod reader;

pub use reader::{CatalogReader, ReadReport};

use cinedex_common::{CatalogConfig, Result};
use cinedex_index::CatalogIndex;

/// Reads the configured catalog file and bulk-builds a title index
/// from its records.
pub fn build_index(config: &CatalogConfig) -> Result<CatalogIndex> {
    let reader = CatalogReader::new(config.clone());
    let records = reader.read_all()?;
    CatalogIndex::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_index_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Memento\t11/10/2000\t113\tReleased\t15.45\t8.1\t4168").unwrap();
        writeln!(file, "Alien\t25/05/1979\t117\tReleased\t18.0\t8.4\t9100").unwrap();
        writeln!(file, "Solaris\t26/03/1972\t167\tReleased\t7.3\t7.9\t701").unwrap();

        let config = CatalogConfig::for_path(file.path());
        let index = build_index(&config).unwrap();

        assert_eq!(index.len(), 3);
        // The bulk build seeds the root from the last catalog line.
        assert_eq!(index.root_record().unwrap().title, "Solaris");
        let titles: Vec<&str> = index.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Alien", "Memento", "Solaris"]);
        assert!(index.validate().is_empty());
    }

    #[test]
    fn test_build_index_from_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = CatalogConfig::for_path(file.path());
        assert!(matches!(
            build_index(&config),
            Err(cinedex_common::CinedexError::EmptyCatalog)
        ));
    }
}
