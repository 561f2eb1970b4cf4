use crate::core::Record;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

/// Uploaded tabular data on local disk. The header row names the columns.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_records(&self) -> Result<Vec<Record>> {
        let file = File::open(&self.path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Record>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<HashMap<String, String>>() {
            records.push(Record::from(row?));
        }

        tracing::debug!("Read {} records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_rows_by_header() {
        let data = "facility_code,opened\nHC01,3/4/2020\nHC02,\n";

        let records = CsvSource::from_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("facility_code"), Some("HC01"));
        assert_eq!(records[0].get_str("opened"), Some("3/4/2020"));
        assert_eq!(records[1].get_str("opened"), Some(""));
    }

    #[test]
    fn test_read_records_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"code,name\nHC01,Comfort Health Clinic\n")
            .unwrap();

        let records = CsvSource::new(temp_file.path()).read_records().unwrap();

        assert_eq!(records[0].get_str("name"), Some("Comfort Health Clinic"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvSource::new("/nonexistent/facilities.csv")
            .read_records()
            .unwrap_err();
        assert!(matches!(err, crate::utils::error::UploadError::IoError(_)));
    }
}
