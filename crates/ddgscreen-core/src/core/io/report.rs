use crate::core::models::record::DdgRecord;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const REPORT_HEADER: [&str; 6] = ["run_name", "mutation", "WT_avg", "MUT_avg", "ddG", "effect"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("File I/O error for report '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error for report '{path}': {source}", path = path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Serializes records as CSV: the fixed header row, then one row per record in input order.
pub fn write_to<W: Write>(records: &[DdgRecord], writer: W) -> Result<W, csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(REPORT_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Writes the complete report to `path`.
///
/// The table goes to a temporary file in the destination directory that is renamed over `path`
/// only once every row has been flushed, so a failed write never leaves a truncated report.
pub fn write_to_path(records: &[DdgRecord], path: &Path) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    let temp = write_to(records, temp).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

pub fn read_from<R: Read>(reader: R) -> Result<Vec<DdgRecord>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader.deserialize().collect()
}

/// Reads a report back, matching columns by header name.
pub fn read_from_path(path: &Path) -> Result<Vec<DdgRecord>, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::Effect;
    use std::fs;
    use tempfile::tempdir;

    fn sample_records() -> Vec<DdgRecord> {
        vec![
            DdgRecord {
                run_name: "run_A".to_string(),
                mutation: "X10S".to_string(),
                baseline_mean: -5.1,
                mutant_mean: -6.5,
                ddg: -1.4,
                effect: Effect::Stabilizing,
            },
            DdgRecord {
                run_name: "run_C".to_string(),
                mutation: "Y20T".to_string(),
                baseline_mean: -1063.681,
                mutant_mean: -1061.25,
                ddg: 2.43,
                effect: Effect::Destabilizing,
            },
        ]
    }

    fn render(records: &[DdgRecord]) -> String {
        String::from_utf8(write_to(records, Vec::new()).unwrap()).unwrap()
    }

    #[test]
    fn write_formats_means_and_ddg_with_fixed_decimals() {
        let text = render(&sample_records());
        assert_eq!(
            text,
            "run_name,mutation,WT_avg,MUT_avg,ddG,effect\n\
             run_A,X10S,-5.100,-6.500,-1.40,Stabilizing\n\
             run_C,Y20T,-1063.681,-1061.250,2.43,Destabilizing\n"
        );
    }

    #[test]
    fn write_of_no_records_still_emits_header() {
        assert_eq!(render(&[]), "run_name,mutation,WT_avg,MUT_avg,ddG,effect\n");
    }

    #[test]
    fn rows_read_back_by_header_reproduce_records() {
        let records = sample_records();
        let text = render(&records);
        let parsed = read_from(text.as_bytes()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn read_matches_columns_by_name_not_position() {
        let text = "effect,ddG,MUT_avg,WT_avg,mutation,run_name\n\
                    Neutral,0.25,-4.750,-5.000,A1G,run_Z\n";
        let parsed = read_from(text.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].run_name, "run_Z");
        assert_eq!(parsed[0].mutation, "A1G");
        assert_eq!(parsed[0].baseline_mean, -5.0);
        assert_eq!(parsed[0].ddg, 0.25);
        assert_eq!(parsed[0].effect, Effect::Neutral);
    }

    #[test]
    fn write_to_path_replaces_existing_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all_ddg_results.csv");
        fs::write(&path, "stale content").unwrap();

        write_to_path(&sample_records(), &path).unwrap();

        let round_trip = read_from_path(&path).unwrap();
        assert_eq!(round_trip, sample_records());
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn write_to_path_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("report.csv");

        let result = write_to_path(&sample_records(), &path);
        assert!(matches!(result, Err(ReportError::Io { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_from_path(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
