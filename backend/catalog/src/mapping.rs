//! # Mapping Sources
//!
//! One spreadsheet per semester maps college roll numbers to exam roll numbers.
//! Each file is read whole, both roll columns are inferred from the headers, and
//! every row where both cells normalize is emitted as a pair, in row order.
//! Sparse rows are expected and dropped quietly; they only show up in the
//! [`SourceReport`].
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{
    columns::infer_columns,
    error::LoadError,
    normalize::{Identifier, normalize},
    table::{Row, read_table},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub path: PathBuf,
    pub source_column: String,
    pub target_column: String,
    pub rows: usize,
    pub pairs: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct MappingSource {
    pub pairs: Vec<(Identifier, Identifier)>,
    pub report: SourceReport,
}

pub fn load_mapping_source(path: &Path) -> Result<MappingSource, LoadError> {
    let table = read_table(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let columns = infer_columns(&table.headers).map_err(|source| LoadError::Columns {
        path: path.to_path_buf(),
        headers: table.headers.clone(),
        source,
    })?;

    let cell = |row: &Row, index: usize| {
        normalize(row.get(index).and_then(|c| c.as_deref()))
    };

    let pairs: Vec<(Identifier, Identifier)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let college = cell(row, columns.source.index)?;
            let exam = cell(row, columns.target.index)?;
            Some((college, exam))
        })
        .collect();

    let report = SourceReport {
        path: path.to_path_buf(),
        source_column: columns.source.name,
        target_column: columns.target.name,
        rows: table.rows.len(),
        pairs: pairs.len(),
        skipped: table.rows.len() - pairs.len(),
    };

    debug!(
        "{} rows read from {}, {} skipped",
        report.rows,
        path.display(),
        report.skipped
    );

    Ok(MappingSource { pairs, report })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::load_mapping_source;
    use crate::error::{InferenceError, LoadError};

    #[test]
    fn test_pairs_in_row_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapping_1sem.csv");
        fs::write(
            &path,
            "Sl,Name, Roll No. ,Exam Roll No.\n\
             1,A,100,900.0\n\
             2,B,,901\n\
             3,C,102,pending\n\
             4,D,1.03e+11,903\n\
             5,E,100,904\n",
        )
        .unwrap();

        let source = load_mapping_source(&path).unwrap();
        assert_eq!(
            source.pairs,
            vec![
                ("100".to_string(), "900".to_string()),
                ("103000000000".to_string(), "903".to_string()),
                ("100".to_string(), "904".to_string()),
            ]
        );
        assert_eq!(source.report.source_column, "Roll No.");
        assert_eq!(source.report.target_column, "Exam Roll No.");
        assert_eq!(source.report.rows, 5);
        assert_eq!(source.report.pairs, 3);
        assert_eq!(source.report.skipped, 2);
    }

    #[test]
    fn test_bad_headers_name_file_and_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapping_3sem.csv");
        fs::write(&path, "Name,Marks\nA,10\n").unwrap();

        let error = load_mapping_source(&path).unwrap_err();
        match &error {
            LoadError::Columns {
                headers, source, ..
            } => {
                assert_eq!(headers, &vec!["Name".to_string(), "Marks".to_string()]);
                assert_eq!(source, &InferenceError::MissingTargetColumn);
            }
            other => panic!("unexpected error: {other}"),
        }

        let message = error.to_string();
        assert!(message.contains("mapping_3sem.csv"));
        assert!(message.contains("Marks"));
    }

    #[test]
    fn test_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapping.xlsx");
        fs::write(&path, "not a workbook").unwrap();

        assert!(matches!(
            load_mapping_source(&path),
            Err(LoadError::Unreadable { .. })
        ));
    }
}
