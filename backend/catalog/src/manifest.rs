//! # Drive Manifest
//!
//! CSV listing every admit card uploaded to the drive, with exact headers
//! `File Name`, `File ID` and `Path`. Files are named after the exam roll
//! (`<exam roll>_<anything>.pdf` or `<exam roll>.pdf`), which is the key.
//!
//! The first row naming an exam roll wins. Keys are not checked for digits here;
//! a non-numeric prefix is still reachable by searching for it directly.
use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
};

use serde::Serialize;
use tracing::debug;

use crate::{error::ManifestError, table::read_csv};

pub const FILE_NAME: &str = "File Name";
pub const FILE_ID: &str = "File ID";
pub const PATH: &str = "Path";

/// One admit card known to the drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub file_name: String,
    pub remote_id: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub rows: usize,
    pub indexed: usize,
    pub skipped_empty: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct Manifest {
    pub files: HashMap<String, FileRecord>,
    pub report: ManifestReport,
}

/// Exam roll a file name refers to: text before the first `_`, else before the first `.`.
pub fn exam_roll_key(file_name: &str) -> &str {
    let separator = if file_name.contains('_') { '_' } else { '.' };

    file_name
        .split_once(separator)
        .map_or(file_name, |(key, _)| key)
}

pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::Missing(path.to_path_buf()));
    }

    let table = read_csv(path).map_err(|source| ManifestError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let column = |name: &'static str| {
        table
            .position(name)
            .ok_or_else(|| ManifestError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
                headers: table.headers.clone(),
            })
    };

    let name_column = column(FILE_NAME)?;
    let id_column = column(FILE_ID)?;
    let path_column = column(PATH)?;

    let mut files = HashMap::new();
    let mut report = ManifestReport {
        rows: table.rows.len(),
        ..Default::default()
    };

    for row in &table.rows {
        let field = |index: usize| {
            row.get(index)
                .and_then(|c| c.as_deref())
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        let file_name = field(name_column);
        let remote_id = field(id_column);

        if file_name.is_empty() || remote_id.is_empty() {
            report.skipped_empty += 1;
            continue;
        }

        match files.entry(exam_roll_key(&file_name).to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(FileRecord {
                    path: field(path_column),
                    file_name,
                    remote_id,
                });

                report.indexed += 1;
            }
            Entry::Occupied(entry) => {
                debug!("Duplicate exam roll {} in manifest, keeping first", entry.key());
                report.duplicates += 1;
            }
        }
    }

    Ok(Manifest { files, report })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::{exam_roll_key, load_manifest};
    use crate::error::ManifestError;

    fn write(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("drive_manifest.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_exam_roll_key() {
        assert_eq!(exam_roll_key("900_abc.pdf"), "900");
        assert_eq!(exam_roll_key("900_a_b.pdf"), "900");
        assert_eq!(exam_roll_key("901.pdf"), "901");
        assert_eq!(exam_roll_key("902.admit.pdf"), "902");
        assert_eq!(exam_roll_key("903"), "903");
        assert_eq!(exam_roll_key("admit_904.pdf"), "admit");
    }

    #[test]
    fn test_first_row_wins() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "File Name,File ID,Path\n\
             900_abc.pdf,XYZ,/p\n\
             900_def.pdf,UVW,/q\n\
             901.pdf , ID2 , /r \n",
        );

        let manifest = load_manifest(&path).unwrap();
        let first = &manifest.files["900"];
        assert_eq!(first.file_name, "900_abc.pdf");
        assert_eq!(first.remote_id, "XYZ");
        assert_eq!(first.path, "/p");

        let trimmed = &manifest.files["901"];
        assert_eq!(trimmed.file_name, "901.pdf");
        assert_eq!(trimmed.remote_id, "ID2");
        assert_eq!(trimmed.path, "/r");

        assert_eq!(manifest.report.rows, 3);
        assert_eq!(manifest.report.indexed, 2);
        assert_eq!(manifest.report.duplicates, 1);
    }

    #[test]
    fn test_empty_fields_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "Path,File ID,File Name,Size\n\
             /p,,900_a.pdf,1\n\
             /p,ID,,1\n\
             ,ID3,902_c.pdf,1\n",
        );

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files["902"].path, "");
        assert_eq!(manifest.report.skipped_empty, 2);
    }

    #[test]
    fn test_manifest_without_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drive_manifest");
        fs::write(&path, "File Name,File ID,Path\n900_abc.pdf,XYZ,/p\n").unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.files["900"].remote_id, "XYZ");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "file name,File ID,Path\n900.pdf,X,/p\n");

        match load_manifest(&path) {
            Err(ManifestError::MissingColumn { column, .. }) => assert_eq!(column, "File Name"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            load_manifest(&dir.path().join("absent.csv")),
            Err(ManifestError::Missing(_))
        ));
    }
}
