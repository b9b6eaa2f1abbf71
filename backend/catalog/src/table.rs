use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;

use crate::error::TableError;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];
const CSV_EXTENSION: &str = "csv";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// One cell per header; `None` marks a cell that holds no text at all.
pub type Row = Vec<Option<String>>;

/// Header row plus data rows of one tabular file, all cells as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn position(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Reads a spreadsheet or CSV file, chosen by extension. Headers come back trimmed.
pub fn read_table(path: &Path) -> Result<Table, TableError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == CSV_EXTENSION {
        read_csv(path)
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet(path)
    } else {
        Err(TableError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Reads a comma-separated file whatever its extension. Headers come back trimmed.
pub fn read_csv(path: &Path) -> Result<Table, TableError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
    if headers.is_empty() {
        return Err(TableError::NoHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        rows.push(
            (0..headers.len())
                .map(|i| record.get(i).map(str::to_string))
                .collect(),
        );
    }

    Ok(Table { headers, rows })
}

fn read_spreadsheet(path: &Path) -> Result<Table, TableError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TableError::NoWorksheet)??;

    let mut cells = range.rows();
    let headers: Vec<String> = cells
        .next()
        .ok_or(TableError::NoHeader)?
        .iter()
        .map(|cell| clean_header(&cell_text(cell).unwrap_or_default()))
        .collect();

    let rows = cells
        .map(|row| {
            (0..headers.len())
                .map(|i| row.get(i).and_then(cell_text))
                .collect()
        })
        .collect();

    Ok(Table { headers, rows })
}

fn clean_header(header: &str) -> String {
    header.trim_matches(BYTE_ORDER_MARK).trim().to_string()
}

/// Text form of a spreadsheet cell. Floats render positionally, never in exponent form.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use calamine::Data;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    use super::{cell_text, read_csv, read_table};
    use crate::error::TableError;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_csv_headers_trimmed_and_rows_padded() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "m.CSV", "\u{feff} Roll No. ,Exam Roll\n1,2\n3\n");

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Roll No.", "Exam Roll"]);
        assert_eq!(
            table.rows,
            vec![
                vec![Some("1".to_string()), Some("2".to_string())],
                vec![Some("3".to_string()), None],
            ]
        );
        assert_eq!(table.position("Exam Roll"), Some(1));
    }

    #[test]
    fn test_workbook_first_sheet_and_padding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapping_1sem.xlsx");

        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, " College Roll No. ").unwrap();
        first.write_string(0, 1, "Exam Roll No.").unwrap();
        first.write_string(0, 2, "Name").unwrap();
        first.write_number(1, 0, 123456789012.0).unwrap();
        first.write_string(1, 1, "2.301104001E+09").unwrap();
        first.write_string(1, 2, "A").unwrap();
        first.write_number(2, 0, 7.0).unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "Ignored").unwrap();
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["College Roll No.", "Exam Roll No.", "Name"]);
        assert_eq!(
            table.rows,
            vec![
                vec![
                    Some("123456789012".to_string()),
                    Some("2.301104001E+09".to_string()),
                    Some("A".to_string()),
                ],
                vec![Some("7".to_string()), None, None],
            ]
        );
    }

    #[test]
    fn test_csv_without_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "drive_manifest", " File Name ,File ID\n900.pdf,X\n");

        let table = read_csv(&path).unwrap();
        assert_eq!(table.headers, vec!["File Name", "File ID"]);
        assert_eq!(table.rows.len(), 1);
        assert!(matches!(
            read_table(&path),
            Err(TableError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "m.txt", "a,b\n");

        assert!(matches!(
            read_table(&path),
            Err(TableError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_table(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Int(42)).as_deref(), Some("42"));
        assert_eq!(cell_text(&Data::Float(123.0)).as_deref(), Some("123"));
        assert_eq!(
            cell_text(&Data::Float(1.23e11)).as_deref(),
            Some("123000000000")
        );
        assert_eq!(
            cell_text(&Data::String(" 7 ".to_string())).as_deref(),
            Some(" 7 ")
        );
    }
}
