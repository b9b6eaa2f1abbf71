//! # Column Inference
//!
//! Mapping spreadsheets never agree on header names ("Roll No.", "College Roll
//! Number", "Exam Roll No.", ...). Columns are picked by keyword instead of
//! position, matched case-insensitively.
//!
//! - Exam roll: first header with both `exam` and `roll`, else first with `exam`.
//! - College roll: first header with both `college` and `roll`, else first with
//!   `roll` that is not the exam roll column.
use crate::error::InferenceError;

const EXAM: &str = "exam";
const ROLL: &str = "roll";
const COLLEGE: &str = "college";

/// Index and header text of an inferred column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Which column holds college rolls and which holds exam rolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub source: Column,
    pub target: Column,
}

pub fn infer_columns<S: AsRef<str>>(headers: &[S]) -> Result<Columns, InferenceError> {
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();

    let target = find(&lowered, |_, h| h.contains(EXAM) && h.contains(ROLL))
        .or_else(|| find(&lowered, |_, h| h.contains(EXAM)))
        .ok_or(InferenceError::MissingTargetColumn)?;

    let source = find(&lowered, |index, h| {
        index != target && h.contains(COLLEGE) && h.contains(ROLL)
    })
    .or_else(|| find(&lowered, |index, h| index != target && h.contains(ROLL)))
    .ok_or(InferenceError::MissingSourceColumn)?;

    Ok(Columns {
        source: column(headers, source),
        target: column(headers, target),
    })
}

fn find(headers: &[String], matches: impl Fn(usize, &str) -> bool) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .position(|(index, h)| matches(index, h.as_str()))
}

fn column<S: AsRef<str>>(headers: &[S], index: usize) -> Column {
    Column {
        index,
        name: headers[index].as_ref().trim().to_string(),
    }
}
