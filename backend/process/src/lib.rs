//! # Offline Inspection
//!
//! Builds the same index the server builds, from the same files, without
//! starting the server. Useful before a deploy to check that a new semester's
//! spreadsheet is picked up with the right columns and that rolls resolve.
//!
//! ```sh
//! process -m data/mapping_1sem.xlsx -m data/mapping_3sem.xlsx stats
//! process -m data/mapping_1sem.xlsx resolve 2301104001
//! ```
use catalog::RollIndex;
use serde_json::{Value, json};

/// Per-file and per-table counts of a built index.
pub fn summarize(index: &RollIndex) -> Value {
    let stats = index.stats();

    json!({
        "college_to_exam": stats.college_to_exam,
        "exam_to_file": stats.exam_to_file,
        "sources": index.sources,
        "missing": index.missing,
        "manifest": index.manifest,
        "built_at": index.built_at,
    })
}

/// Search result in the shape the server returns it, or the not-found reason.
pub fn lookup(index: &RollIndex, roll_no: &str) -> Value {
    match index.resolve(roll_no) {
        Ok(record) => json!(record),
        Err(e) => json!({ "detail": e.to_string() }),
    }
}
