//! # Admit Card Lookup Documentation
//!
//! Students type their college roll number and get a link to their admit card
//! PDF on Google Drive.
//!
//! ## Crates
//! - `catalog`: reads the spreadsheets and the drive manifest, builds the index
//! - `server`: axum service over the index
//! - `process`: command line inspection of the same index
//!
//! ## Data
//!
//! ### Mapping spreadsheets
//! One per semester under `data/`, e.g. `mapping_1sem.xlsx`. Header names differ
//! between exports, so only keywords matter: a header with `exam` (ideally also
//! `roll`) holds exam rolls, a header with `college` and `roll`, or failing that
//! any other `roll` header, holds college rolls. CSV works too.
//!
//! Roll numbers saved as floats (`2301104001.0`) or in scientific notation
//! (`2.301104001e+09`) are repaired. Anything still not all digits is dropped.
//!
//! When two spreadsheets disagree on a college roll, the one later in
//! `MAPPING_FILES` wins.
//!
//! ### Drive manifest
//! `data/drive_manifest.csv` with headers `File Name`, `File ID`, `Path`.
//! Admit cards are named `<exam roll>_<anything>.pdf` or `<exam roll>.pdf`.
//! If two files share an exam roll, the first listed wins.
//!
//! ## Notes
//!
//! ### Startup
//! - No manifest, no service
//! - Missing spreadsheets are skipped with a warning
//! - A spreadsheet without recognizable roll columns stops startup, naming the
//!   file and the headers it saw
//!
//! ### Reload
//! After replacing files under `data/`:
//! ```sh
//! curl -X POST http://localhost:8000/reload
//! ```
//! Searches keep hitting the old index until the new one is fully built.
//!
//!
//!
//! # Setup
//!
//! Run the server.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
//!
//! Check a new spreadsheet before deploying.
//! ```sh
//! cargo run -p process -- -m data/mapping_7sem.xlsx stats
//! ```
//!
//! View docs.
//! ```sh
//! cargo doc --open
//! ```
