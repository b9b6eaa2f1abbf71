//! # Admit Card Catalog
//!
//! Resolves a student's roll number to their admit card on the drive.
//!
//! ## Inputs
//! - Mapping spreadsheets, one per semester: college roll → exam roll. Header
//!   names vary per export, so columns are inferred ([`columns`]).
//! - Drive manifest CSV: one row per uploaded admit card, keyed by the exam roll
//!   at the front of the file name ([`manifest`]).
//!
//! ## Pipeline
//! 1. Every cell is normalized into a digit-only identifier or dropped ([`normalize`]).
//! 2. Mapping files load in configured order, later files overwriting earlier
//!    ones; missing files are skipped ([`mapping`]).
//! 3. The manifest loads with first-row-wins; it is required.
//! 4. Both tables go into an immutable [`RollIndex`], served through
//!    [`SharedIndex`] so a reload can swap it whole.
//!
//! ## Lookup
//! College roll first, then exam roll. See [`RollIndex::resolve`].

pub mod columns;
pub mod error;
pub mod index;
pub mod manifest;
pub mod mapping;
pub mod normalize;
pub mod table;

pub use error::{BuildError, InferenceError, LoadError, ManifestError, NotFound, TableError};
pub use index::{IndexStats, ResolvedRecord, RollIndex, SharedIndex, build_indexes};
pub use manifest::{FileRecord, ManifestReport};
pub use mapping::SourceReport;
pub use normalize::{Identifier, normalize};
