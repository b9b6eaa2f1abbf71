//! # Roll Index
//!
//! Two tables built once at startup and read concurrently afterwards:
//! - college roll → exam roll, merged across mapping files in configured order,
//!   later files overwriting earlier ones
//! - exam roll → [`FileRecord`], first manifest row wins
//!
//! Lookups go college roll → exam roll → file, falling back to treating the
//! query as an exam roll. A rebuilt index replaces the old one whole through
//! [`SharedIndex`], so readers see either snapshot but never a mix.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::{BuildError, NotFound},
    manifest::{FileRecord, ManifestReport, load_manifest},
    mapping::{SourceReport, load_mapping_source},
    normalize::Identifier,
};

pub const VIEW_URL_PREFIX: &str = "https://drive.google.com/file/d/";
pub const DOWNLOAD_URL_PREFIX: &str = "https://drive.google.com/uc?export=download&id=";

pub fn view_url(remote_id: &str) -> String {
    format!("{VIEW_URL_PREFIX}{remote_id}/view")
}

pub fn download_url(remote_id: &str) -> String {
    format!("{DOWNLOAD_URL_PREFIX}{remote_id}")
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub college_roll: Option<String>,
    pub exam_roll: String,
    pub file_name: String,
    pub path: String,
    pub drive_view_url: String,
    pub drive_download_url: String,
}

impl ResolvedRecord {
    fn new(college_roll: Option<String>, exam_roll: String, file: &FileRecord) -> Self {
        Self {
            college_roll,
            exam_roll,
            file_name: file.file_name.clone(),
            path: file.path.clone(),
            drive_view_url: view_url(&file.remote_id),
            drive_download_url: download_url(&file.remote_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub college_to_exam: usize,
    pub exam_to_file: usize,
}

#[derive(Debug, Clone)]
pub struct RollIndex {
    college_to_exam: HashMap<Identifier, Identifier>,
    exam_to_file: HashMap<String, FileRecord>,
    pub sources: Vec<SourceReport>,
    pub missing: Vec<PathBuf>,
    pub manifest: ManifestReport,
    pub built_at: DateTime<Utc>,
}

impl RollIndex {
    pub fn new(
        college_to_exam: HashMap<Identifier, Identifier>,
        exam_to_file: HashMap<String, FileRecord>,
    ) -> Self {
        Self {
            college_to_exam,
            exam_to_file,
            sources: Vec::new(),
            missing: Vec::new(),
            manifest: ManifestReport::default(),
            built_at: Utc::now(),
        }
    }

    pub fn college_to_exam(&self) -> &HashMap<Identifier, Identifier> {
        &self.college_to_exam
    }

    pub fn exam_to_file(&self) -> &HashMap<String, FileRecord> {
        &self.exam_to_file
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            college_to_exam: self.college_to_exam.len(),
            exam_to_file: self.exam_to_file.len(),
        }
    }

    pub fn resolve(&self, raw_roll: &str) -> Result<ResolvedRecord, NotFound> {
        let roll = raw_roll.trim();

        if let Some(exam_roll) = self.college_to_exam.get(roll) {
            let file = self
                .exam_to_file
                .get(exam_roll)
                .ok_or_else(|| NotFound::AdmitCard {
                    college_roll: roll.to_string(),
                    exam_roll: exam_roll.clone(),
                })?;

            return Ok(ResolvedRecord::new(
                Some(roll.to_string()),
                exam_roll.clone(),
                file,
            ));
        }

        self.exam_to_file
            .get(roll)
            .map(|file| ResolvedRecord::new(None, roll.to_string(), file))
            .ok_or(NotFound::Roll)
    }
}

/// Loads every mapping source in order, then the manifest. Missing mapping files
/// are skipped; anything else wrong aborts the build.
pub fn build_indexes<P: AsRef<Path>>(
    mapping_paths: &[P],
    manifest_path: &Path,
) -> Result<RollIndex, BuildError> {
    let mut college_to_exam = HashMap::new();
    let mut sources = Vec::new();
    let mut missing = Vec::new();

    for path in mapping_paths {
        let path: &Path = path.as_ref();

        if !path.exists() {
            warn!("Mapping file {} not found, skipping", path.display());
            missing.push(path.to_path_buf());
            continue;
        }

        info!("Loading mapping file: {}", path.display());
        let source = load_mapping_source(path)?;

        info!(
            "{} -> using college '{}', exam '{}' ({} pairs)",
            path.display(),
            source.report.source_column,
            source.report.target_column,
            source.report.pairs
        );

        college_to_exam.extend(source.pairs);
        sources.push(source.report);
    }

    info!("Loaded {} college -> exam mappings", college_to_exam.len());

    info!("Loading manifest: {}", manifest_path.display());
    let manifest = load_manifest(manifest_path)?;

    info!(
        "Indexed {} admit cards ({} duplicates, {} incomplete rows)",
        manifest.report.indexed, manifest.report.duplicates, manifest.report.skipped_empty
    );

    Ok(RollIndex {
        college_to_exam,
        exam_to_file: manifest.files,
        sources,
        missing,
        manifest: manifest.report,
        built_at: Utc::now(),
    })
}

/// Current index snapshot, swappable as a whole.
pub struct SharedIndex {
    current: RwLock<Arc<RollIndex>>,
}

impl SharedIndex {
    pub fn new(index: RollIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    pub fn snapshot(&self) -> Arc<RollIndex> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `index` and hands back the snapshot it replaced.
    pub fn replace(&self, index: RollIndex) -> Arc<RollIndex> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        std::mem::replace(&mut *current, Arc::new(index))
    }
}
