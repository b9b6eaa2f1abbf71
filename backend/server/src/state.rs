use std::sync::Arc;

use catalog::{IndexStats, RollIndex, SharedIndex, build_indexes};
use tokio::{sync::Mutex, task::spawn_blocking};
use tracing::info;

use super::{config::Config, counter::VisitorCounter, error::StartupError};

pub struct State {
    pub config: Config,
    pub index: SharedIndex,
    pub visitors: VisitorCounter,
    reloading: Mutex<()>,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, StartupError> {
        let index = load_index(&config).await?;
        let visitors = VisitorCounter::open(&config.counter_path).await;

        Ok(Arc::new(Self {
            config,
            index: SharedIndex::new(index),
            visitors,
            reloading: Mutex::new(()),
        }))
    }

    /// Rebuilds from the configured files and swaps the result in. The current
    /// index keeps serving until the new one is complete, and stays on failure.
    pub async fn reload(&self) -> Result<IndexStats, StartupError> {
        let _guard = self.reloading.lock().await;

        let index = load_index(&self.config).await?;
        let stats = index.stats();
        self.index.replace(index);

        info!(
            "Reloaded index: {} college -> exam, {} admit cards",
            stats.college_to_exam, stats.exam_to_file
        );

        Ok(stats)
    }
}

async fn load_index(config: &Config) -> Result<RollIndex, StartupError> {
    let mapping_files = config.mapping_files.clone();
    let manifest_path = config.manifest_path.clone();

    let index = spawn_blocking(move || build_indexes(&mapping_files, &manifest_path)).await??;

    Ok(index)
}
