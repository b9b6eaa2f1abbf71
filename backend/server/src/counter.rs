//! # Visitor Counter
//!
//! Single integer persisted as text. A missing or garbled file starts the count
//! at zero.
//!
//! Counting is an atomic add and never touches the disk. Each increment marks the
//! count dirty on a `watch` channel; a background task writes the latest value.
//! Writes that pile up while one is in flight collapse into a single write. A
//! failed write is logged and the in-memory count keeps going.
use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::{fs, sync::Mutex, sync::watch};
use tracing::{info, warn};

struct Store {
    path: PathBuf,
    count: AtomicU64,
    writing: Mutex<()>,
}

impl Store {
    /// Writes whatever the count is once the previous write is done.
    async fn persist(&self) {
        let _guard = self.writing.lock().await;
        let count = self.count.load(Ordering::SeqCst);

        if let Err(e) = fs::write(&self.path, count.to_string()).await {
            warn!("Failed to persist visitor count to {}: {e}", self.path.display());
        }
    }
}

pub struct VisitorCounter {
    store: Arc<Store>,
    dirty: watch::Sender<()>,
}

impl VisitorCounter {
    /// Reads the persisted count and starts the writer task. Needs a tokio runtime.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let count = match fs::read_to_string(&path).await {
            Ok(contents) => contents.trim().parse::<u64>().unwrap_or_else(|e| {
                warn!("Invalid visitor count in {}: {e}", path.display());
                0
            }),
            Err(_) => {
                info!("No visitor count at {}, starting at 0", path.display());
                0
            }
        };

        let store = Arc::new(Store {
            path,
            count: AtomicU64::new(count),
            writing: Mutex::new(()),
        });

        let (dirty, mut updates) = watch::channel(());
        let writer = store.clone();

        // Ends once the counter is dropped.
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                writer.persist().await;
            }
        });

        Self { store, dirty }
    }

    pub fn increment(&self) -> u64 {
        let count = self.store.count.fetch_add(1, Ordering::SeqCst) + 1;
        self.dirty.send_replace(());

        count
    }

    pub fn get(&self) -> u64 {
        self.store.count.load(Ordering::SeqCst)
    }

    /// Writes the current count now, after any write already in flight.
    pub async fn flush(&self) {
        self.store.persist().await;
    }
}
