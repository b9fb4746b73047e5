use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use daybook_model::AppData;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::documents::write_document;
use crate::error::{Result, StorageError};
use crate::slots::AUTOSAVE_KEY;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveConfig {
    /// Quiet period after the last recorded change before the slot is written.
    pub save_delay: Duration,
    /// Upper bound on how long a continuous stream of changes can postpone a write.
    /// `None` means the write waits for a quiet period no matter how long that takes.
    pub max_delay: Option<Duration>,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            save_delay: Duration::from_secs(1),
            max_delay: None,
        }
    }
}

/// Called from the autosave task whenever a write fails.
pub type SaveErrorHook = Arc<dyn Fn(&StorageError) + Send + Sync>;

enum Command {
    Record(Box<AppData>),
    Flush(oneshot::Sender<Result<()>>),
    Shutdown(oneshot::Sender<Result<()>>),
}

/// Debounced writer for the autosave slot.
///
/// Each [`record`](Self::record) replaces the pending document and restarts the quiet
/// period, so a burst of edits produces a single write of the last document.
pub struct AutoSaveManager {
    tx: mpsc::UnboundedSender<Command>,
    save_count: Arc<AtomicUsize>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoSaveManager {
    /// Spawn the autosave task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>, config: AutoSaveConfig) -> Self {
        Self::spawn_with_hook(store, config, Arc::new(|_: &StorageError| {}))
    }

    pub fn spawn_with_hook(
        store: Arc<dyn KeyValueStore>,
        config: AutoSaveConfig,
        on_error: SaveErrorHook,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let save_count = Arc::new(AtomicUsize::new(0));
        let worker = Worker {
            store,
            config,
            on_error,
            save_count: save_count.clone(),
        };
        let task = tokio::spawn(worker.run(rx));
        Self {
            tx,
            save_count,
            task: Mutex::new(Some(task)),
        }
    }

    /// Schedule `doc` to be written once the quiet period elapses.
    pub fn record(&self, doc: AppData) -> Result<()> {
        self.tx
            .send(Command::Record(Box::new(doc)))
            .map_err(|_| StorageError::AutoSaveStopped)
    }

    /// Write the pending document now, if there is one.
    pub async fn flush(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .map_err(|_| StorageError::AutoSaveStopped)?;
        rx.await.map_err(|_| StorageError::AutoSaveStopped)?
    }

    /// Write the pending document and stop the task. Later calls report
    /// [`StorageError::AutoSaveStopped`].
    pub async fn shutdown(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Shutdown(reply))
            .map_err(|_| StorageError::AutoSaveStopped)?;
        let result = rx.await.map_err(|_| StorageError::AutoSaveStopped)?;

        let task = self.task.lock().expect("autosave task mutex poisoned").take();
        if let Some(task) = task {
            let _ = task.await;
        }
        result
    }

    /// Number of successful writes so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for AutoSaveManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoSaveManager")
            .field("save_count", &self.save_count())
            .finish_non_exhaustive()
    }
}

struct Worker {
    store: Arc<dyn KeyValueStore>,
    config: AutoSaveConfig,
    on_error: SaveErrorHook,
    save_count: Arc<AtomicUsize>,
}

struct Pending {
    doc: Box<AppData>,
    deadline: Instant,
    first_recorded: Instant,
}

impl Worker {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<Command>) {
        let mut pending: Option<Pending> = None;

        loop {
            let deadline = pending.as_ref().map(|p| p.deadline);
            let command = tokio::select! {
                command = rx.recv() => command,
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(p) = pending.take() {
                        let _ = self.persist(p.doc).await;
                    }
                    continue;
                }
            };

            match command {
                Some(Command::Record(doc)) => {
                    let now = Instant::now();
                    let first_recorded = pending.as_ref().map_or(now, |p| p.first_recorded);
                    let mut deadline = now + self.config.save_delay;
                    if let Some(max_delay) = self.config.max_delay {
                        deadline = deadline.min(first_recorded + max_delay);
                    }
                    pending = Some(Pending {
                        doc,
                        deadline,
                        first_recorded,
                    });
                }
                Some(Command::Flush(reply)) => {
                    let result = match pending.take() {
                        Some(p) => self.persist(p.doc).await,
                        None => Ok(()),
                    };
                    let _ = reply.send(result);
                }
                Some(Command::Shutdown(reply)) => {
                    let result = match pending.take() {
                        Some(p) => self.persist(p.doc).await,
                        None => Ok(()),
                    };
                    let _ = reply.send(result);
                    break;
                }
                None => {
                    // Manager dropped without shutdown.
                    if let Some(p) = pending.take() {
                        let _ = self.persist(p.doc).await;
                    }
                    break;
                }
            }
        }
        log::debug!("autosave task stopped");
    }

    /// Write `doc` to the autosave slot on the blocking pool; file-backed stores
    /// fsync on every set.
    async fn persist(&self, doc: Box<AppData>) -> Result<()> {
        let store = self.store.clone();
        let written =
            tokio::task::spawn_blocking(move || write_document(&*store, AUTOSAVE_KEY, &doc))
                .await
                .unwrap_or_else(|join_err| Err(StorageError::Io(std::io::Error::other(join_err))));

        match written {
            Ok(()) => {
                let count = self.save_count.fetch_add(1, Ordering::SeqCst) + 1;
                log::debug!("autosave written ({count} so far)");
                Ok(())
            }
            Err(err) => {
                log::error!("autosave failed: {err}");
                (self.on_error)(&err);
                Err(err)
            }
        }
    }
}
