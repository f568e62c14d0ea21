use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rusqlite::Connection;
use tokio::sync::oneshot;

pub mod keys;
mod kv;
mod migrations;

use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to storage thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join storage thread: {join_err:?}");
            }
        }
    }
}

enum Location {
    File(PathBuf),
    Memory,
}

/// Handle to the local key-value store.
///
/// A single worker thread owns the SQLite connection; commands run in the
/// order they were queued, so a detached write is always visible to any
/// command queued after it.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Option<Arc<PathBuf>>,
}

impl Database {
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create storage directory {}", parent.display())
            })?;
        }

        Self::spawn(Location::File(db_path))
    }

    /// Private, non-persistent store. Used by tests and ephemeral sessions.
    pub fn open_in_memory() -> Result<Self> {
        Self::spawn(Location::Memory)
    }

    fn spawn(location: Location) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let db_path = match &location {
            Location::File(path) => Some(path.clone()),
            Location::Memory => None,
        };

        let worker = thread::Builder::new()
            .name("xstep-db".into())
            .spawn(move || {
                let opened = match &location {
                    Location::File(path) => Connection::open(path),
                    Location::Memory => Connection::open_in_memory(),
                };
                let mut conn = match opened {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(
                            anyhow::Error::new(err).context("failed to open SQLite database")
                        ));
                        return;
                    }
                };

                if matches!(location, Location::File(_)) {
                    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                        error!("Failed to enable WAL mode: {err}");
                    }
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run storage migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("Storage initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => task(&mut conn),
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Storage thread shutting down");
            })
            .context("failed to spawn storage worker thread")?;

        ready_rx
            .recv()
            .context("storage worker exited before signaling readiness")??;

        match &db_path {
            Some(path) => info!("Storage initialized at {}", path.display()),
            None => info!("In-memory storage initialized"),
        }

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: db_path.map(Arc::new),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref().map(PathBuf::as_path)
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Storage caller dropped before receiving result");
            }
        }))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("storage thread terminated unexpectedly"))?
    }

    /// Queues `task` without waiting for it. Failures are logged under `what`.
    pub fn execute_detached<F>(&self, what: &'static str, task: F)
    where
        F: FnOnce(&mut Connection) -> Result<()> + Send + 'static,
    {
        let queued = self.send(Box::new(move |conn| {
            if let Err(err) = task(conn) {
                error!("Storage write '{what}' failed: {err:#}");
            }
        }));

        if let Err(err) = queued {
            error!("Storage write '{what}' dropped: {err:#}");
        }
    }

    fn send(&self, task: DbTask) -> Result<()> {
        self.inner
            .sender
            .send(DbCommand::Execute(task))
            .map_err(|err| anyhow!("failed to send command to storage thread: {err}"))
    }
}
