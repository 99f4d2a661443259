//! Single-writer actor for ledger mutations.
//!
//! One background task owns one SQLite connection and executes every
//! mutating job inside an immediate transaction, one job at a time. The
//! handle is created once at bootstrap and cloned everywhere a repository
//! needs to write, so the whole process shares a single serialization point
//! for the ledger: no lost updates, no partial transfers, regardless of how
//! many connections are issuing mutations concurrently.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use tellerd_core::errors::{Error, Result};

// A job takes the writer's connection and runs queries inside the
// transaction the actor opens for it.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Boxed closures with type-erased return values; each job carries a
    // oneshot sender for its reply.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction: if it returns an error
    /// the transaction rolls back and nothing the job wrote survives.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns the background task that acts as the single writer to the
/// database. The actor holds one pooled connection for its whole lifetime
/// and processes write jobs strictly serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            // The wrapper error keeps the job's typed core::Error intact
            // through the rollback path; only BEGIN/COMMIT failures surface
            // as storage errors.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, WriteError, _>(|c| {
                    job(c).map_err(WriteError::Core)
                })
                .map_err(|e| match e {
                    WriteError::Core(e) => e,
                    WriteError::Storage(e) => e.into(),
                });

            // The requester may have gone away (peer disconnect); the commit
            // above already happened either way.
            let _ = reply_tx.send(result);
        }
        // Channel closed: all handles dropped, the actor terminates.
    });

    WriteHandle { tx }
}

// Error type for the transaction wrapper. `immediate_transaction` demands
// From<diesel::result::Error> for commit/rollback failures; job errors ride
// along untouched so callers still see typed domain errors.
enum WriteError {
    Core(Error),
    Storage(StorageError),
}

impl From<diesel::result::Error> for WriteError {
    fn from(err: diesel::result::Error) -> Self {
        WriteError::Storage(StorageError::QueryFailed(err))
    }
}
