//! Worker thread for directory listings.
//!
//! The state machine never touches the filesystem. It emits a load request tagged with a
//! request id, the terminal loop forwards it here, and the result comes back through the
//! response channel to be fed in as an event.
//!
//! Requests [WorkerTask] come in via channels, and results or errors [WorkerResponse] go
//! back the same way.

use crate::core::fm::{Listing, list_dir};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::PathBuf;
use std::thread;

/// Manages the listing worker channels.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the listing thread.
    pub fn spawn() -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_io_worker(io_rx, res_tx);

        Self { io_tx, response_rx }
    }

    /// Accessor for the listing task sender.
    pub fn io_tx(&self) -> &Sender<WorkerTask> {
        &self.io_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker thread via channel.
#[derive(Debug)]
pub enum WorkerTask {
    LoadDirectory { path: PathBuf, request_id: u64 },
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug)]
pub enum WorkerResponse {
    DirectoryLoaded {
        listing: Listing,
        request_id: u64,
    },
    DirectoryFailed {
        path: PathBuf,
        message: String,
        request_id: u64,
    },
}

/// Starts the io worker thread, which listens to [WorkerTask] and sends back [WorkerResponse].
///
/// Queued requests are coalesced so that only the latest one is listed; the state machine
/// discards responses for anything but its pending request anyway.
fn start_io_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::LoadDirectory {
                mut path,
                mut request_id,
            } = task;

            while let Ok(WorkerTask::LoadDirectory {
                path: next_path,
                request_id: next_id,
            }) = task_rx.try_recv()
            {
                path = next_path;
                request_id = next_id;
            }

            let response = match list_dir(&path) {
                Ok(listing) => WorkerResponse::DirectoryLoaded {
                    listing,
                    request_id,
                },
                Err(e) => WorkerResponse::DirectoryFailed {
                    path,
                    message: e.to_string(),
                    request_id,
                },
            };
            if res_tx.send(response).is_err() {
                break;
            }
        }
    });
}

/// Worker thread integration tests.
#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, rng};
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn worker_loads_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("one.txt"))?;
        fs::create_dir(dir.path().join("two"))?;

        let workers = Workers::spawn();
        workers.io_tx().send(WorkerTask::LoadDirectory {
            path: dir.path().to_path_buf(),
            request_id: 7,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
            WorkerResponse::DirectoryLoaded {
                listing,
                request_id,
            } => {
                assert_eq!(request_id, 7);
                assert_eq!(listing.path, fs::canonicalize(dir.path())?);
                assert_eq!(listing.entries.len(), 2);
            }
            other => panic!("unexpected worker response: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn worker_reports_failure() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn();
        workers.io_tx().send(WorkerTask::LoadDirectory {
            path: PathBuf::from("/path/does/not/exist"),
            request_id: 3,
        })?;

        match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
            WorkerResponse::DirectoryFailed {
                path, request_id, ..
            } => {
                assert_eq!(request_id, 3);
                assert_eq!(path, PathBuf::from("/path/does/not/exist"));
            }
            other => panic!("unexpected worker response: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn worker_answers_last_of_a_burst() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dirs: Vec<PathBuf> = (0..4)
            .map(|i| {
                let p = dir.path().join(format!("d{i}"));
                fs::create_dir(&p).map(|_| p)
            })
            .collect::<Result<_, _>>()?;

        let workers = Workers::spawn();
        let mut rng = rng();
        let burst = 40u64;
        for id in 1..=burst {
            let path = dirs[rng.random_range(0..dirs.len())].clone();
            workers
                .io_tx()
                .send(WorkerTask::LoadDirectory { path, request_id: id })?;
        }

        // responses may be coalesced, but the final request is always answered last
        let mut last_id = 0;
        while last_id != burst {
            match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
                WorkerResponse::DirectoryLoaded { request_id, .. } => {
                    assert!(request_id > last_id, "responses out of order");
                    last_id = request_id;
                }
                other => panic!("unexpected worker response: {other:?}"),
            }
        }
        Ok(())
    }
}
