//! Request/response boundary for an embedding worker or UI layer.
//!
//! The embedder speaks a four-message vocabulary: it submits facelet
//! strings and receives `Status` while the tables are still building,
//! `Ready` once they are usable, then one `Solution` or `Error` per
//! request. Requests sent before readiness queue behind the build; the
//! worker never crashes on an early request.

use crate::cache::Tables;
use crate::solver::{SolveOptions, solve};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::thread;
use thiserror::Error;

/// A cube to solve, as a 54-symbol facelet string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveRequest {
    pub cube: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerResponse {
    /// Tables are built; requests are being served.
    Ready,
    /// Not ready yet; `message` says what the worker is doing.
    Status { message: String },
    /// A solved request, in standard notation.
    Solution { moves: String },
    /// A failed request, with the validation or search error text.
    Error { message: String },
}

/// The worker stopped: its thread is gone and the channel disconnected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the solver worker has stopped")]
pub struct WorkerStopped;

/// Handle to a solver service thread. Dropping it disconnects the request
/// channel, which stops the thread after the request in flight.
pub struct Worker {
    requests: Sender<SolveRequest>,
    responses: Receiver<WorkerResponse>,
}

impl Worker {
    /// Start a service thread that builds the shared tables and then
    /// answers solve requests with the given options.
    #[must_use]
    pub fn spawn(options: SolveOptions) -> Worker {
        let (request_tx, request_rx) = unbounded::<SolveRequest>();
        let (response_tx, response_rx) = unbounded();
        let announce_tx = response_tx.clone();
        let spawned = thread::Builder::new()
            .name("twophase-worker".into())
            .spawn(move || serve(&options, &request_rx, &response_tx));
        if spawned.is_err() {
            let _ = announce_tx.send(WorkerResponse::Error {
                message: "could not spawn the solver worker thread".to_owned(),
            });
        }
        Worker {
            requests: request_tx,
            responses: response_rx,
        }
    }

    /// Queue a cube for solving.
    ///
    /// # Errors
    ///
    /// [`WorkerStopped`] when the service thread is gone.
    pub fn submit(&self, cube: impl Into<String>) -> Result<(), WorkerStopped> {
        self.requests
            .send(SolveRequest { cube: cube.into() })
            .map_err(|_| WorkerStopped)
    }

    /// Block for the next response.
    ///
    /// # Errors
    ///
    /// [`WorkerStopped`] when the service thread is gone and the channel
    /// is drained.
    pub fn recv(&self) -> Result<WorkerResponse, WorkerStopped> {
        self.responses.recv().map_err(|_| WorkerStopped)
    }

    /// The response channel itself, for embedders that select over
    /// multiple channels.
    #[must_use]
    pub fn responses(&self) -> &Receiver<WorkerResponse> {
        &self.responses
    }
}

fn serve(
    options: &SolveOptions,
    requests: &Receiver<SolveRequest>,
    responses: &Sender<WorkerResponse>,
) {
    let _ = responses.send(WorkerResponse::Status {
        message: "building move and pruning tables".to_owned(),
    });
    let tables = Tables::shared();
    if responses.send(WorkerResponse::Ready).is_err() {
        return;
    }
    for request in requests {
        debug!("worker solving {:?}", request.cube);
        let response = match solve(tables, &request.cube, options) {
            Ok(solution) => WorkerResponse::Solution {
                moves: solution.to_string(),
            },
            Err(error) => WorkerResponse::Error {
                message: error.to_string(),
            },
        };
        if responses.send(response).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::FaceletCube;

    #[test_log::test]
    fn ready_comes_before_the_first_solution() {
        let worker = Worker::spawn(SolveOptions::default());
        worker.submit(FaceletCube::SOLVED_STR).unwrap();
        assert_eq!(
            worker.recv().unwrap(),
            WorkerResponse::Status {
                message: "building move and pruning tables".to_owned()
            }
        );
        assert_eq!(worker.recv().unwrap(), WorkerResponse::Ready);
        assert_eq!(
            worker.recv().unwrap(),
            WorkerResponse::Solution {
                moves: String::new()
            }
        );
    }

    #[test_log::test]
    fn malformed_requests_come_back_as_errors() {
        let worker = Worker::spawn(SolveOptions::default());
        worker.submit("not a cube").unwrap();
        loop {
            match worker.recv().unwrap() {
                WorkerResponse::Error { message } => {
                    assert!(message.contains("54"));
                    break;
                }
                WorkerResponse::Status { .. } | WorkerResponse::Ready => {}
                WorkerResponse::Solution { .. } => panic!("malformed input must not solve"),
            }
        }
    }
}
