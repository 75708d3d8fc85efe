//! Isolated algorithm worker
//!
//! A job receives a serialized full snapshot of the graph, decodes it into a
//! private [`Graph`] and runs the requested calculator on Tokio's blocking
//! pool. Nothing is shared with the caller's graph; the only way back is a
//! single tagged response:
//!
//! ```json
//! {"type": "result", "result": {...}}
//! {"type": "error", "message": "..."}
//! ```

use super::{Algorithm, AlgorithmRequest, AlgorithmResolver, AlgorithmResult, CancellationFlag};
use crate::config::WorkerConfig;
use crate::error::GraphResult;
use crate::graph::{Graph, GraphFullJson};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Inbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub request: AlgorithmRequest,
    pub graph: GraphFullJson,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse {
    Result { result: AlgorithmResult },
    Error { message: String },
}

impl WorkerResponse {
    pub fn into_result(self) -> Result<AlgorithmResult, String> {
        match self {
            WorkerResponse::Result { result } => Ok(result),
            WorkerResponse::Error { message } => Err(message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WorkerResponse::Error { .. })
    }
}

impl From<GraphResult<AlgorithmResult>> for WorkerResponse {
    fn from(outcome: GraphResult<AlgorithmResult>) -> Self {
        match outcome {
            Ok(result) => WorkerResponse::Result { result },
            Err(e) => WorkerResponse::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Decode, rebuild and compute; every failure becomes an error response
pub fn handle_message(message: &str, cancel: &CancellationFlag) -> WorkerResponse {
    run_message(message, cancel).into()
}

fn run_message(message: &str, cancel: &CancellationFlag) -> GraphResult<AlgorithmResult> {
    let value: serde_json::Value = serde_json::from_str(message)?;

    // name the bad discriminator instead of a generic serde error
    if let Some(name) = value
        .get("request")
        .and_then(|r| r.get("algorithm"))
        .and_then(|a| a.as_str())
    {
        name.parse::<Algorithm>()?;
    }

    let request: WorkerRequest = serde_json::from_value(value)?;
    let graph = Graph::from_full_json(request.graph)?;
    debug!(
        "Running {} on snapshot with {} nodes and {} edges",
        request.request.algorithm(),
        graph.node_count(),
        graph.edge_count()
    );
    AlgorithmResolver::run(&request.request, &graph, cancel)
}

/// Submits algorithm jobs to the blocking pool
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmWorker {
    config: WorkerConfig,
}

impl AlgorithmWorker {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// Snapshot `graph` and start computing `request` against the copy
    pub fn submit(&self, request: AlgorithmRequest, graph: &Graph) -> GraphResult<AlgorithmJob> {
        let algorithm = request.algorithm();
        let message = serde_json::to_string(&WorkerRequest {
            request,
            graph: graph.to_full_json(),
        })?;
        info!("Submitting {} job ({} bytes)", algorithm, message.len());
        Ok(self.submit_message(message))
    }

    /// Start a job from an already serialized [`WorkerRequest`]
    pub fn submit_message(&self, message: String) -> AlgorithmJob {
        let cancel = CancellationFlag::new();
        let (sender, receiver) = oneshot::channel();

        let flag = cancel.clone();
        let task = tokio::task::spawn_blocking(move || {
            let response = handle_message(&message, &flag);
            // the job handle may have been dropped
            let _ = sender.send(response);
        });

        let watchdog = self.config.timeout_ms.map(|ms| {
            let flag = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                warn!("Algorithm job exceeded {}ms, cancelling", ms);
                flag.cancel();
            })
        });

        AlgorithmJob {
            cancel,
            receiver,
            task,
            watchdog,
        }
    }
}

/// Handle to a running job
pub struct AlgorithmJob {
    cancel: CancellationFlag,
    receiver: oneshot::Receiver<WorkerResponse>,
    task: JoinHandle<()>,
    watchdog: Option<JoinHandle<()>>,
}

impl AlgorithmJob {
    /// Ask the calculator to stop; the response becomes a `Cancelled` error
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Wait for the single response of this job
    pub async fn response(mut self) -> WorkerResponse {
        let response = match (&mut self.receiver).await {
            Ok(response) => response,
            Err(_) => {
                let message = match (&mut self.task).await {
                    Err(e) if e.is_panic() => "algorithm worker panicked".to_string(),
                    Err(e) => format!("algorithm worker aborted: {}", e),
                    Ok(()) => "algorithm worker exited without a response".to_string(),
                };
                warn!("{}", message);
                WorkerResponse::Error { message }
            }
        };
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.abort();
        }
        match &response {
            WorkerResponse::Result { .. } => debug!("Algorithm job finished"),
            WorkerResponse::Error { message } => debug!("Algorithm job failed: {}", message),
        }
        response
    }
}

/// An abandoned job stops its computation at the next step
impl Drop for AlgorithmJob {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.abort();
        }
    }
}
