use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use netscope_logging::{ns_debug, ns_info};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::{EngineEvent, FailureKind, FetchError, RequestId, ScrapeClient};

enum EngineCommand {
    Scrape { request_id: RequestId, url: String },
}

/// Sends scrape requests to the engine thread.
///
/// Dropping the handle cancels requests still in flight and lets the engine
/// thread wind down its runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    shutdown: CancellationToken,
}

/// Receiving side for engine completions.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(client: Arc<dyn ScrapeClient>) -> io::Result<(Self, EngineEvents)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("netscope-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let tracker = TaskTracker::new();

        thread::Builder::new()
            .name("netscope-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    let token = token.clone();
                    tracker.spawn_on(
                        async move {
                            handle_command(client.as_ref(), command, event_tx, token).await;
                        },
                        runtime.handle(),
                    );
                }
                // The handle is gone and its token cancelled; let every request report back.
                ns_debug!("Engine command channel closed; draining {} task(s)", tracker.len());
                tracker.close();
                runtime.block_on(tracker.wait());
            })?;

        Ok((Self { cmd_tx, shutdown }, EngineEvents { event_rx }))
    }

    /// Queues a scrape. Fails with `Cancelled` once the engine thread is gone,
    /// in which case no completion event will follow.
    pub fn scrape(&self, request_id: RequestId, url: impl Into<String>) -> Result<(), FetchError> {
        self.cmd_tx
            .send(EngineCommand::Scrape {
                request_id,
                url: url.into(),
            })
            .map_err(|_| FetchError::new(FailureKind::Cancelled, "engine stopped"))
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ScrapeClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
) {
    match command {
        EngineCommand::Scrape { request_id, url } => {
            ns_info!("Scrape start request_id={} url_len={}", request_id, url.len());
            let result = tokio::select! {
                _ = shutdown.cancelled() => {
                    Err(FetchError::new(FailureKind::Cancelled, "engine shut down"))
                }
                result = client.scrape(&url) => result,
            };
            let _ = event_tx.send(EngineEvent::ScrapeCompleted {
                request_id,
                url,
                result,
            });
        }
    }
}
