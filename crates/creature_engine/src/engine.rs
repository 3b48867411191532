use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use creature_logging::{creature_error, creature_warn};
use futures_util::FutureExt;

use crate::source::{FetchSettings, PagingSource, PokeApiSource};
use crate::{EngineEvent, FailureKind, FetchError};

enum EngineCommand {
    FetchPage { page: u32, offset: u64, limit: u32 },
}

/// Runs paging-source calls on a background tokio runtime.
///
/// Commands go in through [`fetch_page`](Self::fetch_page); results come back
/// as [`EngineEvent`]s. Every accepted request yields exactly one
/// `PageFetched`, even when the source panics or the runtime is gone. Once
/// the handle is dropped, late results are dropped silently.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let source = PokeApiSource::new(settings)?;
        Ok(Self::with_source(Arc::new(source)))
    }

    pub fn with_source(source: Arc<dyn PagingSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime_event_tx = event_tx.clone();

        thread::spawn(move || {
            let event_tx = runtime_event_tx;
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    creature_error!("Failed to start fetch runtime: {}", err);
                    // Answer every request so no caller waits forever.
                    while let Ok(EngineCommand::FetchPage { page, .. }) = cmd_rx.recv() {
                        let _ = event_tx.send(failed_page(page, "fetch runtime failed to start"));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx,
        }
    }

    pub fn fetch_page(&self, page: u32, offset: u64, limit: u32) {
        if self
            .cmd_tx
            .send(EngineCommand::FetchPage {
                page,
                offset,
                limit,
            })
            .is_err()
        {
            creature_warn!("Fetch runtime is gone; page {} not requested", page);
            let _ = self
                .event_tx
                .send(failed_page(page, "fetch runtime is not running"));
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn failed_page(page: u32, message: &str) -> EngineEvent {
    EngineEvent::PageFetched {
        page,
        result: Err(FetchError::new(FailureKind::Network, message)),
    }
}

async fn handle_command(
    source: &dyn PagingSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage {
            page,
            offset,
            limit,
        } => {
            let event = match AssertUnwindSafe(source.fetch_page(offset, limit))
                .catch_unwind()
                .await
            {
                Ok(result) => EngineEvent::PageFetched { page, result },
                Err(_) => {
                    creature_error!("Paging source panicked while fetching page {}", page);
                    failed_page(page, "paging source panicked")
                }
            };
            // Receiver may be gone if the session ended while we were waiting.
            let _ = event_tx.send(event);
        }
    }
}
