use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use feed_core::RequestId;
use feed_logging::{feed_debug, feed_error, feed_info, feed_warn};
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, PageFetcher, PageRequest, ReqwestPageFetcher};
use crate::{EngineEvent, FailureKind, FetchError};

enum EngineCommand {
    Fetch {
        request: RequestId,
        page: PageRequest,
    },
}

/// Runs page fetches on a background tokio runtime.
///
/// Results come back as [`EngineEvent`]s through [`EngineHandle::try_recv`]
/// or [`EngineHandle::recv_timeout`]; the handle can be shared across threads.
/// After [`EngineHandle::shutdown`] (or drop) outstanding fetches are
/// abandoned and no further events are produced.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        feed_info!("Engine fetching from {}", settings.base_url);
        let fetcher = ReqwestPageFetcher::new(settings)?;
        Ok(Self::with_fetcher(Arc::new(fetcher)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    feed_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                if token.is_cancelled() {
                    break;
                }
                let fetcher = fetcher.clone();
                let event_tx = worker_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx, token).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx: Mutex::new(event_rx),
            shutdown,
        }
    }

    pub fn fetch(&self, request: RequestId, page: PageRequest) {
        if self.shutdown.is_cancelled() {
            feed_warn!("Fetch {} requested after engine shutdown", request);
            return;
        }
        if self
            .cmd_tx
            .send(EngineCommand::Fetch { request, page })
            .is_err()
        {
            // Worker thread is gone; fail the request so the caller can retry.
            feed_error!("Engine worker unavailable for fetch {}", request);
            let _ = self.event_tx.send(EngineEvent::PageFetched {
                request,
                result: Err(FetchError::new(
                    FailureKind::Network,
                    "engine worker unavailable",
                )),
            });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(
    fetcher: &dyn PageFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
) {
    match command {
        EngineCommand::Fetch { request, page } => {
            tokio::select! {
                _ = token.cancelled() => {
                    feed_debug!("Fetch {} abandoned on shutdown", request);
                }
                result = fetcher.fetch_page(&page) => {
                    match &result {
                        Ok(fetched) => feed_debug!(
                            "Fetch {} offset={} returned {} of {}",
                            request,
                            page.offset,
                            fetched.items.len(),
                            fetched.total
                        ),
                        Err(err) => feed_warn!("Fetch {} offset={} failed: {}", request, page.offset, err),
                    }
                    if !token.is_cancelled() {
                        let _ = event_tx.send(EngineEvent::PageFetched { request, result });
                    }
                }
            }
        }
    }
}
