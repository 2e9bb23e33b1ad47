use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use feed_core::{Effect, Msg};
use feed_engine::{EngineEvent, EngineHandle, FetchSettings, PageRequest};
use feed_logging::{feed_debug, feed_info};

use super::app::AppEvent;
use super::ui::viewport::SimulatedViewport;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine };
        runner.spawn_event_loop(tx);
        Ok(runner)
    }

    pub fn apply(&self, effects: Vec<Effect>, viewport: &mut SimulatedViewport) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request,
                    query,
                    offset,
                    limit,
                } => {
                    feed_info!(
                        "FetchPage {} q={:?} offset={} limit={}",
                        request,
                        query.as_str(),
                        offset,
                        limit
                    );
                    self.engine.fetch(
                        request,
                        PageRequest {
                            query,
                            offset,
                            limit,
                        },
                    );
                }
                Effect::ScrollToTop => viewport.scroll_to_top(),
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self, tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while !engine.is_shut_down() {
                let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                    continue;
                };
                if tx.send(AppEvent::Core(to_msg(event))).is_err() {
                    break;
                }
            }
            feed_debug!("Engine event loop stopped");
        });
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { request, result } => match result {
            Ok(page) => Msg::PageLoaded { request, page },
            Err(err) => Msg::PageFailed {
                request,
                error: err.to_string(),
            },
        },
    }
}
