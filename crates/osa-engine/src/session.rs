//! Page sessions and background refresh
//!
//! A `PageSession` represents one mounted page: it renders once on open,
//! then a background `RefreshWorker` re-renders on the configured
//! interval and publishes each result over a watch channel. Readers
//! always see the latest complete snapshot; a refresh in flight never
//! blocks a read of the previous one.
//!
//! Dropping the session signals the worker to stop, so a page that is
//! navigated away from does not keep hitting the upstream API.

use crate::engine::{Engine, RenderedPage};
use osa_domain::traits::TierEndpoint;
use osa_domain::{SessionId, TierPath};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

/// One mounted page with background refresh
pub struct PageSession {
    id: SessionId,
    path: TierPath,
    latest: watch::Receiver<RenderedPage>,
    shutdown: watch::Sender<bool>,
}

impl PageSession {
    /// Render a page and mount it with background refresh
    pub async fn open<E>(engine: &Engine<E>, raw_path: &str) -> Self
    where
        E: TierEndpoint + 'static,
    {
        let first = engine.render_page(raw_path).await;
        let path = first.path.clone();

        let (publisher, latest) = watch::channel(first);
        let (shutdown, shutdown_rx) = watch::channel(false);

        let id = SessionId::new();
        tracing::info!(session = %id, path = %path, "page session opened");

        let worker = RefreshWorker {
            engine: engine.clone(),
            raw_path: raw_path.to_string(),
            publisher,
            shutdown: shutdown_rx,
        };
        tokio::spawn(worker.run());

        Self {
            id,
            path,
            latest,
            shutdown,
        }
    }

    /// This session's identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The classified path this session renders
    pub fn path(&self) -> &TierPath {
        &self.path
    }

    /// The latest complete render (non-blocking)
    pub fn latest(&self) -> RenderedPage {
        self.latest.borrow().clone()
    }

    /// A receiver that observes every published render
    pub fn subscribe(&self) -> watch::Receiver<RenderedPage> {
        self.latest.clone()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Background refresh loop for one mounted page
///
/// Runs on the fetcher's refresh interval. Missed ticks are skipped
/// rather than bursted, so a slow refresh never overlaps itself.
pub struct RefreshWorker<E: TierEndpoint> {
    engine: Engine<E>,
    raw_path: String,
    publisher: watch::Sender<RenderedPage>,
    shutdown: watch::Receiver<bool>,
}

impl<E: TierEndpoint> RefreshWorker<E> {
    /// Run until shutdown is signalled or every receiver is dropped
    pub async fn run(mut self) {
        let period = self.engine.config().refresh_interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the open render covered it
        ticker.tick().await;

        tracing::debug!(path = %self.raw_path, interval = ?period, "refresh worker started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let page = self.engine.refresh_page(&self.raw_path).await;
                    if self.publisher.send(page).is_err() {
                        tracing::debug!(path = %self.raw_path, "all receivers dropped, stopping refresh worker");
                        break;
                    }
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        tracing::debug!(path = %self.raw_path, "shutdown signalled, stopping refresh worker");
                        break;
                    }
                }
            }
        }
    }
}
