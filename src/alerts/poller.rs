//! Recent-tips feed poller.
//!
//! Polls the feed on a fixed interval and hands each newly seen tip to the
//! display. Feed errors are logged and the next tick polls again.

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::alerts::display::DisplayHandle;
use crate::alerts::types::{AlertError, AlertRequest, AlertSource, TipIdentity};
use crate::api::{ApiResult, TipEvent};
use crate::config::AlertsConfig;
use crate::observability::metrics;

/// Source of recent tips, newest first.
#[async_trait]
pub trait TipFeed: Send + Sync {
    async fn recent_tips(&self, limit: u32) -> ApiResult<Vec<TipEvent>>;
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Feed returned no tips.
    Empty,
    /// Latest tip was already shown.
    Unchanged,
    /// Latest tip is new and was sent to the display.
    Presented,
}

pub struct AlertPoller<F> {
    feed: F,
    display: DisplayHandle,
    config: AlertsConfig,
    last_seen: watch::Sender<Option<TipIdentity>>,
}

impl<F: TipFeed> AlertPoller<F> {
    pub fn new(feed: F, display: DisplayHandle, config: AlertsConfig) -> Self {
        let (last_seen, _) = watch::channel(None);
        Self {
            feed,
            display,
            config,
            last_seen,
        }
    }

    /// Observe the identity of the last tip handed to the display.
    pub fn last_seen(&self) -> watch::Receiver<Option<TipIdentity>> {
        self.last_seen.subscribe()
    }

    /// Poll every interval until shutdown. The first poll happens one
    /// interval after start.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let period = self.config.poll_interval();
        tracing::info!(
            interval_ms = self.config.poll_interval_ms,
            limit = self.config.feed_limit,
            "Tip feed poller starting"
        );

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!("Tip feed poller received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(_) => {}
                        Err(AlertError::DisplayClosed) => {
                            tracing::info!("Alert display stopped, exiting tip feed poller");
                            break;
                        }
                        Err(e) => {
                            metrics::record_feed_poll("error");
                            tracing::warn!(error = %e, "Error checking for tips");
                        }
                    }
                }
            }
        }
    }

    /// Fetch the newest tip once and present it if it has not been seen.
    pub async fn poll_once(&self) -> Result<PollOutcome, AlertError> {
        let tips = self
            .feed
            .recent_tips(self.config.feed_limit)
            .await
            .map_err(AlertError::FeedUnavailable)?;

        let Some(latest) = tips.first() else {
            metrics::record_feed_poll("empty");
            return Ok(PollOutcome::Empty);
        };

        let identity = TipIdentity::from(latest);
        if self.last_seen.borrow().as_ref() == Some(&identity) {
            metrics::record_feed_poll("unchanged");
            return Ok(PollOutcome::Unchanged);
        }

        tracing::info!(tip = %identity, "New tip on feed");
        self.last_seen.send_replace(Some(identity));
        metrics::record_feed_poll("new");

        let request = AlertRequest::from_tip(latest, &self.config.anonymous_name);
        self.display.present(request, AlertSource::Feed).await?;
        Ok(PollOutcome::Presented)
    }
}
