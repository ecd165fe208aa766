//! Overlay alert display.
//!
//! # Responsibilities
//! - Own the overlay's current frame and animation phase
//! - Run the enter → hold → exit timeline for each alert
//! - Let the newest `present` win: it restarts the enter animation and
//!   replaces any pending exit
//!
//! # Design Decisions
//! - One task owns all display state; callers talk to it over a command
//!   channel through `DisplayHandle`
//! - Frames are published on a `watch` channel so late subscribers get the
//!   current frame immediately

use std::future::pending;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

use crate::alerts::types::{AlertError, AlertFrame, AlertRequest, AlertSource, AnimationPhase};
use crate::config::AlertsConfig;
use crate::observability::metrics;

const COMMAND_BUFFER: usize = 64;

enum DisplayCommand {
    Present {
        request: AlertRequest,
        source: AlertSource,
    },
}

/// Deadlines of the alert currently on screen.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    shown_at: Instant,
    exit_at: Instant,
    hidden_at: Instant,
}

/// The display task. Create with [`AlertDisplay::new`], then `run` it.
pub struct AlertDisplay {
    config: AlertsConfig,
    commands: mpsc::Receiver<DisplayCommand>,
    frames: watch::Sender<AlertFrame>,
    timeline: Option<Timeline>,
    seq: u64,
}

/// Cloneable entry point to a running display.
#[derive(Clone)]
pub struct DisplayHandle {
    commands: mpsc::Sender<DisplayCommand>,
    frames: watch::Receiver<AlertFrame>,
}

impl AlertDisplay {
    pub fn new(config: AlertsConfig) -> (Self, DisplayHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (frame_tx, frame_rx) = watch::channel(AlertFrame::waiting(&config.detail_text));

        let display = Self {
            config,
            commands: command_rx,
            frames: frame_tx,
            timeline: None,
            seq: 0,
        };
        let handle = DisplayHandle {
            commands: command_tx,
            frames: frame_rx,
        };
        (display, handle)
    }

    /// Process commands and timers until shutdown or every handle is dropped.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            hold_ms = self.config.hold_ms,
            enter_ms = self.config.enter_ms,
            exit_ms = self.config.exit_ms,
            "Alert display starting"
        );

        loop {
            let deadline = self.next_deadline();

            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!("Alert display received shutdown signal, exiting loop");
                    break;
                }
                command = self.commands.recv() => match command {
                    Some(DisplayCommand::Present { request, source }) => {
                        self.present(request, source);
                    }
                    None => {
                        tracing::info!("All display handles dropped, stopping alert display");
                        break;
                    }
                },
                _ = wait_until(deadline) => self.advance(Instant::now()),
            }
        }
    }

    fn present(&mut self, request: AlertRequest, source: AlertSource) {
        let now = Instant::now();
        let exit_at = now + self.config.hold();
        self.timeline = Some(Timeline {
            shown_at: now + self.config.enter(),
            exit_at,
            hidden_at: exit_at + self.config.exit(),
        });
        self.seq += 1;

        let kind = request.kind;
        let frame = AlertFrame {
            seq: self.seq,
            alert_id: Some(Uuid::new_v4()),
            phase: AnimationPhase::Entering,
            kind,
            class: kind.css_class().to_string(),
            title: kind.title().to_string(),
            icon: kind.icon().to_string(),
            message: request.render_text(&self.config.default_username),
            detail: self.config.detail_text.clone(),
        };

        tracing::info!(
            seq = self.seq,
            source = source.as_str(),
            message = %frame.message,
            "Presenting alert"
        );
        metrics::record_alert_presented(source.as_str());
        self.frames.send_replace(frame);
    }

    fn phase(&self) -> AnimationPhase {
        self.frames.borrow().phase
    }

    fn next_deadline(&self) -> Option<Instant> {
        let timeline = self.timeline?;
        match self.phase() {
            AnimationPhase::Entering => Some(timeline.shown_at),
            AnimationPhase::Showing => Some(timeline.exit_at),
            AnimationPhase::Exiting => Some(timeline.hidden_at),
            AnimationPhase::Idle | AnimationPhase::Hidden => None,
        }
    }

    /// Step through every transition whose deadline has passed.
    fn advance(&mut self, now: Instant) {
        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }
            let next = match self.phase() {
                AnimationPhase::Entering => AnimationPhase::Showing,
                AnimationPhase::Showing => AnimationPhase::Exiting,
                _ => {
                    self.timeline = None;
                    AnimationPhase::Hidden
                }
            };
            tracing::debug!(seq = self.seq, phase = ?next, "Alert phase change");
            self.frames.send_modify(|frame| frame.phase = next);
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}

impl DisplayHandle {
    /// Show an alert, interrupting whatever is on screen.
    pub async fn present(&self, request: AlertRequest, source: AlertSource) -> Result<(), AlertError> {
        self.commands
            .send(DisplayCommand::Present { request, source })
            .await
            .map_err(|_| AlertError::DisplayClosed)
    }

    /// Show the canned test alert.
    pub async fn trigger_test_alert(&self) -> Result<(), AlertError> {
        self.present(AlertRequest::test_alert(), AlertSource::Operator).await
    }

    pub fn current(&self) -> AlertFrame {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertFrame> {
        self.frames.clone()
    }

    /// True once the display task has stopped.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}
