use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
    mpsc::{Receiver, Sender, channel},
};
use std::time::Duration;

use {
    chrono::{DateTime, Local},
    tokio::{
        runtime::Handle,
        task::JoinHandle,
        time::{Instant, MissedTickBehavior},
    },
};

use crate::{
    config::{DF, POLLING},
    data::{TrackingError, TrackingSource},
    domain::{Coordinate, MapData, TrackingPoint, to_map_data},
};

use super::{FetchEvent, FetchTicket};

/// Called from fetch tasks after an event is queued (the app wires this to a repaint).
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// What the tracking view renders. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub points: Vec<TrackingPoint>,
    /// `coordinates[i]` is `points[i]` as `[lat, lon]`.
    pub coordinates: Vec<Coordinate>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_update: Option<DateTime<Local>>,
    /// Bumped whenever `points`/`coordinates` are replaced or cleared.
    pub revision: u64,
}

/// Everything a fetch task needs, cloned into each spawned task.
#[derive(Clone)]
struct FetchContext {
    source: Arc<dyn TrackingSource>,
    user_id: String,
    session: u64,
    tokens: Arc<AtomicU64>,
    tx: Sender<FetchEvent>,
    notify: Option<Notifier>,
}

impl FetchContext {
    fn issue(&self) -> FetchTicket {
        FetchTicket {
            session: self.session,
            token: self.tokens.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    fn send(&self, event: FetchEvent) {
        // Receiver gone means the poller was dropped; nothing left to update.
        if self.tx.send(event).is_ok()
            && let Some(notify) = &self.notify
        {
            notify();
        }
    }

    async fn run(self, ticket: FetchTicket) {
        let outcome = self
            .source
            .fetch_history(&self.user_id)
            .await
            .map(to_map_data);
        self.send(FetchEvent::Finished(ticket, outcome));
    }
}

/// Owns the tracking session for one user: fetches history on demand and on a timer,
/// and applies outcomes on the caller's thread in `update()`.
pub struct TrackingPoller {
    source: Arc<dyn TrackingSource>,
    runtime: Handle,
    user_id: Option<String>,
    interval: Duration,
    auto_start: bool,
    state: SessionState,

    session: u64,
    tokens: Arc<AtomicU64>,
    latest_token: u64,

    event_tx: Sender<FetchEvent>,
    event_rx: Receiver<FetchEvent>,
    timer: Option<JoinHandle<()>>,
    notify: Option<Notifier>,
}

impl TrackingPoller {
    pub fn new(source: Arc<dyn TrackingSource>, runtime: Handle) -> Self {
        let (event_tx, event_rx) = channel();
        Self {
            source,
            runtime,
            user_id: None,
            interval: POLLING.default_interval,
            auto_start: POLLING.auto_start,
            state: SessionState::default(),
            session: 0,
            tokens: Arc::new(AtomicU64::new(0)),
            latest_token: 0,
            event_tx,
            event_rx,
            timer: None,
            notify: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn with_notifier(mut self, notify: Notifier) -> Self {
        self.notify = Some(notify);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_polling(&self) -> bool {
        self.timer.is_some()
    }

    /// Bind the poller to `user_id`. Empty or absent clears the session; a new id
    /// discards the old session and (with auto-start) begins polling afresh.
    pub fn bind_user(&mut self, user_id: Option<&str>) {
        let next = user_id.filter(|id| !id.is_empty()).map(str::to_owned);
        if next == self.user_id {
            return;
        }

        if DF.log_polling {
            log::info!("POLLER: binding {:?} -> {:?}", self.user_id, next);
        }

        self.clear();
        self.user_id = next;

        if self.user_id.is_some() && self.auto_start {
            self.start_polling(self.interval);
        }
    }

    /// Issue one fetch for the bound user. Returns its token, or `None` without a user.
    pub fn refetch(&mut self) -> Option<u64> {
        let ctx = self.fetch_context()?;
        let ticket = ctx.issue();
        self.apply_started(ticket);
        self.runtime.spawn(ctx.run(ticket));
        Some(ticket.token)
    }

    /// One immediate fetch, then one per `interval` until stopped. Replaces any
    /// running timer.
    pub fn start_polling(&mut self, interval: Duration) {
        self.stop_polling();
        self.interval = interval;

        if self.refetch().is_none() {
            return;
        }
        let Some(ctx) = self.fetch_context() else {
            return;
        };

        if DF.log_polling {
            log::info!(
                "POLLER: polling '{}' every {:?}",
                ctx.user_id,
                interval
            );
        }

        self.timer = Some(self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let ticket = ctx.issue();
                ctx.send(FetchEvent::Started(ticket));
                tokio::spawn(ctx.clone().run(ticket));
            }
        }));
    }

    /// Cancel the timer. In-flight fetches still land.
    pub fn stop_polling(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            if DF.log_polling {
                log::info!("POLLER: stopped");
            }
        }
    }

    /// Stop polling and drop all session data. Outcomes of earlier fetches are ignored.
    pub fn clear(&mut self) {
        self.stop_polling();
        self.session += 1;
        self.state = SessionState {
            revision: self.state.revision + 1,
            ..SessionState::default()
        };
    }

    /// Apply every queued fetch event. Call once per frame.
    pub fn update(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                FetchEvent::Started(ticket) => self.apply_started(ticket),
                FetchEvent::Finished(ticket, outcome) => self.apply_finished(ticket, outcome),
            }
        }
    }

    fn fetch_context(&self) -> Option<FetchContext> {
        let user_id = self.user_id.clone()?;
        Some(FetchContext {
            source: Arc::clone(&self.source),
            user_id,
            session: self.session,
            tokens: Arc::clone(&self.tokens),
            tx: self.event_tx.clone(),
            notify: self.notify.clone(),
        })
    }

    fn apply_started(&mut self, ticket: FetchTicket) {
        if ticket.session != self.session || ticket.token < self.latest_token {
            return;
        }
        self.latest_token = ticket.token;
        self.state.is_loading = true;
        self.state.error = None;
    }

    fn apply_finished(&mut self, ticket: FetchTicket, outcome: Result<MapData, TrackingError>) {
        if ticket.session != self.session {
            return;
        }
        if ticket.token < self.latest_token {
            if DF.log_polling {
                log::info!(
                    "POLLER: dropped stale response #{} (latest #{})",
                    ticket.token,
                    self.latest_token
                );
            }
            return;
        }
        self.latest_token = ticket.token;
        self.state.is_loading = false;

        match outcome {
            Ok(map_data) => {
                self.state.points = map_data.points;
                self.state.coordinates = map_data.coordinates;
                self.state.error = None;
                self.state.last_update = Some(Local::now());
                self.state.revision += 1;
                if DF.log_polling {
                    log::info!(
                        "POLLER: #{} applied {} points",
                        ticket.token,
                        self.state.points.len()
                    );
                }
            }
            Err(e) => {
                log::warn!("POLLER: fetch #{} failed: {}", ticket.token, e);
                self.state.error = Some(e.to_string());
            }
        }
    }
}

impl Drop for TrackingPoller {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
