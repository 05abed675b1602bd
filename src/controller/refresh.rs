//! Live refresh: named server events trigger a full re-fetch.
//!
//! A [`Subscription`] wraps a `tokio::sync::broadcast` receiver. While
//! attached, the controller keeps one listen command outstanding; when a
//! matching event arrives the collection is re-fetched and the listener is
//! re-armed. Event payloads are deliberately ignored: the fetch is the
//! source of truth, so a push and a manual refresh converge on the same
//! state.

use std::sync::Arc;

use bubbletea_rs::{Cmd, Msg};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::Model;
use crate::record::Record;

/// A named refresh event published by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshEvent {
    /// Event name, matched against the subscription's event list.
    pub name: String,
}

impl RefreshEvent {
    /// Creates an event with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Broadcast channel sender handed to the host application.
pub type EventSender = broadcast::Sender<RefreshEvent>;

/// Creates a refresh event channel with the given buffer capacity.
pub fn channel(capacity: usize) -> EventSender {
    broadcast::channel(capacity).0
}

/// A controller-side subscription to named refresh events.
///
/// The receiver lives behind an async mutex because listen commands are
/// futures that run off the update loop; only one is outstanding at a time.
#[derive(Clone)]
pub struct Subscription {
    rx: Arc<tokio::sync::Mutex<broadcast::Receiver<RefreshEvent>>>,
    events: Arc<Vec<String>>,
}

impl Subscription {
    /// Subscribes to the given event names on a channel.
    ///
    /// An empty event list matches every event.
    pub fn subscribe(channel: &EventSender, events: &[&str]) -> Self {
        Self {
            rx: Arc::new(tokio::sync::Mutex::new(channel.subscribe())),
            events: Arc::new(events.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Returns a command that resolves when the next matching event arrives.
    ///
    /// Non-matching events are skipped. A lagged receiver keeps listening;
    /// the missed events do not matter because any hit causes a full
    /// re-fetch anyway. A closed channel ends the listener silently.
    pub(super) fn listen(&self) -> Cmd {
        let rx = Arc::clone(&self.rx);
        let events = Arc::clone(&self.events);
        Box::pin(async move {
            let mut rx = rx.lock().await;
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if events.is_empty() || events.iter().any(|e| *e == event.name) {
                            return Some(Box::new(RefreshEventMsg { event }) as Msg);
                        }
                        debug!(event = %event.name, "ignoring unsubscribed refresh event");
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "refresh listener lagged, continuing");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }
}

/// Message delivered when a subscribed refresh event fires.
#[derive(Debug, Clone)]
pub struct RefreshEventMsg {
    /// The event that fired.
    pub event: RefreshEvent,
}

/// Message delivered when a collection fetch finishes.
pub struct RefreshCompletedMsg<R> {
    /// Fetch generation, used to discard stale responses.
    pub(super) generation: u64,
    /// The fetched collection, or a display-ready error message.
    pub(super) result: Result<Vec<R>, String>,
    /// The pending-count fetch result, when badge tracking is enabled.
    pub(super) pending_count: Option<Result<u64, String>>,
    /// Whether to re-arm the event listener after applying the result.
    pub(super) rearm: bool,
}

impl<R: Record> Model<R> {
    /// Starts a fetch of the collection (and pending count, when tracked).
    ///
    /// Bumps the fetch generation so that responses from earlier fetches
    /// are discarded on arrival. Returns `None` when no API is attached.
    pub(super) fn fetch_cmd(&mut self, rearm: bool) -> Option<Cmd> {
        let api = self.api.clone()?;
        self.generation += 1;
        self.loading = true;
        let generation = self.generation;
        let want_count = self.track_pending_count;
        Some(Box::pin(async move {
            let result = api.fetch_collection().await.map_err(|e| e.to_message());
            let pending_count = if want_count {
                Some(api.fetch_pending_count().await.map_err(|e| e.to_message()))
            } else {
                None
            };
            Some(Box::new(RefreshCompletedMsg {
                generation,
                result,
                pending_count,
                rearm,
            }) as Msg)
        }))
    }

    /// Re-fetches the collection from the server.
    pub fn refresh(&mut self) -> Option<Cmd> {
        self.fetch_cmd(false)
    }

    /// Starts the controller: performs the initial fetch and, when a
    /// subscription is attached, arms the event listener afterwards.
    pub fn activate(&mut self) -> Option<Cmd> {
        let rearm = self.subscription.is_some();
        self.fetch_cmd(rearm)
    }

    /// Detaches the live refresh subscription.
    ///
    /// An outstanding listener lapses: its event, if one still arrives, is
    /// ignored and the listener is not re-armed.
    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub(super) fn handle_refresh_event(&mut self) -> Option<Cmd> {
        if self.subscription.is_none() {
            // Detached after the listener was armed; drop the event and
            // do not re-arm.
            return None;
        }
        debug!("refresh event received, re-fetching collection");
        self.fetch_cmd(true)
    }

    pub(super) fn handle_refresh_completed(&mut self, msg: RefreshCompletedMsg<R>) -> Option<Cmd> {
        // The listener re-arm rides on exactly one outstanding fetch, so it
        // must survive even when that fetch has been superseded.
        let rearm = msg.rearm && self.subscription.is_some();
        if msg.generation != self.generation {
            debug!(
                stale = msg.generation,
                current = self.generation,
                "discarding stale fetch response"
            );
            if rearm {
                return self.subscription.as_ref().map(|sub| sub.listen());
            }
            return None;
        }
        self.loading = false;
        match msg.result {
            Ok(records) => {
                self.set_records(records);
                if let Some(count) = msg.pending_count {
                    match count {
                        Ok(n) => self.pending_count = Some(n),
                        Err(message) => warn!(%message, "pending count fetch failed"),
                    }
                }
            }
            Err(message) => {
                warn!(%message, "collection fetch failed");
                self.open_alert(super::modal::AlertTone::Error, message);
            }
        }
        if rearm {
            return self.subscription.as_ref().map(|sub| sub.listen());
        }
        None
    }
}
