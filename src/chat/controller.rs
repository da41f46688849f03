//! Conversation controller: authoritative, ordered log for one chat
//! session.
//!
//! The controller owns the in-memory message log and mediates every state
//! transition around sending a message: optimistic append, single-flight
//! gating, rollback on gateway failure and best-effort persistence.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::ChatError;
use super::gateway::ChatGateway;
use super::store::HistoryStore;
use super::types::{HistoryTurn, MAX_MESSAGE_CHARS, Message, Role};

/// Controller for a single chat conversation.
///
/// State machine per conversation: `Idle -> Sending -> Idle`. A successful
/// send advances the log by exactly one full turn (user then bot); a failed
/// send leaves it unchanged. Sends issued while another is in flight are
/// rejected, never queued.
pub struct ConversationController {
    gateway: Arc<dyn ChatGateway>,
    store: Arc<dyn HistoryStore>,
    log: Mutex<Vec<Message>>,
    next_id: AtomicU64,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the send resolves, on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ConversationController {
    /// Create a controller with an empty log.
    #[must_use]
    pub fn new(gateway: Arc<dyn ChatGateway>, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            gateway,
            store,
            log: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Load the stored conversation into the in-memory log.
    ///
    /// On storage failure the controller degrades to an empty log: history
    /// loss is non-fatal and never surfaced to the caller.
    pub async fn load_session(&self) {
        match self.store.get().await {
            Ok(stored) => {
                let next = stored.iter().map(|m| m.id).max().map_or(1, |id| id + 1);
                self.next_id.store(next, Ordering::Release);
                *self.lock_log() = stored;
            }
            Err(err) => {
                tracing::warn!("failed to load chat history, starting empty: {err}");
                self.lock_log().clear();
            }
        }
    }

    /// Send a user message and return the bot reply message.
    ///
    /// The user message is appended optimistically and visible through
    /// [`messages`](Self::messages) while the call is in flight. On success
    /// the bot reply is appended and the full log persisted (best-effort);
    /// on failure the log is rolled back to its pre-send value.
    ///
    /// # Errors
    /// - [`ChatError::EmptyMessage`] if `text` trims to nothing.
    /// - [`ChatError::MessageTooLong`] past the input bound.
    /// - [`ChatError::SendInFlight`] while a previous send is unresolved.
    /// - [`ChatError::Gateway`] when the remote call fails; the log is
    ///   unchanged and the caller may simply retry.
    pub async fn send_user_message(&self, text: &str) -> Result<Message, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ChatError::MessageTooLong);
        }

        // Single-flight: claim the conversation or reject.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ChatError::SendInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let user = self.next_message(Role::User, text.to_string());
        let snapshot = {
            let mut log = self.lock_log();
            let snapshot = log.clone();
            log.push(user);
            snapshot
        };

        // History payload: everything before the new message, in order.
        let history: Vec<HistoryTurn> = snapshot.iter().map(HistoryTurn::from).collect();

        match self.gateway.send(text.to_string(), history).await {
            Ok(reply) => {
                let bot = self.next_message(Role::Bot, reply);
                let persisted = {
                    let mut log = self.lock_log();
                    log.push(bot.clone());
                    log.clone()
                };
                if let Err(err) = self.store.set(persisted).await {
                    tracing::warn!("failed to persist chat history: {err}");
                }
                Ok(bot)
            }
            Err(err) => {
                // Roll back wholesale: drop the optimistic user message.
                *self.lock_log() = snapshot;
                Err(err)
            }
        }
    }

    /// Empty the conversation, in memory and in storage.
    ///
    /// Idempotent and infallible from the caller's perspective; a storage
    /// failure is logged only.
    pub async fn clear_session(&self) {
        self.lock_log().clear();
        self.next_id.store(1, Ordering::Release);
        if let Err(err) = self.store.clear().await {
            tracing::warn!("failed to clear stored chat history: {err}");
        }
    }

    /// Snapshot of the current log.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.lock_log().clone()
    }

    /// Whether a send is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn next_message(&self, role: Role, text: String) -> Message {
        let id = self.next_id.fetch_add(1, Ordering::AcqRel);
        Message::new(id, role, text)
    }

    fn lock_log(&self) -> MutexGuard<'_, Vec<Message>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
