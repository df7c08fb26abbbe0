//! Conversation Session - pairs each user message with the assistant's reply
//!
//! A session owns one `ConversationLog`. Every `submit` appends exactly two
//! messages, the user's text and then the resolved response, and returns the
//! assistant message. The session knows nothing about rules; it only calls
//! the engine.
//!
//! `ConversationSession` is single-writer. `SharedSession` serializes
//! submits behind an async mutex when several callers share one
//! conversation, and remembers when it was last used.

use crate::resolver::IntentEngine;
use crate::transcript::{ConversationLog, Message, Sender};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Source of message timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct ConversationSession {
    id: Uuid,
    engine: IntentEngine,
    log: ConversationLog,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(engine: IntentEngine) -> Self {
        Self::with_clock(engine, Arc::new(SystemClock))
    }

    pub fn with_clock(engine: IntentEngine, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            id: Uuid::new_v4(),
            engine,
            log: ConversationLog::new(),
            clock,
            started_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn engine(&self) -> &IntentEngine {
        &self.engine
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Record the user's text, resolve it, record and return the reply
    pub fn submit(&mut self, text: &str) -> Message {
        let asked_at = self.clock.now();
        self.log.append(Sender::User, text, asked_at);

        let response = self.engine.resolve(text);

        let answered_at = self.clock.now();
        let reply = self
            .log
            .append(Sender::Assistant, response, answered_at)
            .clone();

        debug!(
            "Session {}: exchange #{} answered",
            self.id,
            self.log.len() / 2
        );
        reply
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("messages", &self.log.len())
            .field("started_at", &self.started_at)
            .finish()
    }
}

/// A session safe to submit to from several tasks
#[derive(Debug)]
pub struct SharedSession {
    id: Uuid,
    inner: Mutex<Slot>,
}

#[derive(Debug)]
struct Slot {
    session: ConversationSession,
    last_active: Instant,
}

impl SharedSession {
    pub fn new(session: ConversationSession) -> Self {
        Self {
            id: session.id(),
            inner: Mutex::new(Slot {
                session,
                last_active: Instant::now(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Both appends of one exchange happen under a single lock.
    /// Returns None, appending nothing, when the exchange would take the
    /// log past `max_messages`.
    pub async fn submit(&self, text: &str, max_messages: usize) -> Option<Message> {
        let mut slot = self.inner.lock().await;
        if slot.session.log().len() + 2 > max_messages {
            return None;
        }
        slot.last_active = Instant::now();
        Some(slot.session.submit(text))
    }

    /// Copy of the log as it stands
    pub async fn snapshot(&self) -> ConversationLog {
        let mut slot = self.inner.lock().await;
        slot.last_active = Instant::now();
        slot.session.log().clone()
    }

    /// Time since the last submit or snapshot
    pub async fn idle_for(&self) -> Duration {
        self.inner.lock().await.last_active.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_table::RuleTable;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Ticks one second per call
    struct StepClock(AtomicI64);

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let secs = self.0.fetch_add(1, Ordering::SeqCst);
            Utc.timestamp_opt(secs, 0).unwrap()
        }
    }

    fn trivial_engine() -> IntentEngine {
        IntentEngine::new(
            RuleTable::builder()
                .rule("ping", ["ping"], "pong")
                .fallback("?")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_submit_appends_pair() {
        let mut session = ConversationSession::new(trivial_engine());
        let reply = session.submit("ping");

        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.text, "pong");
        assert_eq!(reply.id, 2);

        let log = session.log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].sender, Sender::User);
        assert_eq!(log.messages()[0].text, "ping");
    }

    #[test]
    fn test_user_text_kept_verbatim() {
        let mut session = ConversationSession::new(trivial_engine());
        session.submit("  PING  ");
        assert_eq!(session.log().messages()[0].text, "  PING  ");
        assert_eq!(session.log().messages()[1].text, "pong");
    }

    #[test]
    fn test_timestamps_from_clock() {
        let clock = Arc::new(StepClock(AtomicI64::new(100)));
        let mut session = ConversationSession::with_clock(trivial_engine(), clock);
        assert_eq!(session.started_at().timestamp(), 100);

        let reply = session.submit("ping");
        let user = &session.log().messages()[0];
        assert_eq!(user.timestamp.timestamp(), 101);
        assert_eq!(reply.timestamp.timestamp(), 102);
    }

    #[test]
    fn test_sessions_are_independent() {
        let engine = trivial_engine();
        let mut a = ConversationSession::new(engine.clone());
        let b = ConversationSession::new(engine);
        a.submit("ping");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.log().len(), 2);
        assert!(b.log().is_empty());
    }

    fn shared_session() -> Arc<SharedSession> {
        Arc::new(SharedSession::new(ConversationSession::new(trivial_engine())))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_session_concurrent_pairs() {
        let shared = shared_session();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                tokio::spawn(async move {
                    for _ in 0..25 {
                        let text = if i % 2 == 0 { "ping" } else { "other" };
                        shared.submit(text, usize::MAX).await.unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(shared.snapshot().await.len(), 8 * 25 * 2);
        let log = shared.snapshot().await;
        for pair in log.messages().chunks(2) {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Assistant);
            let expected = if pair[0].text == "ping" { "pong" } else { "?" };
            assert_eq!(pair[1].text, expected);
            assert_eq!(pair[1].id, pair[0].id + 1);
        }
    }

    #[tokio::test]
    async fn test_shared_session_refuses_past_limit() {
        let shared = shared_session();
        assert!(shared.submit("ping", 4).await.is_some());
        assert!(shared.submit("ping", 4).await.is_some());
        assert!(shared.submit("ping", 4).await.is_none());
        assert_eq!(shared.snapshot().await.len(), 4);

        // A limit below one exchange refuses outright
        let other = shared_session();
        assert!(other.submit("ping", 1).await.is_none());
        assert_eq!(other.snapshot().await.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_resets_on_use() {
        let shared = shared_session();
        tokio::time::advance(Duration::from_secs(90)).await;
        assert!(shared.idle_for().await >= Duration::from_secs(90));

        shared.submit("ping", usize::MAX).await.unwrap();
        assert!(shared.idle_for().await < Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(30)).await;
        shared.snapshot().await;
        assert!(shared.idle_for().await < Duration::from_secs(1));
    }
}
