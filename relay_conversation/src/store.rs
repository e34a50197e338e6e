//! Per-sender conversation history.
//!
//! Each sender owns a bounded log of the most recent messages. Logs live in
//! memory only, are created on the first append and removed by `clear`.

use relay_core::{MessageOrigin, MessageRecord, SenderId};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Number of records kept per sender unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// In-memory map from sender to its bounded conversation log.
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    logs: Mutex<HashMap<SenderId, VecDeque<MessageRecord>>>,
    /// One turn lock per sender. An entry is pruned once no guard or waiter
    /// holds a clone of its mutex.
    turn_locks: Mutex<HashMap<SenderId, Arc<Mutex<()>>>>,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a store keeping at most `capacity` records per sender (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            logs: Mutex::new(HashMap::new()),
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record stamped now, evicting the oldest records beyond capacity.
    pub async fn append(&self, sender: &SenderId, text: impl Into<String>, origin: MessageOrigin) {
        let record = MessageRecord::new(text, origin);
        let mut logs = self.logs.lock().await;
        let log = logs.entry(sender.clone()).or_default();
        log.push_back(record);
        while log.len() > self.capacity {
            log.pop_front();
        }
    }

    /// Snapshot of the sender's log in insertion order; empty if none exists.
    pub async fn get(&self, sender: &SenderId) -> Vec<MessageRecord> {
        self.logs
            .lock()
            .await
            .get(sender)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove the sender's log. No-op if absent.
    pub async fn clear(&self, sender: &SenderId) {
        self.logs.lock().await.remove(sender);
    }

    pub async fn len(&self, sender: &SenderId) -> usize {
        self.logs.lock().await.get(sender).map_or(0, VecDeque::len)
    }

    pub async fn is_empty(&self, sender: &SenderId) -> bool {
        self.len(sender).await == 0
    }

    /// Number of senders with a live log.
    pub async fn sender_count(&self) -> usize {
        self.logs.lock().await.len()
    }

    /// Acquire the sender's turn lock.
    ///
    /// Holding the guard serializes whole turns for one sender while other
    /// senders proceed concurrently.
    pub async fn lock_sender(&self, sender: &SenderId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.turn_locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(sender.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of senders with a held or awaited turn lock.
    pub async fn active_turns(&self) -> usize {
        let mut locks = self.turn_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.len()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sender(id: &str) -> SenderId {
        SenderId::from(id)
    }

    #[tokio::test]
    async fn get_unknown_sender_is_empty() {
        let store = HistoryStore::new();
        assert!(store.get(&sender("nobody")).await.is_empty());
        assert_eq!(store.len(&sender("nobody")).await, 0);
        assert_eq!(store.sender_count().await, 0);
    }

    #[tokio::test]
    async fn append_keeps_insertion_order() {
        let store = HistoryStore::new();
        let a = sender("A");
        store.append(&a, "hello", MessageOrigin::User).await;
        store.append(&a, "Hello! 👋", MessageOrigin::Bot).await;

        let log = store.get(&a).await;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].text(), "hello");
        assert_eq!(log[0].origin(), MessageOrigin::User);
        assert_eq!(log[1].origin(), MessageOrigin::Bot);
        assert!(log[0].timestamp() <= log[1].timestamp());
    }

    #[tokio::test]
    async fn overflow_keeps_most_recent_fifty() {
        let store = HistoryStore::new();
        let a = sender("A");
        for i in 0..73 {
            store.append(&a, format!("message {i}"), MessageOrigin::User).await;
        }

        let log = store.get(&a).await;
        assert_eq!(log.len(), DEFAULT_CAPACITY);
        let texts: Vec<&str> = log.iter().map(MessageRecord::text).collect();
        let expected: Vec<String> = (23..73).map(|i| format!("message {i}")).collect();
        assert_eq!(texts, expected);
    }

    #[tokio::test]
    async fn logs_are_isolated_per_sender() {
        let store = HistoryStore::with_capacity(3);
        store.append(&sender("A"), "a1", MessageOrigin::User).await;
        store.append(&sender("B"), "b1", MessageOrigin::User).await;
        store.append(&sender("B"), "b2", MessageOrigin::Bot).await;

        assert_eq!(store.len(&sender("A")).await, 1);
        assert_eq!(store.len(&sender("B")).await, 2);
        assert_eq!(store.sender_count().await, 2);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = HistoryStore::new();
        let a = sender("A");
        store.append(&a, "x", MessageOrigin::User).await;

        store.clear(&a).await;
        assert!(store.get(&a).await.is_empty());
        store.clear(&a).await;
        assert!(store.get(&a).await.is_empty());
        assert_eq!(store.sender_count().await, 0);
    }

    #[tokio::test]
    async fn capacity_has_floor_of_one() {
        let store = HistoryStore::with_capacity(0);
        let a = sender("A");
        store.append(&a, "first", MessageOrigin::User).await;
        store.append(&a, "second", MessageOrigin::User).await;
        let log = store.get(&a).await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].text(), "second");
    }

    #[tokio::test]
    async fn sender_lock_serializes_same_sender() {
        let store = Arc::new(HistoryStore::new());
        let a = sender("A");

        let guard = store.lock_sender(&a).await;
        let waiter = {
            let store = Arc::clone(&store);
            let a = a.clone();
            tokio::spawn(async move {
                let _guard = store.lock_sender(&a).await;
                store.append(&a, "second", MessageOrigin::User).await;
            })
        };

        // Another sender is not blocked by A's turn.
        let _other = store.lock_sender(&sender("B")).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        store.append(&a, "first", MessageOrigin::User).await;
        drop(guard);
        waiter.await.unwrap();

        let texts: Vec<String> = store
            .get(&a)
            .await
            .iter()
            .map(|r| r.text().to_string())
            .collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[tokio::test]
    async fn released_turn_locks_are_pruned() {
        let store = HistoryStore::new();
        for i in 0..100 {
            let _guard = store.lock_sender(&sender(&format!("S{i}"))).await;
        }
        assert_eq!(store.active_turns().await, 0);

        let held = store.lock_sender(&sender("A")).await;
        let _other = store.lock_sender(&sender("B")).await;
        assert_eq!(store.active_turns().await, 2);

        drop(held);
        assert_eq!(store.active_turns().await, 1);
    }
}
