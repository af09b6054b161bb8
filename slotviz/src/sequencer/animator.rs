//! Real-time driver for the [`Sequencer`] running on the tokio timer.
//!
//! Every deferred step becomes a spawned task sleeping until its deadline. Issuing a new
//! operation, clearing or cancelling aborts the tasks of the superseded operation; the token
//! check in [`Sequencer::fire`] covers steps that were already past their sleep.
use super::machine::Sequencer;
use super::state::*;
use crate::hashing::HashMethod;
use std::sync::{Arc, Weak};
use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;
use tokio::time::Instant;

struct State {
    sequencer: Sequencer,
    tasks: Vec<AbortHandle>,
}

impl State {
    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

struct Inner {
    state: Mutex<State>,
    snapshots: watch::Sender<Snapshot>,
}

impl Inner {
    fn publish(&self, sequencer: &Sequencer) {
        self.snapshots.send_replace(sequencer.snapshot());
    }

    async fn fire(&self, deferred: Deferred) {
        let mut state = self.state.lock().await;
        if let Some(transition) = state.sequencer.fire(&deferred) {
            tracing::trace!(?transition, "animator transition");
            self.publish(&state.sequencer);
        }
    }
}

/// Handle to a [`Sequencer`] whose deferred steps are fired by tokio tasks.
///
/// Cloning the handle shares the same sequencer. Renderers follow changes through
/// [`Animator::subscribe`].
#[derive(Clone)]
pub struct Animator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("snapshot", &*self.inner.snapshots.borrow())
            .finish()
    }
}

impl Animator {
    pub fn new(sequencer: Sequencer) -> Self {
        tracing::info!(
            capacity = sequencer.store().capacity(),
            method = %sequencer.method(),
            "Starting animator"
        );
        let (snapshots, _) = watch::channel(sequencer.snapshot());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    sequencer,
                    tasks: Vec::new(),
                }),
                snapshots,
            }),
        }
    }

    /// Receive a snapshot every time the visible state changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.state.lock().await.sequencer.snapshot()
    }

    pub async fn set_method(&self, method: HashMethod) {
        self.update(|sequencer| sequencer.set_method(method)).await;
    }

    pub async fn set_key(&self, key: impl Into<String>) {
        let key = key.into();
        self.update(|sequencer| sequencer.set_key(key)).await;
    }

    pub async fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|sequencer| sequencer.set_value(value)).await;
    }

    pub async fn insert(&self, key: &str, value: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.insert(key, value)).await
    }

    pub async fn delete(&self, key: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.delete(key)).await
    }

    pub async fn search(&self, key: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.search(key)).await
    }

    pub async fn submit_insert(&self) -> Option<Ticket> {
        self.issue(Sequencer::submit_insert).await
    }

    pub async fn submit_delete(&self) -> Option<Ticket> {
        self.issue(Sequencer::submit_delete).await
    }

    pub async fn submit_search(&self) -> Option<Ticket> {
        self.issue(Sequencer::submit_search).await
    }

    pub async fn clear(&self) -> OpToken {
        let mut state = self.inner.state.lock().await;
        state.abort_tasks();
        let token = state.sequencer.clear();
        self.inner.publish(&state.sequencer);
        token
    }

    pub async fn cancel(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        state.abort_tasks();
        let cancelled = state.sequencer.cancel();
        if cancelled {
            self.inner.publish(&state.sequencer);
        }
        cancelled
    }

    async fn update(&self, op: impl FnOnce(&mut Sequencer)) {
        let mut state = self.inner.state.lock().await;
        op(&mut state.sequencer);
        self.inner.publish(&state.sequencer);
    }

    async fn issue(&self, op: impl FnOnce(&mut Sequencer) -> Option<Ticket>) -> Option<Ticket> {
        let mut state = self.inner.state.lock().await;
        let ticket = op(&mut state.sequencer)?;
        state.abort_tasks();

        let issued_at = Instant::now();
        for deferred in ticket.deferred.iter().copied() {
            let inner: Weak<Inner> = Arc::downgrade(&self.inner);
            let task = tokio::spawn(async move {
                tokio::time::sleep_until(issued_at + deferred.delay).await;
                if let Some(inner) = inner.upgrade() {
                    inner.fire(deferred).await;
                }
            });
            state.tasks.push(task.abort_handle());
        }

        self.inner.publish(&state.sequencer);
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PhaseTimings, VisualizerConfig};
    use crate::slots::Entry;
    use std::time::Duration;

    fn animator() -> Animator {
        slotviz_testing::enable_tracing();
        Animator::new(Sequencer::new(&VisualizerConfig::default()).unwrap())
    }

    async fn sleep_ms(millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_commits_after_800ms() {
        let animator = animator();
        animator.insert("apple", "fruit").await.unwrap();

        sleep_ms(799).await;
        let snapshot = animator.snapshot().await;
        assert_eq!(snapshot.slots[0], None);
        assert_eq!(snapshot.phase(), OperationPhase::Highlighting);

        sleep_ms(2).await;
        let snapshot = animator.snapshot().await;
        assert_eq!(snapshot.slots[0], Some(Entry::new("apple", "fruit")));
        assert_eq!(snapshot.phase(), OperationPhase::Settling);

        sleep_ms(500).await;
        assert_eq!(animator.snapshot().await.highlight, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_prevents_stale_commit() {
        let animator = animator();
        animator.insert("x", "1").await.unwrap();
        sleep_ms(300).await;
        animator.clear().await;

        sleep_ms(2000).await;
        let snapshot = animator.snapshot().await;
        assert_eq!(snapshot.occupied(), 0);
        assert_eq!(snapshot.highlight, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_operation_supersedes_older() {
        let animator = animator();
        animator.insert("apple", "fruit").await.unwrap();
        sleep_ms(100).await;
        animator.search("banana").await.unwrap();

        sleep_ms(1000).await;
        let snapshot = animator.snapshot().await;
        assert_eq!(snapshot.occupied(), 0);
        assert!(snapshot.is_highlighted(7));

        sleep_ms(501).await;
        assert_eq!(animator.snapshot().await.phase(), OperationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_each_phase() {
        let animator = animator();
        let mut snapshots = animator.subscribe();
        let _ = snapshots.borrow_and_update();

        animator.set_key("apple").await;
        animator.set_value("fruit").await;
        animator.submit_insert().await.unwrap();

        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow_and_update().phase(), OperationPhase::Highlighting);

        snapshots.changed().await.unwrap();
        let committed = snapshots.borrow_and_update().clone();
        assert_eq!(committed.phase(), OperationPhase::Settling);
        assert_eq!(committed.draft, InputDraft::default());

        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow_and_update().phase(), OperationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_animation() {
        let animator = animator();
        assert!(!animator.cancel().await);
        animator.delete("apple").await.unwrap();
        assert!(animator.cancel().await);
        sleep_ms(2000).await;
        assert_eq!(animator.snapshot().await.phase(), OperationPhase::Idle);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_zero_settle_delay_never_loses_commit() {
        slotviz_testing::enable_tracing();
        let config = VisualizerConfig {
            timings: PhaseTimings {
                commit_delay_ms: 5,
                settle_delay_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..20 {
            let animator = Animator::new(Sequencer::new(&config).unwrap());
            animator.insert("apple", "fruit").await.unwrap();
            sleep_ms(50).await;
            let snapshot = animator.snapshot().await;
            assert_eq!(snapshot.slots[0], Some(Entry::new("apple", "fruit")));
            assert_eq!(snapshot.phase(), OperationPhase::Idle);
        }
    }
}
