use super::state::*;
use crate::config::{PhaseTimings, VisualizerConfig};
use crate::hashing::{locate, HashMethod};
use crate::slots::{Entry, SlotStore};
use slotviz_core::{SlotVizError, SlotVizResult};
use std::num::NonZeroUsize;
use std::time::Duration;

/// The operation whose highlight is current.
#[derive(Debug, Clone)]
struct ActiveOp {
    token: OpToken,
    index: usize,
    kind: OperationKind,
    phase: OperationPhase,
    /// Entry written on commit. Only set for inserts.
    payload: Option<Entry>,
}

/// State machine sequencing the visual phases of table operations.
///
/// The sequencer never waits by itself. Every accepted operation returns a [`Ticket`] listing
/// [`Deferred`] steps; a driver (see [`super::Timeline`] and `Animator`) calls
/// [`Sequencer::fire`] for each of them once its delay has elapsed. Each operation, `clear()`
/// and `cancel()` supersedes whatever was issued before, so late steps of older operations are
/// ignored.
#[derive(Debug, Clone)]
pub struct Sequencer {
    store: SlotStore,
    capacity: NonZeroUsize,
    method: HashMethod,
    timings: PhaseTimings,
    draft: InputDraft,
    current: OpToken,
    active: Option<ActiveOp>,
}

impl Sequencer {
    /// Create a sequencer over an empty table.
    ///
    /// # Errors
    ///
    /// - [`SlotVizError::InvalidCapacity`] if the configured capacity is zero.
    pub fn new(config: &VisualizerConfig) -> SlotVizResult<Self> {
        let capacity = NonZeroUsize::new(config.capacity).ok_or(SlotVizError::InvalidCapacity)?;
        Ok(Self {
            store: SlotStore::with_capacity(capacity),
            capacity,
            method: config.method,
            timings: config.timings,
            draft: InputDraft::default(),
            current: OpToken::default(),
            active: None,
        })
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn method(&self) -> HashMethod {
        self.method
    }

    pub fn timings(&self) -> &PhaseTimings {
        &self.timings
    }

    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    /// Token of the latest invocation.
    pub fn current_token(&self) -> OpToken {
        self.current
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.active.as_ref().map(|active| Highlight {
            index: active.index,
            kind: active.kind,
            phase: active.phase,
        })
    }

    pub fn phase(&self) -> OperationPhase {
        self.highlight()
            .map_or(OperationPhase::Idle, |highlight| highlight.phase)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            slots: self.store.as_slice().to_vec(),
            highlight: self.highlight(),
            method: self.method,
            draft: self.draft.clone(),
        }
    }

    /// Index `key` would land on under the current method.
    pub fn index_of(&self, key: &str) -> usize {
        locate(key, self.capacity, &self.method)
    }

    /// Select the method used by operations issued from now on. Stored slots stay where they
    /// are.
    pub fn set_method(&mut self, method: HashMethod) {
        if self.method != method {
            tracing::debug!(from = %self.method, to = %method, "hash method changed");
            self.method = method;
        }
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.draft.key = key.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.draft.value = value.into();
    }

    /// Highlight the slot of `key` and write `(key, value)` there at the commit instant.
    ///
    /// Does nothing and returns `None` if either `key` or `value` is empty.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<Ticket> {
        if key.is_empty() || value.is_empty() {
            tracing::trace!("insert ignored: empty key or value");
            return None;
        }
        let commit = self.timings.commit_delay();
        let settle = commit + self.timings.settle_delay();
        let ticket = self.begin(
            key,
            OperationKind::Insert,
            Some(Entry::new(key, value)),
            &[(commit, Step::Commit), (settle, Step::Settle)],
        );
        Some(ticket)
    }

    /// Highlight the slot of `key` and empty it at the commit instant, whatever it holds.
    ///
    /// Does nothing and returns `None` if `key` is empty.
    pub fn delete(&mut self, key: &str) -> Option<Ticket> {
        if key.is_empty() {
            tracing::trace!("delete ignored: empty key");
            return None;
        }
        let commit = self.timings.commit_delay();
        let settle = commit + self.timings.settle_delay();
        let ticket = self.begin(
            key,
            OperationKind::Delete,
            None,
            &[(commit, Step::Commit), (settle, Step::Settle)],
        );
        Some(ticket)
    }

    /// Highlight the slot of `key` for a while. The table is not touched.
    ///
    /// Does nothing and returns `None` if `key` is empty.
    pub fn search(&mut self, key: &str) -> Option<Ticket> {
        if key.is_empty() {
            tracing::trace!("search ignored: empty key");
            return None;
        }
        let hold = self.timings.search_hold();
        let mut ticket = self.begin(key, OperationKind::Search, None, &[(hold, Step::Settle)]);
        let outcome = match self.store.read(ticket.index) {
            Ok(Some(entry)) if entry.key == key => SearchOutcome::Found(entry.value.clone()),
            Ok(Some(entry)) => SearchOutcome::OccupiedByOther(entry.key.clone()),
            Ok(None) | Err(_) => SearchOutcome::Empty,
        };
        ticket.outcome = Some(outcome);
        Some(ticket)
    }

    /// [`Sequencer::insert`] with the draft key and value.
    pub fn submit_insert(&mut self) -> Option<Ticket> {
        let InputDraft { key, value } = self.draft.clone();
        self.insert(&key, &value)
    }

    /// [`Sequencer::delete`] with the draft key.
    pub fn submit_delete(&mut self) -> Option<Ticket> {
        let key = self.draft.key.clone();
        self.delete(&key)
    }

    /// [`Sequencer::search`] with the draft key.
    pub fn submit_search(&mut self) -> Option<Ticket> {
        let key = self.draft.key.clone();
        self.search(&key)
    }

    /// Empty the table and the draft right away.
    ///
    /// Supersedes the operation in flight: its pending commit will not happen and its highlight
    /// is dropped.
    pub fn clear(&mut self) -> OpToken {
        let token = self.supersede();
        self.store.clear();
        self.draft = InputDraft::default();
        tracing::debug!(token = token.get(), "table cleared");
        token
    }

    /// Abandon the operation in flight, if any, without touching the table.
    ///
    /// Returns whether there was anything to cancel.
    pub fn cancel(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        let token = self.supersede();
        tracing::debug!(token = token.get(), "operation cancelled");
        true
    }

    /// Perform a deferred step.
    ///
    /// Steps of superseded operations and steps that already happened are no-ops returning
    /// `None`.
    pub fn fire(&mut self, deferred: &Deferred) -> Option<Transition> {
        if deferred.token != self.current {
            tracing::trace!(
                token = deferred.token.get(),
                current = self.current.get(),
                step = ?deferred.step,
                "dropping stale step"
            );
            return None;
        }
        let active = self.active.as_ref()?;

        let mutates = matches!(active.kind, OperationKind::Insert | OperationKind::Delete);

        match (deferred.step, active.phase, mutates) {
            (Step::Commit, OperationPhase::Highlighting, true) => self.commit(),
            (Step::Settle, OperationPhase::Highlighting, true) => {
                // Both steps may fall due at once; the mutation must never be skipped.
                self.commit()?;
                self.settle()
            }
            (Step::Settle, OperationPhase::Highlighting | OperationPhase::Settling, _) => {
                self.settle()
            }
            _ => None,
        }
    }

    fn commit(&mut self) -> Option<Transition> {
        let active = self.active.as_mut()?;
        let result = match active.kind {
            OperationKind::Insert => match active.payload.take() {
                Some(entry) => self.store.insert(active.index, entry.key, entry.value),
                None => return None,
            },
            OperationKind::Delete => self.store.remove(active.index),
            OperationKind::Search => return None,
        };
        if let Err(err) = result {
            tracing::error!("could not commit {:?}: {:?}", active.kind, err);
            return None;
        }

        match active.kind {
            OperationKind::Insert => self.draft = InputDraft::default(),
            _ => self.draft.key.clear(),
        }
        active.phase = OperationPhase::Settling;
        tracing::debug!(
            token = active.token.get(),
            index = active.index,
            kind = ?active.kind,
            "committed"
        );
        Some(Transition {
            token: active.token,
            index: active.index,
            kind: active.kind,
            phase: OperationPhase::Settling,
        })
    }

    fn settle(&mut self) -> Option<Transition> {
        let active = self.active.take()?;
        tracing::debug!(token = active.token.get(), "settled");
        Some(Transition {
            token: active.token,
            index: active.index,
            kind: active.kind,
            phase: OperationPhase::Idle,
        })
    }

    fn supersede(&mut self) -> OpToken {
        self.current = self.current.next();
        self.active = None;
        self.current
    }

    fn begin(
        &mut self,
        key: &str,
        kind: OperationKind,
        payload: Option<Entry>,
        steps: &[(Duration, Step)],
    ) -> Ticket {
        let index = self.index_of(key);
        let token = self.supersede();
        self.active = Some(ActiveOp {
            token,
            index,
            kind,
            phase: OperationPhase::Highlighting,
            payload,
        });
        tracing::debug!(token = token.get(), index, ?kind, method = %self.method, "operation issued");

        Ticket {
            token,
            index,
            kind,
            outcome: None,
            deferred: steps
                .iter()
                .map(|&(delay, step)| Deferred { token, delay, step })
                .collect(),
        }
    }
}
