//! Virtual-clock driver for the [`Sequencer`].
//!
//! Suits renderers that tick once per frame: the caller reports elapsed time through
//! [`Timeline::advance`] and receives the transitions that happened meanwhile.
use super::machine::Sequencer;
use super::state::*;
use crate::hashing::HashMethod;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled {
    at: Duration,
    deferred: Deferred,
}

/// A [`Sequencer`] together with a queue of pending steps on a virtual clock.
#[derive(Debug, Clone)]
pub struct Timeline {
    sequencer: Sequencer,
    now: Duration,
    /// Ordered by `at`; steps due at the same instant keep their scheduling order.
    queue: Vec<Scheduled>,
}

impl Timeline {
    pub fn new(sequencer: Sequencer) -> Self {
        Self {
            sequencer,
            now: Duration::ZERO,
            queue: Vec::new(),
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sequencer.snapshot()
    }

    /// Number of steps waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Virtual time at which the next step fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.first().map(|scheduled| scheduled.at)
    }

    pub fn set_method(&mut self, method: HashMethod) {
        self.sequencer.set_method(method);
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.sequencer.set_key(key);
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.sequencer.set_value(value);
    }

    pub fn insert(&mut self, key: &str, value: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.insert(key, value))
    }

    pub fn delete(&mut self, key: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.delete(key))
    }

    pub fn search(&mut self, key: &str) -> Option<Ticket> {
        self.issue(|sequencer| sequencer.search(key))
    }

    pub fn submit_insert(&mut self) -> Option<Ticket> {
        self.issue(Sequencer::submit_insert)
    }

    pub fn submit_delete(&mut self) -> Option<Ticket> {
        self.issue(Sequencer::submit_delete)
    }

    pub fn submit_search(&mut self) -> Option<Ticket> {
        self.issue(Sequencer::submit_search)
    }

    pub fn clear(&mut self) -> OpToken {
        self.queue.clear();
        self.sequencer.clear()
    }

    pub fn cancel(&mut self) -> bool {
        self.queue.clear();
        self.sequencer.cancel()
    }

    /// Move the clock forward by `by`, firing every step that falls due.
    pub fn advance(&mut self, by: Duration) -> Vec<Transition> {
        let target = self.now.saturating_add(by);
        let mut transitions = Vec::new();
        while self
            .queue
            .first()
            .is_some_and(|scheduled| scheduled.at <= target)
        {
            let scheduled = self.queue.remove(0);
            self.now = scheduled.at;
            transitions.extend(self.sequencer.fire(&scheduled.deferred));
        }
        self.now = target;
        transitions
    }

    /// Advance until no step is pending.
    pub fn run_until_idle(&mut self) -> Vec<Transition> {
        match self.queue.last() {
            Some(last) => {
                let by = last.at.saturating_sub(self.now);
                self.advance(by)
            }
            None => Vec::new(),
        }
    }

    fn issue(&mut self, op: impl FnOnce(&mut Sequencer) -> Option<Ticket>) -> Option<Ticket> {
        let ticket = op(&mut self.sequencer)?;
        // Steps of superseded operations would be no-ops anyway.
        self.queue.clear();
        for deferred in &ticket.deferred {
            let at = self.now + deferred.delay;
            let position = self.queue.partition_point(|scheduled| scheduled.at <= at);
            self.queue.insert(
                position,
                Scheduled {
                    at,
                    deferred: *deferred,
                },
            );
        }
        Some(ticket)
    }
}
