//! Types describing what the sequencer is doing and what a renderer should show.
use crate::hashing::HashMethod;
use crate::slots::Slot;
use std::time::Duration;

/// Tag of an invocation. Tokens are handed out in increasing order and only the latest one is
/// current.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct OpToken(u64);

impl OpToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw value of the token.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Kind of an animated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Insert,
    Search,
    Delete,
}

/// Visual phase of the current operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationPhase {
    #[default]
    Idle,
    /// The slot is emphasised and the mutation (if any) has not happened yet.
    Highlighting,
    /// The mutation happened and the emphasis is fading out.
    Settling,
}

/// The slot currently emphasised and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Highlight {
    pub index: usize,
    pub kind: OperationKind,
    /// Never [`OperationPhase::Idle`].
    pub phase: OperationPhase,
}

/// Pending contents of the key/value input fields.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InputDraft {
    pub key: String,
    pub value: String,
}

impl InputDraft {
    /// Whether an insert may be submitted from the draft.
    pub fn can_insert(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    /// Whether a search or a delete may be submitted from the draft.
    pub fn can_modify(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Step that has to happen some time after an operation was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Mutate the store. Only scheduled for inserts and deletes.
    Commit,
    /// Clear the highlight.
    Settle,
}

/// A step together with its delay, measured from the moment the operation was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deferred {
    pub token: OpToken,
    pub delay: Duration,
    pub step: Step,
}

/// What a search found at the highlighted slot when it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchOutcome {
    /// The slot holds the searched key, with this value.
    Found(String),
    /// The slot holds another key.
    OccupiedByOther(String),
    Empty,
}

/// Receipt of an accepted operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: OpToken,
    pub index: usize,
    pub kind: OperationKind,
    /// Set for searches only.
    pub outcome: Option<SearchOutcome>,
    /// Steps the driver has to fire, in order.
    pub deferred: Vec<Deferred>,
}

/// A phase change caused by firing a deferred step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Transition {
    pub token: OpToken,
    pub index: usize,
    pub kind: OperationKind,
    /// Phase entered by the transition.
    pub phase: OperationPhase,
}

/// Read-only view of the visualizer, enough to render it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Snapshot {
    pub slots: Vec<Slot>,
    pub highlight: Option<Highlight>,
    pub method: HashMethod,
    pub draft: InputDraft,
}

impl Snapshot {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn phase(&self) -> OperationPhase {
        self.highlight
            .map_or(OperationPhase::Idle, |highlight| highlight.phase)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlight
            .is_some_and(|highlight| highlight.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::Entry;

    #[test]
    fn test_draft_guards() {
        let mut draft = InputDraft::default();
        assert!(!draft.can_insert());
        assert!(!draft.can_modify());

        draft.key = "apple".to_string();
        assert!(!draft.can_insert());
        assert!(draft.can_modify());

        draft.value = "fruit".to_string();
        assert!(draft.can_insert());
    }

    #[test]
    fn test_snapshot_helpers() {
        let snapshot = Snapshot {
            slots: vec![None, Some(Entry::new("a", "1")), None],
            highlight: Some(Highlight {
                index: 2,
                kind: OperationKind::Search,
                phase: OperationPhase::Highlighting,
            }),
            method: HashMethod::Division,
            draft: InputDraft::default(),
        };
        assert_eq!(snapshot.capacity(), 3);
        assert_eq!(snapshot.occupied(), 1);
        assert_eq!(snapshot.phase(), OperationPhase::Highlighting);
        assert!(snapshot.is_highlighted(2));
        assert!(!snapshot.is_highlighted(1));
    }

    #[test]
    fn test_tokens_increase() {
        let first = OpToken::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.get(), first.get() + 1);
    }
}
