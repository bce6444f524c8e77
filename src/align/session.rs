//! Per-document alignment session
//!
//! One session exists per open document, created on open and dropped on
//! close. It owns the pass lifecycle as an explicit state machine:
//!
//! ```text
//! Idle             --change-->           Idle (debounce scheduled)
//! Idle             --debounce elapsed--> Running (batch in flight)
//! Running          --change-->           RunningWithRerun
//! Running          --apply completed-->  Idle
//! RunningWithRerun --apply completed-->  Idle + immediate reschedule
//! ```
//!
//! The in-flight batch is never cancelled; cancellation exists only for
//! the debounce window, implemented by revision staleness: each change
//! replaces the scheduled revision, and an elapsed timer carrying an old
//! revision is dropped.

/// Where a session is in the pass lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    /// No pass in flight
    #[default]
    Idle,
    /// A batch edit has been issued and has not completed
    Running,
    /// A change arrived while a batch was in flight; rerun on completion
    RunningWithRerun,
}

/// What a change event should turn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// Schedule (or reschedule) the debounce timer
    Schedule,
    /// A pass is in flight; the rerun flag was recorded instead
    Defer,
}

/// What an elapsed debounce timer should turn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyAction {
    /// Plan and apply a pass now
    Run,
    /// The timer's revision was superseded by a later change
    Stale,
    /// The document is already known to be aligned at this revision
    Clean,
}

/// What a completed batch application should turn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    /// Back to idle, nothing pending
    Done,
    /// Changes were observed while running; schedule a follow-up pass
    Rerun,
}

/// Session state for one document
#[derive(Debug, Default)]
pub struct AlignSession {
    state: PassState,
    /// Revision captured when the debounce timer was (re)scheduled
    scheduled_revision: Option<u64>,
    /// Revision the document was last known to need zero edits at
    clean_revision: Option<u64>,
}

impl AlignSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    /// A change notification arrived for the document
    pub fn on_change(&mut self, revision: u64) -> ChangeAction {
        match self.state {
            PassState::Idle => {
                self.scheduled_revision = Some(revision);
                ChangeAction::Schedule
            }
            PassState::Running | PassState::RunningWithRerun => {
                self.state = PassState::RunningWithRerun;
                ChangeAction::Defer
            }
        }
    }

    /// The debounce timer fired with the revision it was scheduled at
    pub fn on_ready(&mut self, ready_revision: u64, current_revision: u64) -> ReadyAction {
        if self.state != PassState::Idle {
            // A pass is already in flight; its completion handles reruns
            return ReadyAction::Stale;
        }
        if self.scheduled_revision != Some(ready_revision) || ready_revision != current_revision {
            return ReadyAction::Stale;
        }
        self.scheduled_revision = None;
        if self.clean_revision == Some(current_revision) {
            return ReadyAction::Clean;
        }
        self.state = PassState::Running;
        ReadyAction::Run
    }

    /// The timer fired but the pass was skipped before running (e.g. no
    /// view on the document); consume the schedule without going busy.
    pub fn skip_ready(&mut self, ready_revision: u64) {
        if self.scheduled_revision == Some(ready_revision) {
            self.scheduled_revision = None;
        }
    }

    /// Planning found zero edits; remember the revision as clean
    pub fn finish_clean(&mut self, revision: u64) {
        self.state = PassState::Idle;
        self.clean_revision = Some(revision);
    }

    /// The batch application completed (successfully or not)
    pub fn on_applied(&mut self, ok: bool, new_revision: u64) -> CompletionAction {
        let rerun = self.state == PassState::RunningWithRerun;
        self.state = PassState::Idle;
        if ok && !rerun {
            self.clean_revision = Some(new_revision);
        }
        if rerun {
            CompletionAction::Rerun
        } else {
            CompletionAction::Done
        }
    }
}
