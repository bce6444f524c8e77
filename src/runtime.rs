//! Runtime - executes commands and drives the debounce timers
//!
//! The runtime plays the host: it owns the model, keeps one pending
//! debounce deadline per document, applies batch edits to the workspace,
//! and feeds completion messages back into `update`. Everything runs on
//! the caller's thread; `tick` must be called with a monotonically
//! advancing `Instant` to fire elapsed timers.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::align::{self, AlignPass};
use crate::commands::Cmd;
use crate::config::AlignerConfig;
use crate::messages::Msg;
use crate::model::{Document, DocumentId, Position, Selection};
use crate::update::{update, AlignerModel};

/// Counters for observing pass activity (tests, diagnostics)
#[derive(Debug, Default, Clone, Copy)]
pub struct PassStats {
    /// Batches applied successfully
    pub passes_applied: u64,
    /// Batches that failed to apply
    pub passes_failed: u64,
    /// Debounce timers that fired
    pub timers_fired: u64,
}

#[derive(Debug)]
struct Deadline {
    due: Instant,
    revision: u64,
}

/// Single-threaded driver around an [`AlignerModel`]
#[derive(Debug)]
pub struct AlignerRuntime {
    pub model: AlignerModel,
    pub stats: PassStats,
    deadlines: HashMap<DocumentId, Deadline>,
}

impl AlignerRuntime {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            model: AlignerModel::new(config),
            stats: PassStats::default(),
            deadlines: HashMap::new(),
        }
    }

    /// Add a document to the workspace and create its session
    pub fn open_document(&mut self, document: Document, now: Instant) -> DocumentId {
        let id = self.model.workspace.open_document(document);
        self.dispatch(Msg::DocumentOpened { document_id: id }, now);
        id
    }

    /// Remove a document, its session, and any pending timer
    pub fn close_document(&mut self, id: DocumentId, now: Instant) {
        self.deadlines.remove(&id);
        self.model.workspace.close_document(id);
        self.dispatch(Msg::DocumentClosed { document_id: id }, now);
    }

    /// Feed one event through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg, now: Instant) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.execute(cmd, now);
        }
    }

    /// Fire every debounce timer that is due at `now`
    pub fn tick(&mut self, now: Instant) {
        let due: Vec<(DocumentId, u64)> = self
            .deadlines
            .iter()
            .filter(|(_, d)| d.due <= now)
            .map(|(id, d)| (*id, d.revision))
            .collect();

        for (document_id, revision) in due {
            self.deadlines.remove(&document_id);
            self.stats.timers_fired += 1;
            self.dispatch(
                Msg::AlignReady {
                    document_id,
                    revision,
                },
                now,
            );
        }
    }

    /// Whether a debounce timer is pending for a document
    pub fn has_pending_timer(&self, id: DocumentId) -> bool {
        self.deadlines.contains_key(&id)
    }

    fn execute(&mut self, cmd: Cmd, now: Instant) {
        match cmd {
            Cmd::DebouncedAlign {
                document_id,
                revision,
                delay_ms,
            } => {
                // Inserting replaces the previous deadline: a newly
                // arriving change cancels the pending timer
                self.deadlines.insert(
                    document_id,
                    Deadline {
                        due: now + Duration::from_millis(delay_ms),
                        revision,
                    },
                );
            }

            Cmd::ApplyAlignment { document_id, pass } => {
                let revision = pass.revision;
                let result = self.apply(document_id, &pass);
                match result {
                    Ok(_) => self.stats.passes_applied += 1,
                    Err(_) => self.stats.passes_failed += 1,
                }
                self.dispatch(
                    Msg::AlignApplied {
                        document_id,
                        revision,
                        result,
                    },
                    now,
                );
            }
        }
    }

    /// Apply the batch edit, then restore selections. The restore is
    /// independent: once the text edit landed, a selection failure never
    /// rolls it back.
    fn apply(&mut self, id: DocumentId, pass: &AlignPass) -> Result<u64, String> {
        let doc = self
            .model
            .workspace
            .document_mut(id)
            .ok_or_else(|| "document closed before batch edit".to_string())?;
        let new_revision = align::apply_pass(doc, pass);

        self.restore_selections(id, pass);
        Ok(new_revision)
    }

    fn restore_selections(&mut self, id: DocumentId, pass: &AlignPass) {
        let Some(doc) = self.model.workspace.document(id) else {
            return;
        };
        if !self.model.workspace.has_view(id) {
            tracing::debug!("no view on document {}, selections not restored", id.0);
            return;
        }

        // Clamp each endpoint to the post-edit line length; out-of-range
        // columns are corrected, not errors
        let clamp = |pos: Position| -> Position {
            Position::new(pos.line, pos.column.min(doc.line_length(pos.line)))
        };
        let restored: Vec<Selection> = pass
            .selections
            .iter()
            .map(|sel| Selection::from_anchor_head(clamp(sel.anchor), clamp(sel.head)))
            .collect();

        self.model.workspace.set_selections(id, restored);
    }
}
