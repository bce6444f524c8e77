//! Update functions - the alignment recalculator state transitions
//!
//! `update` is the single entry point for every event. It owns the
//! per-document sessions and turns events into at most one command;
//! the runtime executes commands and feeds completions back in.

use std::collections::{BTreeSet, HashMap};

use crate::align::{
    self, AlignSession, ChangeAction, CompletionAction, ReadyAction,
};
use crate::commands::Cmd;
use crate::config::AlignerConfig;
use crate::messages::Msg;
use crate::model::{DocumentId, Selection, Workspace};

/// The complete engine state: workspace, per-document sessions, config
#[derive(Debug, Default)]
pub struct AlignerModel {
    pub workspace: Workspace,
    pub sessions: HashMap<DocumentId, AlignSession>,
    pub config: AlignerConfig,
}

impl AlignerModel {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            workspace: Workspace::new(),
            sessions: HashMap::new(),
            config,
        }
    }
}

/// Main update function - dispatches one event
pub fn update(model: &mut AlignerModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::DocumentOpened { document_id } => {
            model.sessions.insert(document_id, AlignSession::new());
            None
        }

        Msg::DocumentClosed { document_id } => {
            model.sessions.remove(&document_id);
            None
        }

        Msg::DocumentChanged { document_id } => {
            let session = model.sessions.get_mut(&document_id)?;
            let doc = model.workspace.document(document_id)?;
            match session.on_change(doc.revision) {
                ChangeAction::Schedule => Some(Cmd::DebouncedAlign {
                    document_id,
                    revision: doc.revision,
                    delay_ms: model.config.debounce_ms,
                }),
                ChangeAction::Defer => {
                    tracing::debug!(
                        "document {} changed while a pass is running, rerun deferred",
                        document_id.0
                    );
                    None
                }
            }
        }

        Msg::AlignReady {
            document_id,
            revision,
        } => {
            let session = model.sessions.get_mut(&document_id)?;
            let Some(doc) = model.workspace.document(document_id) else {
                tracing::debug!("document {} gone before its pass, skipping", document_id.0);
                session.skip_ready(revision);
                return None;
            };
            if !model.workspace.has_view(document_id) {
                // Not an error: the document just isn't displayed anywhere
                tracing::debug!("document {} has no view, skipping pass", document_id.0);
                session.skip_ready(revision);
                return None;
            }

            match session.on_ready(revision, doc.revision) {
                ReadyAction::Stale => {
                    tracing::debug!(
                        "dropping stale pass for document {}: scheduled at rev {}, now {}",
                        document_id.0,
                        revision,
                        doc.revision
                    );
                    None
                }
                ReadyAction::Clean => {
                    tracing::debug!(
                        "document {} already aligned at rev {}, skipping",
                        document_id.0,
                        revision
                    );
                    None
                }
                ReadyAction::Run => {
                    let selections = model
                        .workspace
                        .selections(document_id)
                        .unwrap_or(&[])
                        .to_vec();
                    let pass = align::plan_pass(doc, &selections, model.config.policy);
                    if pass.is_clean() {
                        tracing::debug!(
                            "document {} needs no edits at rev {}",
                            document_id.0,
                            revision
                        );
                        session.finish_clean(doc.revision);
                        None
                    } else {
                        tracing::debug!(
                            "applying {} line edits to document {} at rev {}",
                            pass.edits.len(),
                            document_id.0,
                            revision
                        );
                        Some(Cmd::ApplyAlignment { document_id, pass })
                    }
                }
            }
        }

        Msg::AlignApplied {
            document_id,
            revision,
            result,
        } => {
            let session = model.sessions.get_mut(&document_id)?;
            let (ok, new_revision) = match result {
                Ok(new_revision) => {
                    tracing::debug!(
                        "applied pass for document {} (rev {} -> {})",
                        document_id.0,
                        revision,
                        new_revision
                    );
                    (true, new_revision)
                }
                Err(e) => {
                    // No retry: the next change event re-triggers naturally
                    tracing::warn!(
                        "batch edit failed for document {}: {}",
                        document_id.0,
                        e
                    );
                    (false, revision)
                }
            };

            match session.on_applied(ok, new_revision) {
                CompletionAction::Done => None,
                CompletionAction::Rerun => {
                    let doc = model.workspace.document(document_id)?;
                    tracing::debug!(
                        "rerunning alignment for document {} after deferred change",
                        document_id.0
                    );
                    match session.on_change(doc.revision) {
                        ChangeAction::Schedule => Some(Cmd::DebouncedAlign {
                            document_id,
                            revision: doc.revision,
                            delay_ms: 0,
                        }),
                        ChangeAction::Defer => None,
                    }
                }
            }
        }

        Msg::IndentLines { document_id } => adjust_depth(model, document_id, true),
        Msg::OutdentLines { document_id } => adjust_depth(model, document_id, false),

        Msg::AlignNow { document_id } => {
            let doc = model.workspace.document_mut(document_id)?;
            let padded = align::align_now(doc);
            tracing::info!(
                "align-now padded {} lines in document {}",
                padded,
                document_id.0
            );
            None
        }

        Msg::Unalign { document_id } => {
            let doc = model.workspace.document_mut(document_id)?;
            let trimmed = align::unalign(doc);
            tracing::info!(
                "unalign trimmed {} lines in document {}",
                trimmed,
                document_id.0
            );
            None
        }
    }
}

/// Bump or drop the depth of every line covered by the active selections,
/// then schedule a realignment like any other change.
fn adjust_depth(model: &mut AlignerModel, document_id: DocumentId, deeper: bool) -> Option<Cmd> {
    let lines = lines_covered(model.workspace.selections(document_id).unwrap_or(&[]));
    if lines.is_empty() {
        return None;
    }

    let doc = model.workspace.document_mut(document_id)?;
    if deeper {
        doc.depths.indent(lines);
    } else {
        doc.depths.outdent(lines);
    }
    doc.bump_revision();

    update(model, Msg::DocumentChanged { document_id })
}

/// Unique lines touched by any selection, in document order
fn lines_covered(selections: &[Selection]) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();
    for sel in selections {
        for line in sel.start().line..=sel.end().line {
            lines.insert(line);
        }
    }
    lines
}
