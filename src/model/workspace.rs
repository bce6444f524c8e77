//! Workspace - documents keyed by identity, with per-document view state
//!
//! A document can exist without a view; alignment passes are skipped for
//! documents no editor is currently displaying.

use std::collections::HashMap;

use super::document::Document;
use super::selection::Selection;

/// Unique identifier for a document within a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// View state for a displayed document: the active carets/selections
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// All active selections (empty selections are carets)
    pub selections: Vec<Selection>,
}

/// All open documents and their views
#[derive(Debug, Default)]
pub struct Workspace {
    documents: HashMap<DocumentId, Document>,
    views: HashMap<DocumentId, ViewState>,
    next_document_id: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and give it a view. Returns its id.
    pub fn open_document(&mut self, document: Document) -> DocumentId {
        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;
        self.documents.insert(id, document);
        self.views.insert(id, ViewState::default());
        tracing::debug!("opened document {}", id.0);
        id
    }

    /// Remove a document and its view
    pub fn close_document(&mut self, id: DocumentId) {
        self.documents.remove(&id);
        self.views.remove(&id);
        tracing::debug!("closed document {}", id.0);
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    /// Whether some editor is displaying this document
    pub fn has_view(&self, id: DocumentId) -> bool {
        self.views.contains_key(&id)
    }

    /// Drop the view but keep the document (e.g. tab moved to background)
    pub fn detach_view(&mut self, id: DocumentId) {
        self.views.remove(&id);
    }

    /// Re-attach a view to a document
    pub fn attach_view(&mut self, id: DocumentId) {
        if self.documents.contains_key(&id) {
            self.views.entry(id).or_default();
        }
    }

    pub fn selections(&self, id: DocumentId) -> Option<&[Selection]> {
        self.views.get(&id).map(|v| v.selections.as_slice())
    }

    pub fn set_selections(&mut self, id: DocumentId, selections: Vec<Selection>) {
        if let Some(view) = self.views.get_mut(&id) {
            view.selections = selections;
        }
    }
}
