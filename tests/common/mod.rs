//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use gutter::config::AlignerConfig;
use gutter::messages::Msg;
use gutter::model::{Document, DocumentId};
use gutter::runtime::AlignerRuntime;

/// Create a runtime with default config and one open document
pub fn runtime_with(text: &str) -> (AlignerRuntime, DocumentId, Instant) {
    runtime_with_config(text, AlignerConfig::default())
}

/// Create a runtime with a specific config and one open document
pub fn runtime_with_config(
    text: &str,
    config: AlignerConfig,
) -> (AlignerRuntime, DocumentId, Instant) {
    let now = Instant::now();
    let mut rt = AlignerRuntime::new(config);
    let id = rt.open_document(Document::with_text(text), now);
    (rt, id, now)
}

/// Insert text into the document and deliver the change notification
pub fn type_text(rt: &mut AlignerRuntime, id: DocumentId, at: usize, text: &str, now: Instant) {
    rt.model
        .workspace
        .document_mut(id)
        .expect("document should be open")
        .insert(at, text);
    rt.dispatch(Msg::DocumentChanged { document_id: id }, now);
}

/// Advance past the debounce window and fire due timers
pub fn settle(rt: &mut AlignerRuntime, now: Instant) -> Instant {
    let later = now + Duration::from_millis(1_000);
    rt.tick(later);
    later
}

/// The document's lines without trailing newlines
pub fn lines(rt: &AlignerRuntime, id: DocumentId) -> Vec<String> {
    let doc = rt.model.workspace.document(id).expect("document");
    (0..doc.line_count())
        .filter_map(|i| doc.line_text(i))
        .collect()
}

/// Full document text
pub fn text(rt: &AlignerRuntime, id: DocumentId) -> String {
    rt.model
        .workspace
        .document(id)
        .expect("document")
        .buffer
        .to_string()
}
