//! Message types - the event stream the recalculator reacts to
//!
//! The host delivers these serially; all state changes flow through
//! `update`. Change notifications carry only the document identity: the
//! recalculator never inspects deltas, it rereads full current state.

use crate::model::DocumentId;

/// Every event the alignment engine handles
#[derive(Debug, Clone)]
pub enum Msg {
    /// A document was added to the workspace (creates its session)
    DocumentOpened { document_id: DocumentId },
    /// A document's content changed
    DocumentChanged { document_id: DocumentId },
    /// A document was removed (tears down its session)
    DocumentClosed { document_id: DocumentId },

    /// The debounce window elapsed for a scheduled pass
    AlignReady { document_id: DocumentId, revision: u64 },
    /// The batch edit application finished (async host result);
    /// Ok carries the document's post-apply revision
    AlignApplied {
        document_id: DocumentId,
        revision: u64,
        result: Result<u64, String>,
    },

    /// Increase nesting depth for all lines covered by the selections
    IndentLines { document_id: DocumentId },
    /// Decrease nesting depth for all lines covered by the selections
    OutdentLines { document_id: DocumentId },

    /// Pad every line so all lines end at the same length (no debounce)
    AlignNow { document_id: DocumentId },
    /// Remove one leading space per line if present (no debounce)
    Unalign { document_id: DocumentId },
}
