//! Command types - side effects requested by `update`
//!
//! Commands are executed by the runtime after an update; completion flows
//! back in as messages.

use crate::align::AlignPass;
use crate::model::DocumentId;

/// Side effects the runtime performs
#[derive(Debug, Clone)]
pub enum Cmd {
    /// Deliver `Msg::AlignReady` after the delay. Replaces any pending
    /// timer for the same document (a new change cancels the old timer).
    DebouncedAlign {
        document_id: DocumentId,
        revision: u64,
        delay_ms: u64,
    },
    /// Apply a planned pass to the document as one batch and restore the
    /// remapped selections, then deliver `Msg::AlignApplied`.
    ApplyAlignment {
        document_id: DocumentId,
        pass: AlignPass,
    },
}
