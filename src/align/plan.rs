//! Pass planning - diff desired vs. actual widths into a minimal batch edit
//!
//! Planning is pure: it reads the document and the active selections and
//! produces an `AlignPass` describing the line edits and the remapped
//! selections. Applying the pass is the only mutating step.

use std::collections::HashMap;

use crate::model::{Document, Position, Selection};

use super::policy::{target_widths, AlignPolicy};

/// Rewrite of a single line's leading-whitespace span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdit {
    /// 0-based line index
    pub line: usize,
    /// Current leading width (the span `0..old_width` gets replaced)
    pub old_width: usize,
    /// Desired leading width (replacement is `new_width` spaces)
    pub new_width: usize,
}

/// A planned alignment pass: the minimal edit set plus the selections to
/// restore after the batch is applied.
#[derive(Debug, Clone)]
pub struct AlignPass {
    /// Document revision the plan was computed against
    pub revision: u64,
    /// Line edits, ascending by line; lines already at their desired
    /// width are excluded
    pub edits: Vec<LineEdit>,
    /// Selections remapped to content-relative anchors, clamped to the
    /// post-edit line lengths
    pub selections: Vec<Selection>,
}

impl AlignPass {
    /// A pass with nothing to do still carries the revision it checked
    pub fn is_clean(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Plan one alignment pass over the whole document.
///
/// Rereads full current state; nothing is carried over from earlier
/// passes. Reapplying the planned-and-applied result plans zero edits.
pub fn plan_pass(doc: &Document, selections: &[Selection], policy: AlignPolicy) -> AlignPass {
    let targets = target_widths(doc, policy);

    let mut edits = Vec::new();
    for (line, &new_width) in targets.iter().enumerate() {
        let old_width = doc.leading_width(line);
        if old_width != new_width {
            edits.push(LineEdit {
                line,
                old_width,
                new_width,
            });
        }
    }

    let selections = remap_selections(doc, selections, &edits);

    AlignPass {
        revision: doc.revision,
        edits,
        selections,
    }
}

/// Carry each selection endpoint across the rewrite.
///
/// The anchor is the endpoint's offset within the line's content (column
/// minus old leading width, floored at 0); the restored column is
/// `new_width + anchor`, clamped to the new line length. Content offsets
/// are not stable semantic positions, so this is best-effort.
fn remap_selections(
    doc: &Document,
    selections: &[Selection],
    edits: &[LineEdit],
) -> Vec<Selection> {
    let by_line: HashMap<usize, LineEdit> = edits.iter().map(|e| (e.line, *e)).collect();

    let remap = |pos: Position| -> Position {
        match by_line.get(&pos.line) {
            Some(edit) => {
                let k = pos.content_offset(edit.old_width);
                let new_len = doc.line_length(pos.line) - edit.old_width + edit.new_width;
                Position::new(pos.line, (edit.new_width + k).min(new_len))
            }
            None => pos,
        }
    };

    selections
        .iter()
        .map(|sel| Selection::from_anchor_head(remap(sel.anchor), remap(sel.head)))
        .collect()
}

/// Apply a planned pass as one atomic batch.
///
/// Edits run bottom-up so earlier char offsets stay valid while later
/// lines are rewritten. The revision is bumped once for the whole batch,
/// mirroring a host that merges the pass into a single undo step.
/// Returns the document's new revision.
pub fn apply_pass(doc: &mut Document, pass: &AlignPass) -> u64 {
    if pass.edits.is_empty() {
        return doc.revision;
    }

    for edit in pass.edits.iter().rev() {
        let start = doc.line_start_offset(edit.line);
        doc.buffer.remove(start..start + edit.old_width);
        doc.buffer.insert(start, &" ".repeat(edit.new_width));
    }
    doc.bump_revision();
    doc.revision
}
