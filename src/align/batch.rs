//! Whole-document batch transforms: align-now and unalign
//!
//! These are the two directly invocable actions, independent of the
//! live-edit recalculator: no debounce, no caret math. Align-now pads
//! every line's leading whitespace so all lines end at the same total
//! length; unalign strips one leading space per line if present.

use crate::model::Document;

/// Pad every line so it ends at the length of the longest line.
/// Returns the number of lines that were padded.
pub fn align_now(doc: &mut Document) -> usize {
    let max_len = doc.max_line_length();

    let mut padded = 0;
    for line in (0..doc.line_count()).rev() {
        let pad = max_len - doc.line_length(line);
        if pad > 0 {
            let start = doc.line_start_offset(line);
            doc.buffer.insert(start, &" ".repeat(pad));
            padded += 1;
        }
    }
    if padded > 0 {
        doc.bump_revision();
    }
    tracing::debug!("align-now padded {} of {} lines", padded, doc.line_count());
    padded
}

/// Remove one leading space from every line that has one.
/// Returns the number of lines that were trimmed.
pub fn unalign(doc: &mut Document) -> usize {
    let mut trimmed = 0;
    for line in (0..doc.line_count()).rev() {
        if doc.leading_width(line) > 0 {
            let start = doc.line_start_offset(line);
            doc.buffer.remove(start..start + 1);
            trimmed += 1;
        }
    }
    if trimmed > 0 {
        doc.bump_revision();
    }
    tracing::debug!("unalign trimmed {} of {} lines", trimmed, doc.line_count());
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(doc: &Document) -> Vec<String> {
        (0..doc.line_count())
            .filter_map(|i| doc.line_text(i))
            .collect()
    }

    // ========================================================================
    // align_now tests
    // ========================================================================

    #[test]
    fn test_align_now_pads_to_longest_line() {
        let mut doc = Document::with_text("a\nbb\nccc");
        let padded = align_now(&mut doc);

        assert_eq!(lines(&doc), vec!["  a", " bb", "ccc"]);
        assert_eq!(padded, 2);
    }

    #[test]
    fn test_align_now_counts_existing_whitespace() {
        // Total length, not content length: " bb" is already 3 long
        let mut doc = Document::with_text(" bb\nccc");
        let padded = align_now(&mut doc);

        assert_eq!(lines(&doc), vec![" bb", "ccc"]);
        assert_eq!(padded, 0);
    }

    #[test]
    fn test_align_now_uniform_document_is_noop() {
        let mut doc = Document::with_text("aa\nbb");
        let before = doc.revision;
        assert_eq!(align_now(&mut doc), 0);
        assert_eq!(doc.revision, before);
    }

    // ========================================================================
    // unalign tests
    // ========================================================================

    #[test]
    fn test_unalign_strips_one_space_per_line() {
        let mut doc = Document::with_text("  a\n bb\nccc");
        let trimmed = unalign(&mut doc);

        assert_eq!(lines(&doc), vec![" a", "bb", "ccc"]);
        assert_eq!(trimmed, 2);
    }

    #[test]
    fn test_unalign_without_leading_space_is_noop() {
        let mut doc = Document::with_text("a\nbb");
        let before = doc.revision;
        assert_eq!(unalign(&mut doc), 0);
        assert_eq!(doc.revision, before);
    }

    #[test]
    fn test_unalign_does_not_touch_tabs() {
        let mut doc = Document::with_text("\ta");
        assert_eq!(unalign(&mut doc), 0);
        assert_eq!(lines(&doc), vec!["\ta"]);
    }

    // ========================================================================
    // Partial-inverse property
    // ========================================================================

    #[test]
    fn test_unalign_inverts_align_now() {
        // No pre-existing leading whitespace and no empty lines: repeating
        // unalign max-pad times walks every line back to its original
        // prefix (extra applications are no-ops once the padding is gone)
        let original = "a\nbb\nccc\ndddd";
        let mut doc = Document::with_text(original);

        let max_pad = doc.max_line_length() - doc.line_length(0);
        align_now(&mut doc);
        for _ in 0..max_pad {
            unalign(&mut doc);
        }

        assert_eq!(doc.buffer.to_string(), original);
    }
}
