//! End-to-end alignment flow tests - debounce, convergence, caret fixup

mod common;

use std::time::Duration;

use common::{lines, runtime_with, runtime_with_config, settle, text, type_text};
use gutter::align::{AlignPolicy, PassState};
use gutter::config::AlignerConfig;
use gutter::messages::Msg;
use gutter::model::{Position, Selection};

// ========================================================================
// Right-alignment convergence
// ========================================================================

#[test]
fn test_edit_then_settle_right_aligns() {
    let (mut rt, id, now) = runtime_with("a\nbb\nccc");
    type_text(&mut rt, id, 0, "", now);
    // An empty insert still bumps the revision and schedules a pass
    settle(&mut rt, now);

    assert_eq!(lines(&rt, id), vec!["  a", " bb", "ccc"]);
}

#[test]
fn test_all_lines_end_at_max_content_column() {
    let (mut rt, id, now) = runtime_with("one\nseven77\n\nxx");
    type_text(&mut rt, id, 0, "", now);
    settle(&mut rt, now);

    let doc = rt.model.workspace.document(id).unwrap();
    let max = doc.max_content_length();
    for line in 0..doc.line_count() {
        assert_eq!(doc.leading_width(line) + doc.content_length(line), max);
    }
}

#[test]
fn test_growing_longest_line_reflows_everything() {
    let (mut rt, id, mut now) = runtime_with("a\nbb\nccc");
    type_text(&mut rt, id, 0, "", now);
    now = settle(&mut rt, now);
    assert_eq!(lines(&rt, id), vec!["  a", " bb", "ccc"]);

    // Extend the last line; earlier lines gain padding on the next pass
    let end = text(&rt, id).chars().count();
    type_text(&mut rt, id, end, "cc", now);
    settle(&mut rt, now);
    assert_eq!(lines(&rt, id), vec!["    a", "   bb", "ccccc"]);
}

// ========================================================================
// Idempotence and pass bookkeeping
// ========================================================================

#[test]
fn test_settled_document_schedules_no_second_pass() {
    let (mut rt, id, mut now) = runtime_with("a\nbb\nccc");
    type_text(&mut rt, id, 0, "", now);
    now = settle(&mut rt, now);
    assert_eq!(rt.stats.passes_applied, 1);

    // The runtime's own batch does not feed back as a change; an
    // explicit notification about the applied revision plans clean
    rt.dispatch(Msg::DocumentChanged { document_id: id }, now);
    settle(&mut rt, now);

    assert_eq!(rt.stats.passes_applied, 1, "second pass must plan zero edits");
}

#[test]
fn test_rapid_typing_coalesces_to_one_pass() {
    let (mut rt, id, now) = runtime_with("a\nbb\nccc");
    for (i, step) in (0..5).zip([10u64, 20, 30, 40, 50]) {
        type_text(
            &mut rt,
            id,
            i,
            "x",
            now + Duration::from_millis(step),
        );
    }
    settle(&mut rt, now);

    assert_eq!(rt.stats.timers_fired, 1);
    assert_eq!(rt.stats.passes_applied, 1);
}

#[test]
fn test_session_idle_after_settle() {
    let (mut rt, id, now) = runtime_with("a\nbb");
    type_text(&mut rt, id, 0, "x", now);
    settle(&mut rt, now);

    assert_eq!(rt.model.sessions[&id].state(), PassState::Idle);
}

// ========================================================================
// Caret preservation
// ========================================================================

#[test]
fn test_caret_sticks_to_content_character() {
    let (mut rt, id, now) = runtime_with("a\nbb\nccc");
    // Caret between the two b's: content offset 1
    rt.model
        .workspace
        .set_selections(id, vec![Selection::new(Position::new(1, 1))]);
    type_text(&mut rt, id, 0, "", now);
    settle(&mut rt, now);

    // Line 1 is now " bb"; the caret keeps its content offset
    assert_eq!(
        rt.model.workspace.selections(id).unwrap(),
        &[Selection::new(Position::new(1, 2))]
    );
}

#[test]
fn test_caret_clamped_when_padding_shrinks() {
    let (mut rt, id, now) = runtime_with("        a\nbb");
    rt.model
        .workspace
        .set_selections(id, vec![Selection::new(Position::new(0, 9))]);
    type_text(&mut rt, id, 0, "", now);
    settle(&mut rt, now);

    // Width 8 shrinks to 1: line is " a", caret clamps to its end
    assert_eq!(lines(&rt, id)[0], " a");
    assert_eq!(
        rt.model.workspace.selections(id).unwrap(),
        &[Selection::new(Position::new(0, 2))]
    );
}

#[test]
fn test_selection_range_endpoints_both_remap() {
    let (mut rt, id, now) = runtime_with("a\nbb\nccc");
    rt.model.workspace.set_selections(
        id,
        vec![Selection::from_anchor_head(
            Position::new(0, 0),
            Position::new(0, 1),
        )],
    );
    type_text(&mut rt, id, 0, "", now);
    settle(&mut rt, now);

    // "a" gains two spaces; both endpoints shift with the content
    assert_eq!(
        rt.model.workspace.selections(id).unwrap(),
        &[Selection::from_anchor_head(
            Position::new(0, 2),
            Position::new(0, 3)
        )]
    );
}

// ========================================================================
// Skip conditions
// ========================================================================

#[test]
fn test_hidden_document_is_not_aligned() {
    let (mut rt, id, now) = runtime_with("a\nbb\nccc");
    rt.model.workspace.detach_view(id);
    type_text(&mut rt, id, 0, "x", now);
    settle(&mut rt, now);

    assert_eq!(rt.stats.passes_applied, 0);
    assert_eq!(text(&rt, id), "xa\nbb\nccc");
}

#[test]
fn test_close_before_timer_fires_is_benign() {
    let (mut rt, id, now) = runtime_with("a\nbb");
    type_text(&mut rt, id, 0, "x", now);
    rt.close_document(id, now);
    settle(&mut rt, now);

    assert_eq!(rt.stats.passes_applied, 0);
    assert_eq!(rt.stats.passes_failed, 0);
}

// ========================================================================
// Fibonacci indent flow
// ========================================================================

#[test]
fn test_indent_commands_drive_fibonacci_widths() {
    let config = AlignerConfig {
        policy: AlignPolicy::FibonacciIndent,
        ..AlignerConfig::default()
    };
    let (mut rt, id, mut now) = runtime_with_config("root\nchild\nleaf", config);

    // Indent lines 1-2 once, then line 2 twice more (depths 1 and 3)
    rt.model.workspace.set_selections(
        id,
        vec![Selection::from_anchor_head(
            Position::new(1, 0),
            Position::new(2, 0),
        )],
    );
    rt.dispatch(Msg::IndentLines { document_id: id }, now);
    now = settle(&mut rt, now);

    rt.model
        .workspace
        .set_selections(id, vec![Selection::new(Position::new(2, 0))]);
    rt.dispatch(Msg::IndentLines { document_id: id }, now);
    rt.dispatch(Msg::IndentLines { document_id: id }, now);
    settle(&mut rt, now);

    assert_eq!(lines(&rt, id), vec!["root", "  child", "    leaf"]);
}

#[test]
fn test_outdent_returns_to_flush_left() {
    let config = AlignerConfig {
        policy: AlignPolicy::FibonacciIndent,
        ..AlignerConfig::default()
    };
    let (mut rt, id, mut now) = runtime_with_config("a\nb", config);

    rt.model
        .workspace
        .set_selections(id, vec![Selection::new(Position::new(1, 0))]);
    rt.dispatch(Msg::IndentLines { document_id: id }, now);
    now = settle(&mut rt, now);
    assert_eq!(lines(&rt, id), vec!["a", "  b"]);

    rt.dispatch(Msg::OutdentLines { document_id: id }, now);
    settle(&mut rt, now);
    assert_eq!(lines(&rt, id), vec!["a", "b"]);
}
