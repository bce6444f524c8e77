//! Alignment policies and per-line target width computation

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::Document;

/// Which leading-whitespace policy the recalculator applies.
///
/// Exactly one policy is active per configuration. Right-alignment is the
/// canonical default; fibonacci-indent is an explicit opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlignPolicy {
    /// Pad every line so its content ends at the column of the longest
    /// content line. The maximum is recomputed on every pass.
    #[default]
    RightAlign,
    /// Fixed indentation width per nesting depth, scaled from the
    /// Fibonacci sequence. Depth comes from the document's depth map.
    FibonacciIndent,
}

/// Indent width for a nesting depth: 0 at depth 0, else 2·F(depth)
/// with F(0)=0, F(1)=1. Depths 1..=5 map to 2, 2, 4, 6, 10.
pub fn fibonacci_indent_width(depth: usize) -> usize {
    if depth == 0 {
        return 0;
    }
    2 * fibonacci(depth)
}

fn fibonacci(n: usize) -> usize {
    let (mut a, mut b) = (0usize, 1usize);
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}

/// Desired leading-whitespace width for every line of the document.
///
/// Desired widths are never negative: under right-alignment the longest
/// content line gets width 0, everything else pads up to it.
pub fn target_widths(doc: &Document, policy: AlignPolicy) -> Vec<usize> {
    match policy {
        AlignPolicy::RightAlign => {
            let max_content = doc.max_content_length();
            (0..doc.line_count())
                .map(|line| max_content.saturating_sub(doc.content_length(line)))
                .collect()
        }
        AlignPolicy::FibonacciIndent => (0..doc.line_count())
            .map(|line| fibonacci_indent_width(doc.depths.depth(line)))
            .collect(),
    }
}
