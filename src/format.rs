//! Format hash summaries, trees and comparisons as text.

use crate::tree::{Node, NodeKind, SharedSubtree};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Hash of a single document.
#[derive(Debug, Clone, Serialize)]
pub struct HashSummary {
    pub source: String,
    pub hash: String,
    pub kind: NodeKind,
    pub weight: usize,
    pub depth: usize,
    pub algorithm: String,
}

impl HashSummary {
    pub fn from_tree(source: &str, root: &Node, algorithm: &str) -> Self {
        Self {
            source: source.to_string(),
            hash: root.hash().to_string(),
            kind: root.kind(),
            weight: root.weight(),
            depth: root.depth(),
            algorithm: algorithm.to_string(),
        }
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub identical: bool,
    pub left_hash: String,
    pub right_hash: String,
    pub left_weight: usize,
    pub right_weight: usize,
    /// Nodes of the right document covered by `shared`
    pub shared_weight: usize,
    pub shared: Vec<SharedSubtree>,
}

impl CompareReport {
    pub fn new(left: &Node, right: &Node, shared: Vec<SharedSubtree>) -> Self {
        Self {
            identical: left.hash() == right.hash(),
            left_hash: left.hash().to_string(),
            right_hash: right.hash().to_string(),
            left_weight: left.weight(),
            right_weight: right.weight(),
            shared_weight: shared.iter().map(|s| s.weight).sum(),
            shared,
        }
    }
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn short(hash: &str) -> &str {
    &hash[..hash.len().min(7)]
}

/// Format a document hash in `<hash>  <source>` form.
pub fn format_hash_text(summary: &HashSummary) -> String {
    format!(
        "{}  {}\n  kind: {}, weight: {}, depth: {}, algorithm: {}\n",
        summary.hash,
        summary.source,
        summary.kind,
        summary.weight,
        summary.depth,
        summary.algorithm
    )
}

/// Render a tree as indented text, one node per line.
///
/// `max_depth` limits how many levels are printed; deeper subtrees are
/// summarized by their weight.
pub fn format_tree_text(root: &Node, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&Node, usize, Option<usize>)> = vec![(root, 0, None)];
    while let Some((node, level, position)) = stack.pop() {
        let indent = "  ".repeat(level);
        let name = match (node.key(), position) {
            (Some(key), _) => format!("{:?}", key),
            (None, Some(i)) => format!("[{}]", i),
            (None, None) => node.label().to_string(),
        };
        let name = if node.is_primitive() && level == 0 {
            String::new()
        } else {
            format!("{}: ", name)
        };
        let detail = if node.is_primitive() {
            format!("{} {}", node.kind(), render_value(node))
        } else {
            format!("{} (weight {})", node.kind(), node.weight())
        };
        out.push_str(&format!(
            "{}{}{} {}\n",
            indent,
            name,
            detail,
            short(node.hash())
        ));

        let children = node.children();
        if children.is_empty() {
            continue;
        }
        if max_depth.is_some_and(|limit| level + 1 >= limit) {
            out.push_str(&format!(
                "{}  ... {} nodes\n",
                indent,
                node.weight() - 1
            ));
            continue;
        }
        for (i, child) in children.iter().enumerate().rev() {
            let position = match node.kind() {
                NodeKind::Array => Some(i),
                _ => None,
            };
            stack.push((child, level + 1, position));
        }
    }
    out
}

fn render_value(node: &Node) -> String {
    match node.kind() {
        NodeKind::String => format!("{:?}", node.label().to_string()),
        _ => node.label().to_string(),
    }
}

/// Format a comparison as human-readable text.
pub fn format_compare_text(report: &CompareReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Comparison")));
    out.push_str(&format!(
        "  Left:  {} ({} nodes)\n",
        short(&report.left_hash),
        report.left_weight
    ));
    out.push_str(&format!(
        "  Right: {} ({} nodes)\n",
        short(&report.right_hash),
        report.right_weight
    ));
    if report.identical {
        out.push_str("  Identical: yes\n");
        return out;
    }
    out.push_str("  Identical: no\n\n");

    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Unchanged subtrees")
    ));
    if report.shared.is_empty() {
        out.push_str("No unchanged subtrees.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Pointer", "Kind", "Nodes", "Hash"]);
    for row in &report.shared {
        let pointer = if row.pointer.is_empty() {
            "/".to_string()
        } else {
            row.pointer.clone()
        };
        table.add_row(vec![
            pointer,
            row.kind.to_string(),
            row.weight.to_string(),
            short(&row.hash).to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} subtrees, {} of {} nodes unchanged.\n",
        report.shared.len(),
        report.shared_weight,
        report.right_weight
    ));
    out
}
