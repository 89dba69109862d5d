//! Level-order traversal of action trace trees.

use crate::domain::MAX_TRACE_DEPTH;
use shared_types::{ActionTraceNode, GlobalSequence};
use std::collections::VecDeque;

/// Find the first node, in level order across `roots`, whose receipt
/// global sequence equals `target`.
pub fn locate(roots: &[ActionTraceNode], target: GlobalSequence) -> Option<&ActionTraceNode> {
    let mut queue: VecDeque<(&ActionTraceNode, usize)> =
        roots.iter().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = queue.pop_front() {
        if node.global_sequence() == Some(target) {
            return Some(node);
        }
        if depth < MAX_TRACE_DEPTH {
            queue.extend(node.inline_traces.iter().map(|child| (child, depth + 1)));
        }
    }

    None
}

/// `node` followed by all its descendants in level order.
pub fn expand(node: &ActionTraceNode) -> Vec<&ActionTraceNode> {
    let mut out = Vec::new();
    let mut queue: VecDeque<(&ActionTraceNode, usize)> = VecDeque::from([(node, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        out.push(current);
        if depth < MAX_TRACE_DEPTH {
            queue.extend(current.inline_traces.iter().map(|child| (child, depth + 1)));
        }
    }

    out
}

/// True when any root has inline children.
pub fn has_inline_traces(roots: &[ActionTraceNode]) -> bool {
    roots.iter().any(|root| !root.inline_traces.is_empty())
}

/// Owned copies of every node reachable from `roots`: each root's
/// expansion, roots in their stored order. Nodes keep their own
/// `inline_traces`.
pub fn flatten(roots: &[ActionTraceNode]) -> Vec<ActionTraceNode> {
    roots
        .iter()
        .flat_map(expand)
        .cloned()
        .collect()
}
