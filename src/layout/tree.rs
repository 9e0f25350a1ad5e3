//! Graph-to-tree builder.
//!
//! Turns the ordered node/edge lists into a single rooted tree held in an
//! arena. All cross-references (`parent`, `children`, `thread`, `ancestor`)
//! are indices into the arena, never owning references; the whole arena is
//! dropped once the flat coordinate list has been produced.

use std::collections::HashMap;

use crate::graph::{GraphEdge, GraphNode};

/// One tree node plus the scratch fields used by the positioning passes.
///
/// Scratch fields (`prelim`, `modifier`, `shift`, `change`, `thread`,
/// `ancestor`) are only meaningful while a layout call is running.
#[derive(Debug)]
pub(crate) struct TreeNode {
    /// Index of the wrapped node in the input node slice.
    pub graph_index: usize,
    /// Depth below the root (root = 0).
    pub depth: u32,
    /// Parent arena index (None for the root).
    pub parent: Option<usize>,
    /// Child arena indices, in edge insertion order.
    pub children: Vec<usize>,
    /// Left-to-right position among siblings.
    pub sibling_index: usize,
    /// Preliminary primary-axis coordinate (first walk).
    pub prelim: f64,
    /// Shift applied lazily to all descendants (second walk).
    pub modifier: f64,
    /// Pending subtree shift, spread by `execute_shifts`.
    pub shift: f64,
    /// Per-subtree change rate, spread by `execute_shifts`.
    pub change: f64,
    /// Contour shortcut across a subtree boundary.
    pub thread: Option<usize>,
    /// Ancestor pointer used by contour merging.
    pub ancestor: usize,
}

/// Arena of tree nodes. The root is always index 0.
#[derive(Debug)]
pub(crate) struct TreeArena {
    pub nodes: Vec<TreeNode>,
}

impl TreeArena {
    pub const ROOT: usize = 0;

    /// Build a rooted tree from the input lists.
    ///
    /// Root selection: the first node (by input order) that is never an
    /// edge target; if every node is a target, the first node is used
    /// regardless. Edges with an unknown endpoint are dropped. A node
    /// reachable through several edges is attached under whichever parent
    /// the descent reaches first; nodes unreachable from the root are left
    /// out. Returns None for an empty node list.
    pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }

        let index_of: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        // Adjacency in edge input order; dangling edges dropped here.
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut is_target = vec![false; nodes.len()];
        for edge in edges {
            let (Some(&s), Some(&t)) = (
                index_of.get(edge.source.as_str()),
                index_of.get(edge.target.as_str()),
            ) else {
                continue;
            };
            children_of[s].push(t);
            is_target[t] = true;
        }

        let root = (0..nodes.len()).find(|&i| !is_target[i]).unwrap_or(0);

        // Depth-first descent on an explicit stack: attaches each node under
        // its first-visiting parent and assigns depth and sibling index.
        let mut arena: Vec<TreeNode> = Vec::with_capacity(nodes.len());
        let mut visited = vec![false; nodes.len()];
        let mut stack: Vec<(usize, Option<usize>)> = vec![(root, None)];

        while let Some((graph_index, parent)) = stack.pop() {
            if visited[graph_index] {
                continue;
            }
            visited[graph_index] = true;

            let slot = arena.len();
            let (depth, sibling_index) = match parent {
                Some(p) => {
                    let sibling_index = arena[p].children.len();
                    arena[p].children.push(slot);
                    (arena[p].depth + 1, sibling_index)
                }
                None => (0, 0),
            };
            arena.push(TreeNode {
                graph_index,
                depth,
                parent,
                children: Vec::new(),
                sibling_index,
                prelim: 0.0,
                modifier: 0.0,
                shift: 0.0,
                change: 0.0,
                thread: None,
                ancestor: slot,
            });

            // Reversed so the leftmost child is popped (and attached) first.
            for &child in children_of[graph_index].iter().rev() {
                if !visited[child] {
                    stack.push((child, Some(slot)));
                }
            }
        }

        Some(Self { nodes: arena })
    }

    /// Arena index of the left sibling, if any.
    pub fn left_sibling(&self, v: usize) -> Option<usize> {
        let parent = self.nodes[v].parent?;
        let sibling_index = self.nodes[v].sibling_index;
        if sibling_index == 0 {
            None
        } else {
            Some(self.nodes[parent].children[sibling_index - 1])
        }
    }

    /// Arena index of the leftmost sibling (the node itself for a root or
    /// first child).
    pub fn leftmost_sibling(&self, v: usize) -> usize {
        match self.nodes[v].parent {
            Some(parent) => self.nodes[parent].children[0],
            None => v,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn nodes(ids: &[&str]) -> Vec<GraphNode> {
        ids.iter()
            .map(|id| GraphNode::new(*id, *id, NodeKind::Scalar))
            .collect()
    }

    fn edge(n: usize, s: &str, t: &str) -> GraphEdge {
        GraphEdge::new(format!("e{n}"), s, t)
    }

    fn id_at(arena: &TreeArena, nodes: &[GraphNode], v: usize) -> String {
        nodes[arena.nodes[v].graph_index].id.clone()
    }

    #[test]
    fn test_empty_input() {
        assert!(TreeArena::build(&[], &[]).is_none());
    }

    #[test]
    fn test_root_is_first_non_target() {
        let n = nodes(&["b", "a"]);
        // "b" is a target, so "a" becomes root even though it comes second.
        let e = vec![edge(1, "a", "b")];
        let arena = TreeArena::build(&n, &e).unwrap();
        assert_eq!(id_at(&arena, &n, TreeArena::ROOT), "a");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_root_fallback_when_every_node_is_a_target() {
        let n = nodes(&["a", "b"]);
        let e = vec![edge(1, "a", "b"), edge(2, "b", "a")];
        let arena = TreeArena::build(&n, &e).unwrap();
        assert_eq!(id_at(&arena, &n, TreeArena::ROOT), "a");
        // The back-edge to the root is ignored by the single-visit rule.
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.nodes[TreeArena::ROOT].children.len(), 1);
    }

    #[test]
    fn test_child_order_and_indices_follow_edges() {
        let n = nodes(&["r", "c", "a", "b"]);
        let e = vec![edge(1, "r", "c"), edge(2, "r", "a"), edge(3, "r", "b")];
        let arena = TreeArena::build(&n, &e).unwrap();
        let root = &arena.nodes[TreeArena::ROOT];
        let ids: Vec<String> = root
            .children
            .iter()
            .map(|&c| id_at(&arena, &n, c))
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
        for (i, &c) in root.children.iter().enumerate() {
            assert_eq!(arena.nodes[c].sibling_index, i);
            assert_eq!(arena.nodes[c].depth, 1);
        }
    }

    #[test]
    fn test_multi_parent_attaches_under_first_visitor() {
        // a → b, a → c, b → x, c → x: the descent through b reaches x first.
        let n = nodes(&["a", "b", "c", "x"]);
        let e = vec![
            edge(1, "a", "b"),
            edge(2, "a", "c"),
            edge(3, "b", "x"),
            edge(4, "c", "x"),
        ];
        let arena = TreeArena::build(&n, &e).unwrap();
        assert_eq!(arena.len(), 4);
        let x = arena
            .nodes
            .iter()
            .position(|t| n[t.graph_index].id == "x")
            .unwrap();
        let parent = arena.nodes[x].parent.unwrap();
        assert_eq!(id_at(&arena, &n, parent), "b");
        let c = arena
            .nodes
            .iter()
            .position(|t| n[t.graph_index].id == "c")
            .unwrap();
        assert!(arena.nodes[c].children.is_empty());
    }

    #[test]
    fn test_dangling_edges_dropped_and_unreachable_excluded() {
        let n = nodes(&["a", "b", "island"]);
        let e = vec![edge(1, "a", "b"), edge(2, "a", "ghost"), edge(3, "ghost", "b")];
        let arena = TreeArena::build(&n, &e).unwrap();
        // "island" has no path from the root and is left out.
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_self_loop_ignored() {
        let n = nodes(&["a", "b"]);
        let e = vec![edge(1, "a", "a"), edge(2, "a", "b")];
        let arena = TreeArena::build(&n, &e).unwrap();
        // The self-loop makes "a" a target and e2 makes "b" one, so the
        // fallback picks the first node.
        assert_eq!(id_at(&arena, &n, TreeArena::ROOT), "a");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.nodes[TreeArena::ROOT].children.len(), 1);
    }

    #[test]
    fn test_deep_chain_builds_without_recursion() {
        let count = 50_000;
        let n: Vec<GraphNode> = (0..count)
            .map(|i| GraphNode::new(format!("n{i}"), "", NodeKind::Scalar))
            .collect();
        let e: Vec<GraphEdge> = (1..count)
            .map(|i| GraphEdge::new(format!("e{i}"), format!("n{}", i - 1), format!("n{i}")))
            .collect();
        let arena = TreeArena::build(&n, &e).unwrap();
        assert_eq!(arena.len(), count);
        assert_eq!(arena.nodes[arena.len() - 1].depth, (count - 1) as u32);
    }
}
