//! Linear-time tidy tree positioning.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run
//! in Linear Time" (Buchheim, Junger, Leipert, 2002) over the tree arena.
//!
//! 1. **First walk (bottom-up):** assigns preliminary primary-axis
//!    coordinates by merging subtree contours. `thread` shortcuts let a
//!    contour walk skip straight to the next relevant node instead of
//!    re-descending, which bounds the whole pass to O(n). A required shift
//!    is not applied as one jump: `shift`/`change` bookkeeping spreads it
//!    across the sibling subtrees between the conflicting pair.
//! 2. **Second walk (top-down):** resolves `prelim` plus accumulated
//!    ancestor modifiers into absolute primary coordinates; the depth axis
//!    is `depth * level_separation`.
//!
//! Both walks run on explicit work stacks so native stack usage stays flat
//! no matter how deep the tree is.

use super::LayoutOptions;
use super::tree::TreeArena;

/// Raw coordinates for one arena node, before orientation and framing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawPlacement {
    pub arena_index: usize,
    /// Position along the sibling axis.
    pub primary: f64,
    /// Position along the root-to-leaves axis.
    pub depth: f64,
}

/// Postorder frame: which child to descend into next, and the default
/// ancestor for contour merges among the children placed so far.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next_child: usize,
    default_ancestor: usize,
}

/// First walk: bottom-up assignment of `prelim` and `modifier`.
pub(crate) fn first_walk(arena: &mut TreeArena, options: &LayoutOptions) {
    let mut stack = vec![Frame {
        node: TreeArena::ROOT,
        next_child: 0,
        default_ancestor: TreeArena::ROOT,
    }];

    while let Some(Frame {
        node: v, next_child, ..
    }) = stack.last().copied()
    {
        if next_child < arena.nodes[v].children.len() {
            let w = arena.nodes[v].children[next_child];
            if let Some(frame) = stack.last_mut() {
                frame.next_child += 1;
            }
            stack.push(Frame {
                node: w,
                next_child: 0,
                default_ancestor: w,
            });
            continue;
        }

        finalize(arena, v, options);
        stack.pop();

        // The subtree under v is done: merge it against the contours of the
        // siblings already placed under v's parent.
        if let Some(parent) = stack.len().checked_sub(1) {
            if stack[parent].next_child == 1 {
                stack[parent].default_ancestor = v;
            }
            let mut default_ancestor = stack[parent].default_ancestor;
            apportion(arena, v, &mut default_ancestor, options);
            stack[parent].default_ancestor = default_ancestor;
        }
    }
}

/// Assign `prelim` (and `modifier` for anchored interior nodes) once all of
/// v's children are placed.
fn finalize(arena: &mut TreeArena, v: usize, options: &LayoutOptions) {
    if arena.nodes[v].children.is_empty() {
        arena.nodes[v].prelim = match arena.left_sibling(v) {
            Some(left) => arena.nodes[left].prelim + options.sibling_separation,
            None => 0.0,
        };
        return;
    }

    execute_shifts(arena, v);

    let first = arena.nodes[v].children[0];
    let last = arena.nodes[v].children[arena.nodes[v].children.len() - 1];
    let midpoint = (arena.nodes[first].prelim + arena.nodes[last].prelim) / 2.0;

    match arena.left_sibling(v) {
        Some(left) => {
            // Anchor next to the left sibling; the gap to the midpoint is
            // applied lazily to the descendants via the modifier.
            let prelim = arena.nodes[left].prelim + options.sibling_separation;
            arena.nodes[v].prelim = prelim;
            arena.nodes[v].modifier = prelim - midpoint;
        }
        None => arena.nodes[v].prelim = midpoint,
    }
}

/// Next node on the left contour: first child, or the thread shortcut.
fn next_left(arena: &TreeArena, v: usize) -> Option<usize> {
    arena.nodes[v].children.first().copied().or(arena.nodes[v].thread)
}

/// Next node on the right contour: last child, or the thread shortcut.
fn next_right(arena: &TreeArena, v: usize) -> Option<usize> {
    arena.nodes[v].children.last().copied().or(arena.nodes[v].thread)
}

/// Merge the subtree rooted at v against the combined right contour of its
/// left siblings, shifting v's subtree right as far as needed and threading
/// the uneven contour ends.
///
/// Naming follows the paper: i = inner, o = outer, p = the + (right)
/// subtree, m = the - (left) one; `s*` are the running modifier sums.
fn apportion(arena: &mut TreeArena, v: usize, default_ancestor: &mut usize, options: &LayoutOptions) {
    let Some(w) = arena.left_sibling(v) else {
        return;
    };

    let mut vip = v;
    let mut vop = v;
    let mut vim = w;
    let mut vom = arena.leftmost_sibling(v);

    let mut sip = arena.nodes[vip].modifier;
    let mut sop = arena.nodes[vop].modifier;
    let mut sim = arena.nodes[vim].modifier;
    let mut som = arena.nodes[vom].modifier;

    while let (Some(nim), Some(nip)) = (next_right(arena, vim), next_left(arena, vip)) {
        vim = nim;
        vip = nip;
        if let Some(n) = next_left(arena, vom) {
            vom = n;
        }
        if let Some(n) = next_right(arena, vop) {
            vop = n;
        }
        arena.nodes[vop].ancestor = v;

        let separation = if arena.nodes[vim].parent == arena.nodes[vip].parent {
            options.sibling_separation
        } else {
            options.subtree_separation
        };
        let shift = (arena.nodes[vim].prelim + sim) - (arena.nodes[vip].prelim + sip) + separation;
        if shift > 0.0 {
            let ancestor = resolve_ancestor(arena, vim, v, *default_ancestor);
            move_subtree(arena, ancestor, v, shift);
            sip += shift;
            sop += shift;
        }

        sim += arena.nodes[vim].modifier;
        sip += arena.nodes[vip].modifier;
        som += arena.nodes[vom].modifier;
        sop += arena.nodes[vop].modifier;
    }

    if next_right(arena, vim).is_some() && next_right(arena, vop).is_none() {
        arena.nodes[vop].thread = next_right(arena, vim);
        arena.nodes[vop].modifier += sim - sop;
    }
    if next_left(arena, vip).is_some() && next_left(arena, vom).is_none() {
        arena.nodes[vom].thread = next_left(arena, vip);
        arena.nodes[vom].modifier += sip - som;
        *default_ancestor = v;
    }
}

/// The greatest distinct ancestor of the conflicting left-contour node that
/// is a sibling of v, falling back to the default ancestor.
fn resolve_ancestor(arena: &TreeArena, vim: usize, v: usize, default_ancestor: usize) -> usize {
    let ancestor = arena.nodes[vim].ancestor;
    if arena.nodes[ancestor].parent == arena.nodes[v].parent {
        ancestor
    } else {
        default_ancestor
    }
}

/// Shift the subtree under wp right and record how much of that shift the
/// subtrees between wm and wp should each absorb.
fn move_subtree(arena: &mut TreeArena, wm: usize, wp: usize, shift: f64) {
    let subtrees =
        (arena.nodes[wp].sibling_index as f64 - arena.nodes[wm].sibling_index as f64).max(1.0);
    let per_subtree = shift / subtrees;

    arena.nodes[wp].change -= per_subtree;
    arena.nodes[wp].shift += shift;
    arena.nodes[wm].change += per_subtree;
    arena.nodes[wp].prelim += shift;
    arena.nodes[wp].modifier += shift;
}

/// Apply the recorded shifts to v's children, right to left, so spacing
/// corrections fan out gradually instead of jumping at the conflict point.
fn execute_shifts(arena: &mut TreeArena, v: usize) {
    let mut shift = 0.0;
    let mut change = 0.0;
    for i in (0..arena.nodes[v].children.len()).rev() {
        let child = arena.nodes[v].children[i];
        arena.nodes[child].prelim += shift;
        arena.nodes[child].modifier += shift;
        change += arena.nodes[child].change;
        shift += arena.nodes[child].shift + change;
    }
}

/// Second walk: preorder resolution of `prelim` + ancestor modifiers into
/// raw coordinates, one record per node in traversal order.
pub(crate) fn second_walk(arena: &TreeArena, level_separation: f64) -> Vec<RawPlacement> {
    let mut placements = Vec::with_capacity(arena.len());
    let mut stack: Vec<(usize, f64)> = vec![(TreeArena::ROOT, 0.0)];

    while let Some((v, modifier_sum)) = stack.pop() {
        let node = &arena.nodes[v];
        placements.push(RawPlacement {
            arena_index: v,
            primary: node.prelim + modifier_sum,
            depth: f64::from(node.depth) * level_separation,
        });
        for &child in node.children.iter().rev() {
            stack.push((child, modifier_sum + node.modifier));
        }
    }
    placements
}
