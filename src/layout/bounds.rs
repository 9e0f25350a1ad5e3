//! Orientation mapping and frame normalization.
//!
//! The positioning walks only know a "primary" (sibling) axis and a "depth"
//! (root-to-leaves) axis. This pass maps those onto screen x/y for the
//! requested direction and translates the point set into a non-negative
//! frame. Coordinates are node-box centers, so the translation target is
//! half a node box on each axis: every box then lies fully inside the
//! positive quadrant.

use super::{Direction, LayoutOptions};

/// Map `(primary, depth)` pairs to screen coordinates in place.
///
/// `top-down` keeps primary = x, depth = y; `left-right` swaps the axes
/// instead of re-running the walks, which is valid because the walks are
/// agnostic to which screen axis each logical axis maps to.
pub(crate) fn normalize(points: &mut [(f64, f64)], options: &LayoutOptions) {
    if points.is_empty() {
        return;
    }

    if options.direction == Direction::LeftRight {
        for p in points.iter_mut() {
            *p = (p.1, p.0);
        }
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for &(x, y) in points.iter() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
    }

    let (margin_x, margin_y) = margins(options);
    let dx = margin_x - min_x;
    let dy = margin_y - min_y;
    for p in points.iter_mut() {
        p.0 += dx;
        p.1 += dy;
    }
}

/// The frame margin: half a node box per screen axis.
pub(crate) fn margins(options: &LayoutOptions) -> (f64, f64) {
    (options.node_width / 2.0, options.node_height / 2.0)
}
