//! Painter's algorithm ordering.
//!
//! There is no depth buffer, so the draw order alone decides visibility:
//! items are drawn farthest first and nearer polygons overdraw them. The
//! order is only guaranteed correct for convex, mutually non-interpenetrating
//! geometry; overlapping meshes can sort wrongly.

use crate::render::RenderItem;

/// Sorts render items by depth, descending (farthest first).
///
/// The sort is stable, so faces at equal depth keep their submission order.
/// `total_cmp` gives NaN depths a fixed place instead of panicking.
pub fn sort_far_to_near(items: &mut [RenderItem]) {
    items.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
