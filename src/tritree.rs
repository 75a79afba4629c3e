//! The 3-D guillotine bin packer.
//!
//! A [`TriTree`] node is either empty (its [`BBox`] is free space) or split
//! into exactly three children — `right`, `down`, `out` — covering the space
//! left over after an item was placed in it. `fit` walks split nodes in a
//! fixed `right, down, out` order and, on reaching an empty node, either
//! rejects the item or places it and splits.

use crate::geom::{BBox, HasSize};

struct Split {
    right: Box<TriTree>,
    down: Box<TriTree>,
    out: Box<TriTree>,
}

/// A node in the trinary packing tree.
///
/// Ownership is strictly tree-shaped: a node's three children are owned
/// outright and never shared.
pub struct TriTree {
    bbox: BBox,
    split: Option<Split>,
}

impl TriTree {
    /// A fresh tree with all of `bbox` free.
    pub fn new(bbox: BBox) -> Self {
        Self { bbox, split: None }
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn is_empty(&self) -> bool {
        self.split.is_none()
    }

    /// Try to place `item` somewhere under this node.
    ///
    /// Returns the [`BBox`] the item was placed into, or `None` if there is
    /// no room anywhere in this subtree. A failed attempt never mutates the
    /// tree — splitting happens only on the call that actually places the
    /// item.
    pub fn fit(&mut self, item: &impl HasSize) -> Option<BBox> {
        if let Some(split) = &mut self.split {
            // Fixed exploration order: right, then down, then out.
            if let Some(placed) = split.right.fit(item) {
                return Some(placed);
            }
            if let Some(placed) = split.down.fit(item) {
                return Some(placed);
            }
            return split.out.fit(item);
        }

        let (w, h) = (item.width(), item.height());
        if w > self.bbox.width() || h > self.bbox.height() || self.bbox.depth() < 1 {
            return None;
        }

        let BBox { x0, y0, z0, x1, y1, z1 } = self.bbox;
        let placed = BBox::new(x0, y0, z0, x0 + w, y0 + h, z0 + 1);

        // Bottom strip spans the full width; the rightward strip only spans
        // the item's height. Inputs are pre-sorted tallest-first (see
        // `crate::pack`) so this ordering maximises the tall free space that
        // survives for the next (likely also tall) item.
        let right = BBox::new(x0 + w, y0, z0, x1, y0 + h, z0 + 1);
        let down = BBox::new(x0, y0 + h, z0, x1, y1, z0 + 1);
        let out = BBox::new(x0, y0, z0 + 1, x1, y1, z1);

        self.split = Some(Split {
            right: Box::new(Self::new(right)),
            down: Box::new(Self::new(down)),
            out: Box::new(Self::new(out)),
        });

        Some(placed)
    }
}
