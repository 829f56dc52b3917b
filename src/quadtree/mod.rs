//! # Region quad-tree over a bounded plane
//!
//! The tree partitions a `width x height` rectangle anchored at the origin.
//! Every node covers exactly one quadrant of its parent, numbered the same
//! way as map tiles (see [`crate::tile`]):
//!
//! ```text
//!   x < half_w | x >= half_w
//! +------------+------------+
//! |     0      |     1      |  y < half_h
//! +------------+------------+
//! |     2      |     3      |  y >= half_h
//! +------------+------------+
//! ```
//!
//! ## Insertion
//!
//! A node starts as a leaf holding up to `max_items` entries. The entry that
//! would overflow a leaf with depth budget left turns it into an internal node
//! with four children; the existing entries move down in their original order
//! and the leaf list is dropped. Leaves at depth budget zero grow without
//! bound. Nodes never collapse back.
//!
//! Coordinates are stored relative to the node that holds them: descending
//! into a quadrant reduces `x` and `y` modulo the half extents.
//!
//! ## Lookup
//!
//! A [`TilePath`] addresses a node by its quadrant digits. Descent stops at
//! the first leaf, so a path deeper than the tree resolves to the leaf that
//! covers the requested region.

mod iter;


pub use iter::Iter;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::tile::{Quadrant, TilePath};
use crate::types::TreeStats;

/// A stored object together with its node-local coordinates.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub x: f64,
    pub y: f64,
    pub object: T,
}

#[derive(Debug)]
enum NodeKind<T> {
    Leaf(Vec<Entry<T>>),
    Internal(Box<[QuadNode<T>; 4]>),
}

/// A node of the quad-tree: either a leaf with entries or four children.
#[derive(Debug)]
pub struct QuadNode<T> {
    half_width: f64,
    half_height: f64,
    max_items: usize,
    max_depth: u32,
    kind: NodeKind<T>,
}

impl<T> QuadNode<T> {
    /// Create an empty leaf covering `[0, width) x [0, height)`.
    pub fn new(width: f64, height: f64, max_items: usize, max_depth: u32) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
            max_items,
            max_depth,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Subdivisions still allowed below this node.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Entries of a leaf, `None` for internal nodes.
    pub fn entries(&self) -> Option<&[Entry<T>]> {
        match &self.kind {
            NodeKind::Leaf(entries) => Some(entries),
            NodeKind::Internal(_) => None,
        }
    }

    /// Children in quadrant order, `None` for leaves.
    pub fn children(&self) -> Option<&[QuadNode<T>; 4]> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal(children) => Some(children),
        }
    }

    /// Insert `object` at node-local position `(x, y)`.
    pub fn insert(&mut self, x: f64, y: f64, object: T) {
        match &mut self.kind {
            NodeKind::Leaf(entries) if self.max_depth == 0 || entries.len() < self.max_items => {
                entries.push(Entry { x, y, object });
            }
            NodeKind::Leaf(_) => {
                self.subdivide();
                self.insert(x, y, object);
            }
            NodeKind::Internal(children) => {
                let quadrant = Quadrant::locate(x, y, self.half_width, self.half_height);
                children[quadrant.index()].insert(
                    x % self.half_width,
                    y % self.half_height,
                    object,
                );
            }
        }
    }

    fn subdivide(&mut self) {
        log::trace!(
            "subdividing {}x{} node, {} levels left",
            self.half_width * 2.0,
            self.half_height * 2.0,
            self.max_depth
        );

        let children = Box::new(std::array::from_fn(|_| {
            QuadNode::new(
                self.half_width,
                self.half_height,
                self.max_items,
                self.max_depth - 1,
            )
        }));

        if let NodeKind::Leaf(entries) =
            std::mem::replace(&mut self.kind, NodeKind::Internal(children))
        {
            for entry in entries {
                self.insert(entry.x, entry.y, entry.object);
            }
        }
    }

    /// Resolve a digit path such as `"0312"` to the node it addresses.
    ///
    /// The whole path is validated first: any character outside `'0'..='3'`
    /// yields [`IndexError::InvalidPath`](crate::IndexError::InvalidPath),
    /// even if descent would have stopped at a leaf before reaching it.
    pub fn get_subtree(&self, path: &str) -> Result<&QuadNode<T>> {
        let path: TilePath = path.parse()?;
        Ok(self.subtree(&path))
    }

    /// Follow `path` from this node, stopping early at a leaf.
    pub fn subtree(&self, path: &TilePath) -> &QuadNode<T> {
        let mut node = self;
        for quadrant in path.quadrants() {
            match &node.kind {
                NodeKind::Leaf(_) => break,
                NodeKind::Internal(children) => node = &children[quadrant.index()],
            }
        }
        node
    }

    /// Path from this node to the leaf that holds, or would hold, `(x, y)`.
    pub fn locate(&self, x: f64, y: f64) -> TilePath {
        let mut path = TilePath::root();
        let (mut x, mut y) = (x, y);
        let mut node = self;

        while let NodeKind::Internal(children) = &node.kind {
            let quadrant = Quadrant::locate(x, y, node.half_width, node.half_height);
            x %= node.half_width;
            y %= node.half_height;
            path.push(quadrant);
            node = &children[quadrant.index()];
        }

        path
    }

    /// Objects stored under this node: leaf entries in insertion order,
    /// children visited in quadrant order.
    pub fn collect(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Lazy equivalent of [`collect`](Self::collect).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Number of objects stored under this node.
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.len(),
            NodeKind::Internal(children) => children.iter().map(QuadNode::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.accumulate_stats(0, &mut stats);
        stats
    }

    fn accumulate_stats(&self, level: u32, stats: &mut TreeStats) {
        stats.node_count += 1;
        stats.depth = stats.depth.max(level);

        match &self.kind {
            NodeKind::Leaf(entries) => {
                stats.leaf_count += 1;
                stats.object_count += entries.len();
            }
            NodeKind::Internal(children) => {
                stats.internal_count += 1;
                for child in children.iter() {
                    child.accumulate_stats(level + 1, stats);
                }
            }
        }
    }
}

/// Quad-tree rooted at a single node covering the whole plane.
///
/// # Examples
///
/// ```
/// use quadtile::QuadTree;
///
/// let mut tree = QuadTree::new(1000.0, 1000.0, 2, 3);
/// tree.insert(10.0, 10.0, "a");
/// tree.insert(20.0, 20.0, "b");
/// tree.insert(600.0, 600.0, "c");
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.get_subtree("3").unwrap().collect(), vec![&"c"]);
/// ```
#[derive(Debug)]
pub struct QuadTree<T> {
    root: QuadNode<T>,
    len: usize,
}

impl<T> QuadTree<T> {
    pub fn new(width: f64, height: f64, max_items: usize, max_depth: u32) -> Self {
        Self {
            root: QuadNode::new(width, height, max_items, max_depth),
            len: 0,
        }
    }

    pub fn with_config(config: &IndexConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.max_items,
            config.max_depth,
        )
    }

    /// Insert `object` at plane position `(x, y)`.
    pub fn insert(&mut self, x: f64, y: f64, object: T) {
        self.root.insert(x, y, object);
        self.len += 1;
    }

    #[inline]
    pub fn root(&self) -> &QuadNode<T> {
        &self.root
    }

    /// See [`QuadNode::get_subtree`].
    pub fn get_subtree(&self, path: &str) -> Result<&QuadNode<T>> {
        self.root.get_subtree(path)
    }

    pub fn subtree(&self, path: &TilePath) -> &QuadNode<T> {
        self.root.subtree(path)
    }

    pub fn locate(&self, x: f64, y: f64) -> TilePath {
        self.root.locate(x, y)
    }

    pub fn collect(&self) -> Vec<&T> {
        self.root.collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.root.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> TreeStats {
        self.root.stats()
    }
}

impl<'a, T> IntoIterator for &'a QuadTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
