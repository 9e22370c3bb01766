//! Implementation of kd-tree creation and querying

use crate::error::Error;
use crate::node::{depth_first_inorder, KdNode};
use crate::point::KdPoint;

/// A balanced kd tree built once from a batch of points.
///
/// The tree owns its points: they are moved in by [`KdTree::build`] and handed
/// back only by reference. After construction the structure is read-only except
/// for the single [`KdTree::mark_partitions`] pass; callers must not run that
/// pass concurrently with queries against the same tree.
#[derive(Debug, Clone)]
pub struct KdTree<T> {
    root: Option<Box<KdNode<T>>>,
    dimensionality: usize,
}

impl<T: KdPoint> KdTree<T> {

    /// Creates a new kd tree for a given batch of k-dimensional points.
    ///
    /// Points are consumed and reordered while the tree is being built: at depth
    /// `d` the current slice is partitioned around its median along coordinate
    /// `d % dimensionality` (a selection step, not a full sort), the median
    /// element becomes the branching point and both sub-slices recurse. The
    /// result is balanced, with sibling subtree sizes differing by at most one.
    ///
    /// Empty input is allowed and produces a tree with no root.
    ///
    /// # Arguments
    /// * `points` - the k-dimensional points, moved into the tree
    /// * `dimensionality` - the number of dimensions used for each point
    ///
    /// ```rust
    /// use kd_tree::KdTree;
    /// let points = vec![[0.1, 0.2], [0.2, 0.2], [1.1, 1.2], [2.2, 2.2]];
    /// let tree = KdTree::build(points, 2).unwrap();
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn build(points: Vec<T>, dimensionality: usize) -> Result<Self, Error> {

        if dimensionality == 0 {
            return Err(Error::InvalidDimension { requested: 0, available: 0 });
        }
        for point in &points {
            if point.num_coords() < dimensionality {
                return Err(Error::InvalidDimension {
                    requested: dimensionality,
                    available: point.num_coords(),
                });
            }
        }

        let root = build_rec(points, 0, dimensionality);

        return Ok(Self { root, dimensionality });
    }

    /// The number of dimensions this tree splits on
    pub fn dimensionality(&self) -> usize { self.dimensionality }

    /// Borrows the root node, if any
    pub fn root(&self) -> Option<&KdNode<T>> {
        self.root.as_ref().map(|n| n.as_ref())
    }

    /// The number of points stored in the tree
    pub fn len(&self) -> usize {
        let mut cnt = 0;
        self.inorder(&mut |_n| cnt += 1);
        return cnt;
    }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Visits every node in depth-first in-order (left, node, right). A no-op
    /// on an empty tree.
    pub fn inorder<F: FnMut(&KdNode<T>)>(&self, action: &mut F) {
        if let Some(root) = &self.root {
            depth_first_inorder(root, action);
        }
    }

    /// Collects references to all stored points in in-order traversal order
    pub fn collect_values(&self) -> Vec<&T> {
        return match &self.root {
            Some(root) => crate::node::collect_values(root),
            None => vec![],
        };
    }

    /// Finds the point nearest to a given query.
    ///
    /// The descent always tries the side of the splitting plane the query falls
    /// on first; the far side is entered only when the plane itself is closer
    /// than the best distance found so far. The answer is exact: it matches a
    /// brute-force scan under the same distance function. On exact ties the
    /// point visited earliest during the descent is kept.
    ///
    /// Fails with [`Error::EmptyTree`] when the tree has no root; an empty tree
    /// has no nearest neighbor.
    ///
    /// # Arguments
    /// * `query` - a query point
    /// * `distance` - distance function; must decompose additively per axis
    ///
    /// ```rust
    /// use kd_tree::{KdTree, euclidean_distance_squared};
    /// let points = vec![[0.1, 0.2], [0.2, 0.2], [1.1, 1.2], [2.2, 2.2]];
    /// let tree = KdTree::build(points, 2).unwrap();
    /// let (d, nearest) = tree.find_nearest(&[0.3, 0.3], euclidean_distance_squared).unwrap();
    /// assert!((d - 0.02).abs() < 0.000001);
    /// assert_eq!(nearest, &[0.2, 0.2]);
    /// ```
    pub fn find_nearest<F>(&self, query: &T, distance: F) -> Result<(f64, &T), Error>
        where F: Fn(&T, &T, usize) -> f64 {

        let root = self.root.as_ref().ok_or(Error::EmptyTree)?;

        let mut best_dist = f64::INFINITY;
        let mut best: &T = root.value();
        nearest_rec(root, query, self.dimensionality, &distance, &mut best_dist, &mut best);

        return Ok((best_dist, best));
    }

    /// Finds all points within a given squared radius from a query.
    ///
    /// The ball is closed: points exactly at `radius_squared` are included.
    /// Returns an empty vector (not an error) when nothing matches or the tree
    /// has no root. No ordering is guaranteed on the result.
    ///
    /// # Arguments
    /// * `query` - a query point
    /// * `radius_squared` - the search cutoff, in squared-distance units
    /// * `distance` - distance function; must decompose additively per axis
    ///
    /// ```rust
    /// use kd_tree::{KdTree, euclidean_distance_squared};
    /// let points = vec![[0.1, 0.2], [0.2, 0.2], [1.1, 1.2], [2.2, 2.2]];
    /// let tree = KdTree::build(points, 2).unwrap();
    /// let neighbors = tree.find_within(&[0.3, 0.3], 0.1, euclidean_distance_squared);
    /// assert_eq!(neighbors.len(), 2);
    /// ```
    pub fn find_within<F>(&self, query: &T, radius_squared: f64, distance: F) -> Vec<&T>
        where F: Fn(&T, &T, usize) -> f64 {

        let mut ret: Vec<&T> = vec![];
        if let Some(root) = &self.root {
            within_rec(root, query, self.dimensionality, radius_squared, &distance, &mut ret);
        }

        return ret;
    }

    /// Overwrites node levels with partition ids.
    ///
    /// Nodes are grouped into `2^max_depth` partitions by which side of each of
    /// the first `max_depth` splits they fall on. Ids follow heap numbering
    /// relative to the marked root (root 1, left child `2i`, right `2i + 1`):
    /// every node at depth `max_depth` or deeper receives the id of its ancestor
    /// at depth exactly `max_depth`, while shallower nodes keep their true
    /// depth. Partition ids are therefore consistent with spatial order: of two
    /// sibling partitions the lower-numbered one lies on the low-coordinate
    /// side of their ancestor's split axis.
    ///
    /// This pass mutates the tree in place and destroys the original depth
    /// values of the marked nodes; capture them beforehand if both are needed.
    ///
    /// # Arguments
    /// * `max_depth` - how many leading splits define the partitions
    /// * `start_depth` - the depth attributed to the root being marked
    pub fn mark_partitions(&mut self, max_depth: usize, start_depth: usize) {
        if let Some(root) = &mut self.root {
            mark_rec(root, start_depth, 1, max_depth, 0);
        }
    }
}

fn build_rec<T: KdPoint>(mut points: Vec<T>, depth: usize, dimensionality: usize) -> Option<Box<KdNode<T>>> {

    if points.is_empty() { return None; }

    let axis = depth % dimensionality;
    let median = points.len() / 2;
    points.select_nth_unstable_by(median, |a, b| a.coord(axis).total_cmp(&b.coord(axis)));

    // points now ends at the median element; everything after it goes right
    let right_points = points.split_off(median + 1);
    let value = points.pop()?;
    let left_points = points;

    let mut node = KdNode::new(value, axis, depth);
    node.left = build_rec(left_points, depth + 1, dimensionality);
    node.right = build_rec(right_points, depth + 1, dimensionality);

    return Some(Box::new(node));
}

fn nearest_rec<'a, T, F>(node: &'a KdNode<T>, query: &T, dimensionality: usize,
                         distance: &F, best_dist: &mut f64, best: &mut &'a T)
    where T: KdPoint, F: Fn(&T, &T, usize) -> f64 {

    let d = distance(node.value(), query, dimensionality);
    if d < *best_dist {
        *best_dist = d;
        *best = node.value();
    }

    let delta = query.coord(node.axis) - node.value().coord(node.axis);
    let (near, far) = if delta <= 0.0 {
        (&node.left, &node.right)
    } else {
        (&node.right, &node.left)
    };

    if let Some(near) = near {
        nearest_rec(near, query, dimensionality, distance, best_dist, best);
    }
    // the far side can only hold a closer point if the splitting plane itself
    // is closer than the current best
    if delta * delta < *best_dist {
        if let Some(far) = far {
            nearest_rec(far, query, dimensionality, distance, best_dist, best);
        }
    }
}

fn within_rec<'a, T, F>(node: &'a KdNode<T>, query: &T, dimensionality: usize,
                        radius_squared: f64, distance: &F, found: &mut Vec<&'a T>)
    where T: KdPoint, F: Fn(&T, &T, usize) -> f64 {

    let d = distance(node.value(), query, dimensionality);
    if d <= radius_squared { found.push(node.value()); }

    let delta = query.coord(node.axis) - node.value().coord(node.axis);
    let (near, far) = if delta <= 0.0 {
        (&node.left, &node.right)
    } else {
        (&node.right, &node.left)
    };

    if let Some(near) = near {
        within_rec(near, query, dimensionality, radius_squared, distance, found);
    }
    // matches may lie on both sides, so the far subtree is skipped only when
    // the splitting plane is already outside the ball
    if delta * delta <= radius_squared {
        if let Some(far) = far {
            within_rec(far, query, dimensionality, radius_squared, distance, found);
        }
    }
}

fn mark_rec<T>(node: &mut KdNode<T>, depth: usize, id: usize, max_depth: usize, inherited_mark: usize) {

    let mut mark = inherited_mark;
    if depth <= max_depth { mark = id; }
    if depth >= max_depth { node.level = mark; }

    if let Some(left) = &mut node.left {
        mark_rec(left, depth + 1, id * 2, max_depth, mark);
    }
    if let Some(right) = &mut node.right {
        mark_rec(right, depth + 1, id * 2 + 1, max_depth, mark);
    }
}
