//! Implementation of an in-memory kd tree for exact nearest neighbor search.
//!
//! A kd tree is a binary search tree where the data in each node is a k-dimensional
//! point. The tree is built once from a batch of points and queried read-only
//! afterwards. Any point type works as long as it can expose `k` coordinates by
//! index; the same point type can be indexed into trees of different dimensionality
//! by truncation.
//!
//! Three kinds of queries are supported: exact nearest neighbor
//! ([`KdTree::find_nearest`]), all neighbors within a squared radius
//! ([`KdTree::find_within`]) and in-order traversal of the stored values.
//! An optional [`KdTree::mark_partitions`] pass relabels nodes with the id of the
//! bisection region they fall into.
//!
//! ```rust
//! use kd_tree::{KdTree, euclidean_distance_squared};
//!
//! let points = vec![[0.1, 0.2], [0.2, 0.2], [1.1, 1.2], [2.2, 2.2]];
//! let tree = KdTree::build(points, 2).unwrap();
//! let (d, _) = tree.find_nearest(&[0.3, 0.3], euclidean_distance_squared).unwrap();
//! assert!((d - 0.02).abs() < 0.000001);
//! let neighbors = tree.find_within(&[0.3, 0.3], 0.1, euclidean_distance_squared);
//! assert_eq!(neighbors.len(), 2);
//! ```
pub mod error;
pub mod point;
pub mod node;
pub mod tree;

pub use error::Error;
pub use point::{KdPoint, euclidean_distance_squared};
pub use node::{KdNode, depth_first_inorder, collect_values, collect_leaf_values, count_nodes};
pub use tree::KdTree;
