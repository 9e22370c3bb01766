//! Holds the node struct of the kd tree plus read-only traversal helpers.
//!
//! Ownership is strictly tree shaped: a node exclusively owns its value and its
//! two optional children, so dropping the root releases the whole tree. There are
//! no parent links and no shared pointers; every search in this crate runs
//! top-down.

/// Represents a node of a kd tree.
///
/// Fields are only written during construction (and by the partition-marking
/// pass), so the split invariant cannot be broken from outside the crate.
#[derive(Debug, Clone)]
pub struct KdNode<T> {
    /// k-dimensional data element for the branching point
    pub(crate) value: T,
    /// which coordinate was used to split the data at this node
    pub(crate) axis: usize,
    /// level of this node in the tree; level of the root is 0.
    /// [`crate::KdTree::mark_partitions`] overwrites it with a partition id.
    pub(crate) level: usize,
    /// left sub-tree holds all points located to the left of the branching point
    pub(crate) left: Option<Box<KdNode<T>>>,
    /// right sub-tree holds all points located to the right of the branching point
    pub(crate) right: Option<Box<KdNode<T>>>,
}

impl<T> KdNode<T> {

    pub(crate) fn new(value: T, axis: usize, level: usize) -> Self {
        return Self { value, axis, level, left: None, right: None };
    }

    /// k-dimensional data element stored in this node
    ///
    /// This point has been used as the branching point at this node
    pub fn value(&self) -> &T { &self.value }

    /// The coordinate index this node splits on
    pub fn axis(&self) -> usize { self.axis }

    /// Depth of this node (root is 0), or its partition id once
    /// [`crate::KdTree::mark_partitions`] has run
    pub fn level(&self) -> usize { self.level }

    /// Borrows the left child of this node
    pub fn left(&self) -> Option<&KdNode<T>> {
        self.left.as_ref().map(|n| n.as_ref())
    }

    /// Borrows the right child of this node
    pub fn right(&self) -> Option<&KdNode<T>> {
        self.right.as_ref().map(|n| n.as_ref())
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool { self.left.is_none() && self.right.is_none() }
}

/// Visits nodes of a sub-tree in depth-first order, calling the action after
/// seeing the left sub-tree: left, node, right. Every node is visited exactly
/// once and nothing is mutated, so the traversal can be restarted freely.
pub fn depth_first_inorder<T, F: FnMut(&KdNode<T>)>(tree_node: &KdNode<T>, action: &mut F) {

    if let Some(left) = &tree_node.left { depth_first_inorder(left, action); }
    action(tree_node);
    if let Some(right) = &tree_node.right { depth_first_inorder(right, action); }
}

/// Collect all data values stored in a sub-tree rooted in a given node,
/// in traversal order of [`depth_first_inorder`].
pub fn collect_values<T>(tree_node: &KdNode<T>) -> Vec<&T> {

    fn collect_rec<'a, T>(tree_node: &'a KdNode<T>, store: &mut Vec<&'a T>) {
        if let Some(left) = &tree_node.left { collect_rec(left, store); }
        store.push(&tree_node.value);
        if let Some(right) = &tree_node.right { collect_rec(right, store); }
    }

    let mut ret: Vec<&T> = vec![];
    collect_rec(tree_node, &mut ret);

    return ret;
}

/// Collect data values stored in leaves of a sub-tree rooted in a given node
pub fn collect_leaf_values<T>(tree_node: &KdNode<T>) -> Vec<&T> {

    fn collect_rec<'a, T>(tree_node: &'a KdNode<T>, store: &mut Vec<&'a T>) {
        if let Some(left) = &tree_node.left { collect_rec(left, store); }
        if tree_node.is_leaf() { store.push(&tree_node.value); }
        if let Some(right) = &tree_node.right { collect_rec(right, store); }
    }

    let mut ret: Vec<&T> = vec![];
    collect_rec(tree_node, &mut ret);

    return ret;
}

/// Count all nodes of a given sub-tree, including the root node
pub fn count_nodes<T>(tree_node: &KdNode<T>) -> usize {

    let mut ret: usize = 0;
    depth_first_inorder(tree_node, &mut |_n| ret += 1);

    return ret;
}

#[cfg(test)]
mod test {

    use super::*;

    fn small_tree() -> KdNode<usize> {
        //             1
        //          /    \
        //         2      3
        //        / \
        //       4   5
        let mut root = KdNode::new(1, 0, 0);
        let mut left = KdNode::new(2, 1, 1);
        left.left = Some(Box::new(KdNode::new(4, 0, 2)));
        left.right = Some(Box::new(KdNode::new(5, 0, 2)));
        root.left = Some(Box::new(left));
        root.right = Some(Box::new(KdNode::new(3, 1, 1)));

        return root;
    }

    #[test]
    fn inorder_visits_every_node_once() {

        let root = small_tree();

        let mut node_cnt = 0;
        depth_first_inorder(&root, &mut |_n| node_cnt += 1);
        assert_eq!(node_cnt, 5);
        assert_eq!(count_nodes(&root), 5);

        assert!(root.left().is_some());
        assert_eq!(root.left().unwrap().value(), &2);
        let right = root.right().unwrap();
        assert!(right.is_leaf());
    }

    #[test]
    fn collected_values_follow_inorder() {

        let root = small_tree();

        let expected = vec![4, 2, 5, 1, 3];
        let collected = collect_values(&root);
        assert_eq!(collected.len(), expected.len());
        for (a, b) in expected.iter().zip(collected) {
            assert_eq!(a, b);
        }

        let leaves = collect_leaf_values(&root);
        assert_eq!(leaves, vec![&4, &5, &3]);
    }
}
