use super::solver::DpTables;
use super::traversal::{InOrder, PreOrder, Traversal, TraversalOrder};
use crate::error::{InvalidInput, Result};

/// A node of the reconstructed tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

impl<K> Node<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    pub fn set_left(&mut self, child: Option<Box<Node<K>>>) {
        self.left = child;
    }

    pub fn set_right(&mut self, child: Option<Box<Node<K>>>) {
        self.right = child;
    }
}

enum Task {
    Range(usize, usize),
    Join(usize),
}

/// Rebuilds the subtree over `keys[start..end]` from the root table.
///
/// Returns `None` for an empty range. The walk keeps its own stack, so a
/// fully skewed tree costs heap rather than call-stack depth.
///
/// # Examples
///
/// ```
/// use optimal_bst::dynamic::{build_tree, solve};
///
/// let keys = [10, 20, 30];
/// let tables = solve(&keys, &[0.0, 0.1, 0.1, 0.6], &[0.05; 4]).unwrap();
/// let root = build_tree(&keys, &tables, 0, keys.len()).unwrap();
/// assert_eq!(*root.key(), 30);
/// assert_eq!(root.left().map(|n| *n.key()), Some(10));
/// ```
pub fn build_tree<K: Clone>(
    keys: &[K],
    tables: &DpTables,
    start: usize,
    end: usize,
) -> Option<Box<Node<K>>> {
    let mut tasks = vec![Task::Range(start, end)];
    let mut built: Vec<Option<Box<Node<K>>>> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Range(a, b) => match tables.root(a, b) {
                None => built.push(None),
                Some(r) => {
                    tasks.push(Task::Join(r));
                    tasks.push(Task::Range(r + 1, b));
                    tasks.push(Task::Range(a, r));
                }
            },
            Task::Join(r) => {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                let mut node = Node::new(keys[r].clone());
                node.set_left(left);
                node.set_right(right);
                built.push(Some(Box::new(node)));
            }
        }
    }

    built.pop().flatten()
}

/// The optimal tree over all keys of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K: Clone> OptimalTree<K> {
    pub(crate) fn from_tables(keys: &[K], tables: &DpTables) -> Self {
        Self {
            root: build_tree(keys, tables, 0, keys.len()),
            len: keys.len(),
        }
    }
}

impl<K> OptimalTree<K> {
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Number of real keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K>, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|child| (child, depth + 1)));
            stack.extend(node.right().map(|child| (child, depth + 1)));
        }
        height
    }

    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(self.root())
    }

    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self.root())
    }

    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, K> {
        match order {
            TraversalOrder::PreOrder => Traversal::Pre(self.pre_order()),
            TraversalOrder::InOrder => Traversal::In(self.in_order()),
        }
    }

    /// Expected number of comparisons of a search in this tree under the
    /// given probabilities, counting the root as depth 0:
    /// `Σ p[k] * (depth(key k) + 1) + Σ q[k] * (depth(gap k) + 1)`.
    ///
    /// For the tree built from an instance this equals the DP cost; it can
    /// also score the tree under a different distribution.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::LengthMismatch`] unless both `p` and `q` hold
    /// `len() + 1` entries.
    pub fn expected_search_cost(&self, p: &[f64], q: &[f64]) -> Result<f64> {
        let depths = self.key_depths();
        let n = depths.len();
        for (name, values) in [("p", p), ("q", q)] {
            if values.len() != n + 1 {
                return Err(InvalidInput::LengthMismatch {
                    name,
                    expected: n + 1,
                    actual: values.len(),
                }
                .into());
            }
        }

        let mut total = 0.0;
        for (k, depth) in depths.iter().enumerate() {
            total += p[k + 1] * (depth + 1) as f64;
        }
        // A gap hangs below the deeper of the two keys around it.
        for (gap, &prob) in q.iter().enumerate() {
            let before = gap.checked_sub(1).map(|k| depths[k]);
            let after = depths.get(gap).copied();
            let depth = match before.max(after) {
                Some(parent) => parent + 1,
                None => 0,
            };
            total += prob * (depth + 1) as f64;
        }
        Ok(total)
    }

    /// Depth of every key in ascending key order.
    fn key_depths(&self) -> Vec<usize> {
        let mut depths = Vec::with_capacity(self.len);
        let mut stack: Vec<(&Node<K>, usize)> = Vec::new();
        let mut current = self.root().map(|r| (r, 0));
        loop {
            while let Some((node, depth)) = current {
                stack.push((node, depth));
                current = node.left().map(|child| (child, depth + 1));
            }
            let Some((node, depth)) = stack.pop() else {
                break;
            };
            depths.push(depth);
            current = node.right().map(|child| (child, depth + 1));
        }
        depths
    }
}

impl<K: Ord> OptimalTree<K> {
    /// Depth of `key` (root is 0), or `None` if the search ends in a gap.
    pub fn depth_of(&self, key: &K) -> Option<usize> {
        let mut current = self.root();
        let mut depth = 0;
        while let Some(node) = current {
            current = match key.cmp(node.key()) {
                std::cmp::Ordering::Less => node.left(),
                std::cmp::Ordering::Greater => node.right(),
                std::cmp::Ordering::Equal => return Some(depth),
            };
            depth += 1;
        }
        None
    }
}

impl<K> Drop for OptimalTree<K> {
    // Unlink iteratively; the default recursive drop can overflow the stack
    // on a skewed tree.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
