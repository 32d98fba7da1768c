use std::fmt;

use super::tree::Node;

/// One visited node: its key and the keys of its children, if present.
#[derive(Debug, PartialEq, Eq)]
pub struct Visit<'a, K> {
    pub key: &'a K,
    pub left: Option<&'a K>,
    pub right: Option<&'a K>,
}

impl<'a, K> Visit<'a, K> {
    fn of(node: &'a Node<K>) -> Self {
        Self {
            key: node.key(),
            left: node.left().map(Node::key),
            right: node.right().map(Node::key),
        }
    }
}

impl<K> Clone for Visit<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Visit<'_, K> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree.
    InOrder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::PreOrder => f.write_str("Preorder"),
            TraversalOrder::InOrder => f.write_str("Inorder"),
        }
    }
}

/// Lazy pre-order walk. A clone continues from the same position.
#[derive(Debug)]
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = Visit<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(Visit::of(node))
    }
}

/// Lazy in-order walk; yields keys in ascending order.
#[derive(Debug)]
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    current: Option<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = Visit<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }
        let node = self.stack.pop()?;
        self.current = node.right();
        Some(Visit::of(node))
    }
}

/// Either walk, picked at runtime.
#[derive(Debug)]
pub enum Traversal<'a, K> {
    Pre(PreOrder<'a, K>),
    In(InOrder<'a, K>),
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = Visit<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::Pre(walk) => walk.next(),
            Traversal::In(walk) => walk.next(),
        }
    }
}
