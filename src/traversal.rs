use std::slice;

use crate::arena::{TokenId, TokenTree};
use crate::handle::TokenRef;

/// Direct children of a token in insertion order.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a TokenTree,
    ids: slice::Iter<'a, TokenId>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a TokenTree, ids: &'a [TokenId]) -> Self {
        Self {
            tree,
            ids: ids.iter(),
        }
    }

    fn resolve(&self, id: TokenId) -> Option<TokenRef<'a>> {
        self.tree
            .node(id)
            .map(|node| TokenRef::new(self.tree, id, node))
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = TokenRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        self.resolve(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        self.resolve(id)
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Depth-first pre-order walk, left to right.
#[derive(Clone)]
pub struct PreOrder<'a> {
    tree: &'a TokenTree,
    stack: Vec<TokenId>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(tree: &'a TokenTree, start: TokenId, include_start: bool) -> Self {
        let mut stack = Vec::new();
        if include_start {
            stack.push(start);
        } else if let Some(node) = tree.node(start) {
            stack.extend(node.children.iter().rev());
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = TokenRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some(TokenRef::new(self.tree, current, node));
            }
        }
        None
    }
}

/// Parent chain from a token up to its root, nearest first.
#[derive(Clone)]
pub struct Ancestors<'a> {
    tree: &'a TokenTree,
    next: Option<TokenId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a TokenTree, first: Option<TokenId>) -> Self {
        Self { tree, next: first }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = TokenRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let node = self.tree.node(current)?;
        self.next = node.parent;
        Some(TokenRef::new(self.tree, current, node))
    }
}
