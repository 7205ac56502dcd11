use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::handle::TokenRef;
use crate::token::Token;
use crate::traversal::PreOrder;

/// Handle naming one token inside a [`TokenTree`].
///
/// Ids are generational: once a token is discarded its id never resolves
/// again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(Index);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

/// Tree node in the arena: the token plus its links.
#[derive(Debug)]
pub struct TreeNode {
    pub(crate) token: Token,
    /// Non-owning back-reference, None for detached tokens and roots
    pub(crate) parent: Option<TokenId>,
    /// Owned children in insertion order
    pub(crate) children: Vec<TokenId>,
}

/// Arena owning every token of one or more parse trees.
///
/// The arena is the single owner; parent and child links are ids. A token
/// is a child of at most one parent and every child link has a matching
/// back-reference. Dropping the arena drops all trees in it.
#[derive(Debug)]
pub struct TokenTree {
    arena: Arena<TreeNode>,
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Stores a standalone token (no parent, no children).
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, token: Token) -> TokenId {
        TokenId(self.arena.insert(TreeNode {
            token,
            parent: None,
            children: Vec::new(),
        }))
    }

    /// Number of tokens currently stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.arena.contains(id.0)
    }

    pub(crate) fn node(&self, id: TokenId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    fn node_checked(&self, id: TokenId) -> TreeResult<&TreeNode> {
        self.node(id).ok_or(TreeError::UnknownToken(id))
    }

    fn node_mut(&mut self, id: TokenId) -> TreeResult<&mut TreeNode> {
        self.arena.get_mut(id.0).ok_or(TreeError::UnknownToken(id))
    }

    /// Borrowed view of a token with its node-level queries.
    pub fn get(&self, id: TokenId) -> TreeResult<TokenRef<'_>> {
        let node = self.node_checked(id)?;
        Ok(TokenRef::new(self, id, node))
    }

    pub fn token(&self, id: TokenId) -> TreeResult<&Token> {
        Ok(&self.node_checked(id)?.token)
    }

    pub fn parent(&self, id: TokenId) -> TreeResult<Option<TokenId>> {
        Ok(self.node_checked(id)?.parent)
    }

    pub fn children(&self, id: TokenId) -> TreeResult<&[TokenId]> {
        Ok(&self.node_checked(id)?.children)
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// A child that already has a parent is detached from it first, so the
    /// token moves rather than appearing twice. Adding a token below itself
    /// or below one of its own descendants is rejected and leaves the tree
    /// untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, parent: TokenId, child: TokenId) -> TreeResult<()> {
        self.node_checked(parent)?;
        self.node_checked(child)?;
        if parent == child {
            return Err(TreeError::SelfParent(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::CycleDetected { parent, child });
        }

        if let Some(previous) = self.detach(child)? {
            debug!("Moving {} from {} to {}", child, previous, parent);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Removes the first occurrence of `child` from `parent` and clears its
    /// back-reference.
    ///
    /// Returns `false` without touching anything when `child` is not a child
    /// of `parent`; removal is idempotent.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, parent: TokenId, child: TokenId) -> TreeResult<bool> {
        let children = &mut self.node_mut(parent)?.children;
        let Some(pos) = children.iter().position(|&c| c == child) else {
            debug!("{} is not a child of {}, nothing to remove", child, parent);
            return Ok(false);
        };
        children.remove(pos);

        if let Some(node) = self.arena.get_mut(child.0) {
            if node.parent == Some(parent) {
                node.parent = None;
            }
        }
        Ok(true)
    }

    /// Detaches `id` from its parent, returning the former parent.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, id: TokenId) -> TreeResult<Option<TokenId>> {
        let Some(parent) = self.node_checked(id)?.parent else {
            return Ok(None);
        };
        self.remove(parent, id)?;
        Ok(Some(parent))
    }

    /// Drops `id` and its whole subtree from the arena.
    ///
    /// The subtree is detached from its parent first. Returns the number of
    /// tokens dropped; their ids become unknown.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: TokenId) -> TreeResult<usize> {
        self.detach(id)?;
        let doomed: Vec<TokenId> = PreOrder::new(self, id, true).map(|t| t.id()).collect();
        for &dead in &doomed {
            self.arena.remove(dead.0);
        }
        debug!("Discarded {} tokens below and including {}", doomed.len(), id);
        Ok(doomed.len())
    }

    /// Adds `name` to the tags of `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn tag(&mut self, id: TokenId, name: &str) -> TreeResult<()> {
        self.node_mut(id)?.token.tag(name);
        Ok(())
    }

    /// True when `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: TokenId, id: TokenId) -> bool {
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.node(idx).and_then(|n| n.parent);
        }
        false
    }

    #[instrument(level = "trace", skip(self))]
    pub fn has_under(&self, id: TokenId, tag: Option<&str>) -> TreeResult<bool> {
        Ok(self.get(id)?.has_under(tag))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn value(&self, id: TokenId) -> TreeResult<String> {
        Ok(self.get(id)?.value())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn length(&self, id: TokenId) -> TreeResult<usize> {
        Ok(self.get(id)?.length())
    }

    /// Tokens without a parent, in arena slot order.
    pub fn roots(&self) -> impl Iterator<Item = TokenRef<'_>> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(move |(idx, node)| TokenRef::new(self, TokenId(idx), node))
    }
}
