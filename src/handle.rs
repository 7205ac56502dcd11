//! Borrowed view of one token inside its tree.

use std::collections::BTreeSet;
use std::fmt;
use std::ptr;

use crate::arena::{TokenId, TokenTree, TreeNode};
use crate::token::Token;
use crate::traversal::{Ancestors, Children, PreOrder};

/// A token together with the tree that owns it.
///
/// All queries are total: the id was resolved when the ref was obtained and
/// the tree cannot change while it is borrowed.
#[derive(Clone, Copy)]
pub struct TokenRef<'a> {
    tree: &'a TokenTree,
    id: TokenId,
    node: &'a TreeNode,
}

impl<'a> TokenRef<'a> {
    pub(crate) fn new(tree: &'a TokenTree, id: TokenId, node: &'a TreeNode) -> Self {
        Self { tree, id, node }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn tree(&self) -> &'a TokenTree {
        self.tree
    }

    pub fn token(&self) -> &'a Token {
        &self.node.token
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.node.token.kind()
    }

    pub fn text(&self) -> Option<&'a str> {
        self.node.token.text()
    }

    pub fn tags(&self) -> &'a BTreeSet<String> {
        self.node.token.tags()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.node.token.has_tag(tag)
    }

    pub fn parent(&self) -> Option<TokenRef<'a>> {
        let parent = self.node.parent?;
        self.tree
            .node(parent)
            .map(|node| TokenRef::new(self.tree, parent, node))
    }

    /// Direct children in insertion order. Does not descend.
    pub fn children(&self) -> Children<'a> {
        Children::new(self.tree, &self.node.children)
    }

    pub fn child(&self, index: usize) -> Option<TokenRef<'a>> {
        self.children().nth(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    /// Position of this token among its parent's children.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.parent()?
            .node
            .children
            .iter()
            .position(|&c| c == self.id)
    }

    /// Without a tag: whether any child exists. With a tag: whether some
    /// direct child carries it. Grandchildren are not consulted.
    pub fn has_under(&self, tag: Option<&str>) -> bool {
        match tag {
            None => !self.node.children.is_empty(),
            Some(tag) => self.children().any(|child| child.has_tag(tag)),
        }
    }

    /// The substring this token represents.
    ///
    /// A leaf yields its own text (or ""), an aggregator the concatenation
    /// of its children's values in order. Text stored on an aggregator is
    /// ignored while it has children. Recomputed on every call.
    pub fn value(&self) -> String {
        let mut out = String::new();
        for leaf in self.leaves() {
            if let Some(text) = leaf.text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Length of [`value`](Self::value) in characters.
    pub fn length(&self) -> usize {
        self.leaves()
            .filter_map(|leaf| leaf.text())
            .map(|text| text.chars().count())
            .sum()
    }

    /// Length of [`value`](Self::value) in UTF-8 bytes.
    pub fn byte_len(&self) -> usize {
        self.leaves().filter_map(|leaf| leaf.text()).map(str::len).sum()
    }

    /// Neither kind nor text set; children are irrelevant.
    pub fn is_empty(&self) -> bool {
        self.node.token.is_empty()
    }

    /// Pre-order walk of the subtree below this token, left to right.
    pub fn descendants(&self) -> PreOrder<'a> {
        PreOrder::new(self.tree, self.id, false)
    }

    /// Descendants carrying `tag`, or all descendants when `tag` is None.
    pub fn iter_under(&self, tag: Option<&str>) -> impl Iterator<Item = TokenRef<'a>> {
        let tag = tag.map(str::to_owned);
        self.descendants()
            .filter(move |t| tag.as_deref().map_or(true, |tag| t.has_tag(tag)))
    }

    /// Leaf tokens of the subtree in left-to-right order; a leaf is its own
    /// single leaf.
    pub fn leaves(&self) -> impl Iterator<Item = TokenRef<'a>> {
        PreOrder::new(self.tree, self.id, true).filter(|t| t.is_leaf())
    }

    /// Parent chain up to the root, nearest first.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors::new(self.tree, self.node.parent)
    }

    pub fn root(&self) -> TokenRef<'a> {
        self.ancestors().last().unwrap_or(*self)
    }

    /// Height of the subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.id, 1)];
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.tree.node(idx) {
                max_depth = max_depth.max(depth);
                stack.extend(node.children.iter().map(|&c| (c, depth + 1)));
            }
        }
        max_depth
    }
}

impl fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("tags", self.tags())
            .field("parent", &self.node.parent)
            .field("children", &self.node.children)
            .finish()
    }
}

impl fmt::Display for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{}({:?})", kind, self.value()),
            None => write!(f, "{:?}", self.value()),
        }
    }
}

/// Identity: same tree, same token.
impl PartialEq for TokenRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for TokenRef<'_> {}

/// Value equality against plain text.
impl PartialEq<str> for TokenRef<'_> {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for TokenRef<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}

impl PartialEq<String> for TokenRef<'_> {
    fn eq(&self, other: &String) -> bool {
        self.value() == *other
    }
}

impl PartialEq<TokenRef<'_>> for str {
    fn eq(&self, other: &TokenRef<'_>) -> bool {
        other == self
    }
}

impl PartialEq<TokenRef<'_>> for &str {
    fn eq(&self, other: &TokenRef<'_>) -> bool {
        other == self
    }
}

impl PartialEq<TokenRef<'_>> for String {
    fn eq(&self, other: &TokenRef<'_>) -> bool {
        other == self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_ignores_aggregator_text_until_children_removed() {
        let mut tree = TokenTree::new();
        let root = tree.insert(Token::rule("sum").with_text("stale"));
        let leaf = tree.insert(Token::literal("fresh"));
        tree.add(root, leaf).unwrap();
        assert_eq!(tree.get(root).unwrap().value(), "fresh");

        tree.remove(root, leaf).unwrap();
        assert_eq!(tree.get(root).unwrap().value(), "stale");
    }

    #[test]
    fn test_length_counts_characters() {
        let mut tree = TokenTree::new();
        let root = tree.insert(Token::rule("word"));
        for text in ["ä", "b", "ç"] {
            let leaf = tree.insert(Token::literal(text));
            tree.add(root, leaf).unwrap();
        }
        let token = tree.get(root).unwrap();
        assert_eq!(token.length(), 3);
        assert_eq!(token.byte_len(), 5);
    }

    #[test]
    fn test_identity_requires_same_tree() {
        let mut a = TokenTree::new();
        let mut b = TokenTree::new();
        let ia = a.insert(Token::literal("x"));
        let ib = b.insert(Token::literal("x"));
        assert_eq!(ia, ib);
        assert_ne!(a.get(ia).unwrap(), b.get(ib).unwrap());
        assert_eq!(a.get(ia).unwrap(), a.get(ia).unwrap());
    }

    #[test]
    fn test_display() {
        let mut tree = TokenTree::new();
        let root = tree.insert(Token::rule("sum"));
        let leaf = tree.insert(Token::literal("1"));
        tree.add(root, leaf).unwrap();
        assert_eq!(tree.get(root).unwrap().to_string(), "sum(\"1\")");
        assert_eq!(tree.get(leaf).unwrap().to_string(), "\"1\"");
    }

    #[test]
    fn test_index_in_parent() {
        let mut tree = TokenTree::new();
        let root = tree.insert(Token::rule("list"));
        let ids: Vec<TokenId> = (0..3)
            .map(|i| {
                let id = tree.insert(Token::literal(i.to_string()));
                tree.add(root, id).unwrap();
                id
            })
            .collect();
        assert_eq!(tree.get(ids[2]).unwrap().index_in_parent(), Some(2));
        assert_eq!(tree.get(root).unwrap().index_in_parent(), None);
    }
}
