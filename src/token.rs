//! Token payload: classification and literal text of one parse-tree node.

use std::collections::BTreeSet;
use std::fmt;

/// Data carried by a single node of the parse tree.
///
/// A token is either a literal holder (`text`, typically no `kind`) or an
/// aggregator labelled with the grammar rule that produced it (`kind`).
/// Which of the two it acts as is decided by the tree at query time: a node
/// with children aggregates, a node without children yields its `text`.
#[derive(Debug, Clone, Default)]
pub struct Token {
    /// Grammar-rule label, absent for raw literals
    kind: Option<String>,
    /// Literal matched text
    text: Option<String>,
    /// Classification set; always contains `kind` when it is set
    tags: BTreeSet<String>,
}

impl Token {
    /// Creates a token with optional kind, text and extra tags.
    ///
    /// The tag set starts as `{kind}` (when present) united with `tags`.
    /// Caller tags are copied into a fresh set.
    pub fn new(kind: Option<&str>, text: Option<&str>, tags: &[&str]) -> Self {
        let mut token = Self {
            kind: kind.map(str::to_owned),
            text: text.map(str::to_owned),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        };
        if let Some(kind) = &token.kind {
            token.tags.insert(kind.clone());
        }
        token
    }

    /// Aggregator token for a grammar rule.
    pub fn rule(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            tags: BTreeSet::from([kind.clone()]),
            kind: Some(kind),
            text: None,
        }
    }

    /// Literal token holding matched text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: None,
            text: Some(text.into()),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Adds `name` to the tag set; no-op if already present.
    pub fn tag(&mut self, name: impl Into<String>) {
        self.tags.insert(name.into());
    }

    /// A token is empty when neither `kind` nor `text` is set.
    ///
    /// Children do not count: an unlabelled aggregator is still empty.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.text.is_none()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.text) {
            (Some(kind), Some(text)) => write!(f, "{}({:?})", kind, text),
            (Some(kind), None) => write!(f, "{}", kind),
            (None, Some(text)) => write!(f, "{:?}", text),
            (None, None) => write!(f, "<empty>"),
        }
    }
}
