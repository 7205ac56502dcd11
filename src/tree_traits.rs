use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::arena::TokenTree;
use crate::config::RenderSettings;
use crate::handle::TokenRef;

pub trait TokenTreeConvert {
    fn to_tree_string_with(&self, settings: &RenderSettings) -> Tree<String>;

    fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_string_with(&RenderSettings::default())
    }
}

/// One-line label for a token according to `settings`.
pub fn label(token: &TokenRef<'_>, settings: &RenderSettings) -> String {
    let mut parts = Vec::new();
    if settings.show_kind {
        parts.push(token.kind().unwrap_or("<literal>").to_string());
    }
    if settings.show_tags {
        let extra = token
            .tags()
            .iter()
            .filter(|t| Some(t.as_str()) != token.kind())
            .join(", ");
        if !extra.is_empty() {
            parts.push(format!("[{}]", extra));
        }
    }
    if settings.show_value {
        parts.push(format!(
            "{:?}",
            truncate(&token.value(), settings.max_value_width)
        ));
    }
    parts.join(" ")
}

fn truncate(value: &str, width: usize) -> String {
    if width == 0 || value.chars().count() <= width {
        value.to_string()
    } else {
        value.chars().take(width).chain(std::iter::once('…')).collect()
    }
}

impl TokenTreeConvert for TokenRef<'_> {
    #[instrument(level = "debug", skip(settings))]
    fn to_tree_string_with(&self, settings: &RenderSettings) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .map(|c| c.to_tree_string_with(settings))
            .collect();

        Tree::new(label(self, settings)).with_leaves(leaves)
    }
}

// Every root of the arena becomes one branch under a synthetic top node
impl TokenTreeConvert for TokenTree {
    fn to_tree_string_with(&self, settings: &RenderSettings) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty tree".to_string());
        }
        let roots: Vec<_> = self
            .roots()
            .map(|root| root.to_tree_string_with(settings))
            .collect();
        Tree::new(format!("TokenTree ({} tokens)", self.len())).with_leaves(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 0), "abcdef");
        assert_eq!(truncate("abcdef", 6), "abcdef");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
