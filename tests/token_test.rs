//! Tests for token construction, tagging, truthiness and equality

use std::collections::BTreeSet;

use rstest::rstest;
use tokentree::util::testing;
use tokentree::{Token, TokenTree};

const MASTER: &str = "master";
const CHILD: &str = "child";

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_kind_and_text_when_creating_then_both_are_stored() {
    testing::init_test_setup();
    let token = Token::new(Some(MASTER), Some(MASTER), &[]);
    assert_eq!(token.kind(), Some(MASTER));
    assert_eq!(token.text(), Some(MASTER));
}

#[test]
fn given_new_token_when_inserted_then_it_has_no_links() {
    let mut tree = TokenTree::new();
    let id = tree.insert(Token::rule(MASTER));
    let token = tree.get(id).unwrap();
    assert!(token.parent().is_none());
    assert_eq!(token.children().count(), 0);
}

// ============================================================
// Tags
// ============================================================

#[test]
fn given_kind_when_creating_then_tags_contain_kind() {
    let token = Token::new(Some("K"), None, &[]);
    assert_eq!(token.tags(), &set(&["K"]));
}

#[test]
fn given_kind_and_tags_when_creating_then_tags_are_united() {
    let token = Token::new(Some("K"), None, &["X"]);
    assert_eq!(token.tags(), &set(&["K", "X"]));
}

#[test]
fn given_token_in_tree_when_tagging_then_tag_is_added_once() {
    let mut tree = TokenTree::new();
    let id = tree.insert(Token::new(Some("K"), None, &["X"]));

    tree.tag(id, "Y").unwrap();
    tree.tag(id, "Y").unwrap();

    assert_eq!(tree.token(id).unwrap().tags(), &set(&["K", "X", "Y"]));
}

#[test]
fn given_builder_tags_when_creating_then_kind_is_kept() {
    let token = Token::rule(MASTER).with_tags([CHILD]);
    assert_eq!(token.tags(), &set(&[CHILD, MASTER]));
}

// ============================================================
// Truthiness
// ============================================================

#[rstest]
#[case(None, None, true)]
#[case(Some(MASTER), None, false)]
#[case(None, Some(MASTER), false)]
#[case(Some(MASTER), Some(MASTER), false)]
fn given_kind_and_text_when_checking_empty_then_matches_presence(
    #[case] kind: Option<&str>,
    #[case] text: Option<&str>,
    #[case] empty: bool,
) {
    assert_eq!(Token::new(kind, text, &[]).is_empty(), empty);
}

#[test]
fn given_empty_token_with_children_when_checking_empty_then_still_empty() {
    let mut tree = TokenTree::new();
    let root = tree.insert(Token::default());
    let child = tree.insert(Token::rule(CHILD));
    tree.add(root, child).unwrap();

    assert!(tree.get(root).unwrap().is_empty());
    assert!(!tree.get(child).unwrap().is_empty());
}

// ============================================================
// Equality
// ============================================================

#[test]
fn given_token_when_comparing_with_itself_then_equal() {
    let mut tree = TokenTree::new();
    let id = tree.insert(Token::literal(MASTER));
    assert_eq!(tree.get(id).unwrap(), tree.get(id).unwrap());
}

#[test]
fn given_token_when_comparing_with_strings_then_uses_value() {
    let mut tree = TokenTree::new();
    let id = tree.insert(Token::literal(MASTER));
    let token = tree.get(id).unwrap();

    assert!(token == MASTER);
    assert!(token == MASTER.to_string());
    assert!(MASTER == token);
    assert!(token != CHILD);
}

#[test]
fn given_distinct_tokens_when_comparing_then_not_equal() {
    let mut tree = TokenTree::new();
    let master = tree.insert(Token::literal(MASTER));
    let child = tree.insert(Token::literal(CHILD));
    let twin = tree.insert(Token::literal(MASTER));

    assert_ne!(tree.get(master).unwrap(), tree.get(child).unwrap());
    assert_ne!(tree.get(master).unwrap(), tree.get(twin).unwrap());
}

#[test]
fn given_aggregator_when_comparing_with_string_then_ignores_own_text() {
    let mut tree = TokenTree::new();
    let root = tree.insert(Token::rule("word").with_text("raw"));
    let leaf = tree.insert(Token::literal("cooked"));
    tree.add(root, leaf).unwrap();

    let token = tree.get(root).unwrap();
    assert!(token == "cooked");
    assert!(token != "raw");
}
