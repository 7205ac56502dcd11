//! Parse-tree tokens for grammar-driven parsers.
//!
//! Every matched grammar rule becomes one [`Token`]; tokens are owned by a
//! [`TokenTree`] arena and linked by [`TokenId`]s. Leaves carry literal text,
//! aggregators reconstruct the matched substring from their children:
//!
//! ```
//! use tokentree::{Token, TokenTree};
//!
//! let mut tree = TokenTree::new();
//! let sum = tree.insert(Token::rule("sum"));
//! for text in ["1", "+", "2"] {
//!     let leaf = tree.insert(Token::literal(text));
//!     tree.add(sum, leaf).unwrap();
//! }
//! let sum = tree.get(sum).unwrap();
//! assert_eq!(sum.value(), "1+2");
//! assert!(sum == "1+2");
//! ```

pub mod arena;
pub mod config;
pub mod errors;
pub mod handle;
pub mod token;
pub mod traversal;
pub mod tree_traits;
pub mod util;

pub use arena::{TokenId, TokenTree};
pub use config::RenderSettings;
pub use errors::{TreeError, TreeResult};
pub use handle::TokenRef;
pub use token::Token;
pub use tree_traits::TokenTreeConvert;
