use thiserror::Error;

use crate::arena::TokenId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("Token cannot be its own child: {0}")]
    SelfParent(TokenId),

    #[error("Cycle detected: {child} is an ancestor of {parent}")]
    CycleDetected { parent: TokenId, child: TokenId },

    #[error("Invalid render configuration: {message}")]
    Config { message: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
