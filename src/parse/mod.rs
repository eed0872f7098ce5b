//! Parsers for the text formats the tooltip tools read.

use thiserror::Error;

use crate::token::Loc;

pub mod kvfile;

/// A structural error that makes a whole file unusable.
#[derive(Debug, Clone, Error)]
#[error("{msg}")]
pub struct ParseError {
    pub loc: Loc,
    pub msg: String,
}

impl ParseError {
    pub(crate) fn new(loc: Loc, msg: &str) -> Self {
        ParseError { loc, msg: msg.to_string() }
    }
}
