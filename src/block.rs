//! The key-value tree that a parsed script file turns into.
//!
//! A [`Block`] is the contents of a `{ ... }` pair, or of a whole file. It is an ordered list of
//! [`Field`]s, and the same key may occur any number of times in it.

use crate::token::{Loc, Token};

/// BV is the value half of a [`Field`]. It is either a nested Block or a single scalar Value.
///
/// Whether a field "has a value" or "has children" is decided by this enum alone.
#[derive(Clone, Debug)]
pub enum BV {
    Value(Token),
    Block(Block),
}

impl BV {
    pub fn get_block(&self) -> Option<&Block> {
        match self {
            BV::Value(_) => None,
            BV::Block(b) => Some(b),
        }
    }

    pub fn get_value(&self) -> Option<&Token> {
        match self {
            BV::Value(t) => Some(t),
            BV::Block(_) => None,
        }
    }

    pub fn loc(&self) -> &Loc {
        match self {
            BV::Value(t) => &t.loc,
            BV::Block(b) => &b.loc,
        }
    }
}

/// A `"key" value` or `"key" { ... }` pair.
#[derive(Clone, Debug)]
pub struct Field(pub Token, pub BV);

impl Field {
    pub fn key(&self) -> &Token {
        &self.0
    }

    pub fn get_value(&self) -> Option<&Token> {
        self.1.get_value()
    }

    pub fn get_block(&self) -> Option<&Block> {
        self.1.get_block()
    }

    /// The child fields of this field. Empty if the field holds a scalar value.
    pub fn children(&self) -> &[Field] {
        match &self.1 {
            BV::Value(_) => &[],
            BV::Block(block) => block.fields(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Block {
    fields: Vec<Field>,
    /// Location of the opening brace, or of the start of the file for the top level.
    pub loc: Loc,
}

impl Block {
    pub fn new(loc: Loc) -> Self {
        Block { fields: Vec::new(), loc }
    }

    pub fn add_field(&mut self, key: Token, bv: BV) {
        self.fields.push(Field(key, bv));
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter_fields(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields with this key, in file order.
    pub fn get_fields<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |field| field.key().is(key))
    }

    /// The first field with this key.
    pub fn get_field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key().is(key))
    }

    /// The scalar value of the first field with this key, if that field holds a value.
    pub fn get_field_value(&self, key: &str) -> Option<&Token> {
        self.get_field(key).and_then(Field::get_value)
    }

    /// The block of the first field with this key, if that field holds a block.
    pub fn get_field_block(&self, key: &str) -> Option<&Block> {
        self.get_field(key).and_then(Field::get_block)
    }

    /// All blocks held by fields with this key, in file order.
    pub fn get_field_blocks<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.get_fields(key).filter_map(Field::get_block)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get_field(key).is_some()
    }

    /// Files in this format wrap their contents in a single named root block,
    /// such as `"DOTAAbilities" { ... }`. Return the first such block.
    pub fn root_block(&self) -> Option<(&Token, &Block)> {
        self.fields.iter().find_map(|Field(key, bv)| bv.get_block().map(|block| (key, block)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn tok(s: &str) -> Token {
        Token::new(s, Loc::for_file(Path::new("test.txt")))
    }

    #[test]
    fn repeated_keys_keep_order() {
        let mut block = Block::new(Loc::for_file(Path::new("test.txt")));
        block.add_field(tok("a"), BV::Value(tok("1")));
        block.add_field(tok("b"), BV::Value(tok("2")));
        block.add_field(tok("a"), BV::Value(tok("3")));

        let values: Vec<&str> =
            block.get_fields("a").filter_map(Field::get_value).map(Token::as_str).collect();
        assert_eq!(values, vec!["1", "3"]);
        assert_eq!(block.get_field_value("a").map(Token::as_str), Some("1"));
        assert!(block.get_field_block("a").is_none());
    }

    #[test]
    fn value_field_has_no_children() {
        let field = Field(tok("key"), BV::Value(tok("value")));
        assert!(field.children().is_empty());
        assert!(field.get_value().is_some());
    }

    #[test]
    fn root_block_skips_loose_values() {
        let mut inner = Block::new(Loc::for_file(Path::new("test.txt")));
        inner.add_field(tok("x"), BV::Value(tok("y")));
        let mut top = Block::new(Loc::for_file(Path::new("test.txt")));
        top.add_field(tok("#base"), BV::Value(tok("other.txt")));
        top.add_field(tok("DOTAAbilities"), BV::Block(inner));

        let (key, block) = top.root_block().expect("root block");
        assert!(key.is("DOTAAbilities"));
        assert!(block.has_key("x"));
    }
}
