//! Parser for Valve's KeyValues text format, as used by the npc script files and the addon
//! localization files.
//!
//! ```text
//! "DOTAAbilities"
//! {
//!     "Version"   "1"
//!     "fireball"
//!     {
//!         "AbilitySpecial" { "01" { "var_type" "FIELD_INTEGER" "damage" "100" } }
//!     }
//! }
//! ```
//!
//! Keys and values may be quoted or bare words. `//` starts a comment. A `[$CONDITION]` tag
//! after a value or block is accepted and ignored.

use std::iter::Peekable;
use std::mem::swap;
use std::path::Path;
use std::str::Chars;

use crate::block::{Block, BV};
use crate::parse::ParseError;
use crate::token::{Loc, Token};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Neutral,
    QString,
    Id,
    Comment,
    Condition,
}

struct ParseLevel {
    block: Block,
    /// The key that opened this block. `None` only for the top level.
    key: Option<Token>,
    /// A key that has been read and is waiting for its value.
    pending: Option<Token>,
}

struct Parser {
    current: ParseLevel,
    stack: Vec<ParseLevel>,
}

impl Parser {
    fn token(&mut self, token: Token) {
        if let Some(key) = self.current.pending.take() {
            self.current.block.add_field(key, BV::Value(token));
        } else {
            self.current.pending = Some(token);
        }
    }

    fn open_brace(&mut self, loc: Loc) -> Result<(), ParseError> {
        let Some(key) = self.current.pending.take() else {
            return Err(ParseError::new(loc, "block without a key"));
        };
        let mut new_level = ParseLevel { block: Block::new(loc), key: Some(key), pending: None };
        swap(&mut new_level, &mut self.current);
        self.stack.push(new_level);
        Ok(())
    }

    fn close_brace(&mut self, loc: Loc) -> Result<(), ParseError> {
        if let Some(key) = self.current.pending.take() {
            let msg = format!("key `{key}` has no value");
            return Err(ParseError::new(key.loc, &msg));
        }
        let Some(mut prev_level) = self.stack.pop() else {
            return Err(ParseError::new(loc, "unexpected }"));
        };
        swap(&mut self.current, &mut prev_level);
        // Every pushed level has a key; see open_brace.
        if let Some(key) = prev_level.key {
            self.current.block.add_field(key, BV::Block(prev_level.block));
        }
        Ok(())
    }

    fn eof(mut self) -> Result<Block, ParseError> {
        if let Some(key) = self.current.pending.take() {
            let msg = format!("key `{key}` has no value");
            return Err(ParseError::new(key.loc, &msg));
        }
        if !self.stack.is_empty() {
            return Err(ParseError::new(self.current.block.loc, "opening { was never closed"));
        }
        Ok(self.current.block)
    }
}

/// Tracks the position of the next char to be read.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    loc: Loc,
}

impl Cursor<'_> {
    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.loc.line += 1;
            self.loc.column = 1;
        } else {
            self.loc.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}

fn is_id_end(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '{' || c == '}'
}

fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Parse the text of a KeyValues file into its top-level [`Block`].
///
/// `pathname` is only used for the locations in the result.
pub fn parse_kv(pathname: &Path, content: &str) -> Result<Block, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let start = Loc::start_of(pathname);
    let mut cursor = Cursor { chars: content.chars().peekable(), loc: start.clone() };
    let mut parser = Parser {
        current: ParseLevel { block: Block::new(start.clone()), key: None, pending: None },
        stack: Vec::new(),
    };

    let mut state = State::Neutral;
    let mut text = String::new();
    let mut token_start = start;

    loop {
        let loc = cursor.loc.clone();
        let Some(c) = cursor.next() else {
            break;
        };
        match state {
            State::Neutral => {
                if c.is_whitespace() {
                    continue;
                }
                match c {
                    '"' => {
                        token_start = loc;
                        state = State::QString;
                    }
                    '{' => parser.open_brace(loc)?,
                    '}' => parser.close_brace(loc)?,
                    '[' => state = State::Condition,
                    '/' if cursor.peek() == Some('/') => state = State::Comment,
                    _ => {
                        token_start = loc;
                        text.push(c);
                        state = State::Id;
                    }
                }
            }
            State::QString => match c {
                '"' => {
                    parser.token(Token::from_string(std::mem::take(&mut text), token_start.clone()));
                    state = State::Neutral;
                }
                '\\' => match cursor.peek().and_then(unescape) {
                    Some(unescaped) => {
                        cursor.next();
                        text.push(unescaped);
                    }
                    None => text.push(c),
                },
                _ => text.push(c),
            },
            State::Id => {
                if is_id_end(c) {
                    parser.token(Token::from_string(std::mem::take(&mut text), token_start.clone()));
                    state = State::Neutral;
                    match c {
                        '"' => {
                            token_start = loc;
                            state = State::QString;
                        }
                        '{' => parser.open_brace(loc)?,
                        '}' => parser.close_brace(loc)?,
                        _ => (),
                    }
                } else {
                    text.push(c);
                }
            }
            State::Comment => {
                if c == '\n' {
                    state = State::Neutral;
                }
            }
            State::Condition => {
                if c == ']' {
                    state = State::Neutral;
                } else if c == '\n' {
                    return Err(ParseError::new(loc, "unterminated [ condition"));
                }
            }
        }
    }

    match state {
        State::QString => {
            return Err(ParseError::new(token_start, "quoted string was never closed"));
        }
        State::Id => parser.token(Token::from_string(text, token_start)),
        State::Condition => {
            return Err(ParseError::new(cursor.loc, "unterminated [ condition"));
        }
        State::Neutral | State::Comment => (),
    }
    parser.eof()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Field;

    fn parse(content: &str) -> Result<Block, ParseError> {
        parse_kv(Path::new("npc_abilities_custom.txt"), content)
    }

    #[test]
    fn test_nested_blocks() {
        let block = parse(
            r#"
            "DOTAAbilities"
            {
                "Version"  "1"
                "fireball"
                {
                    "AbilitySpecial"
                    {
                        "01" { "var_type" "FIELD_INTEGER" "damage" "100" }
                    }
                }
            }
            "#,
        )
        .unwrap();
        let (key, root) = block.root_block().unwrap();
        assert!(key.is("DOTAAbilities"));
        assert_eq!(root.get_field_value("Version").map(Token::as_str), Some("1"));
        let special = root
            .get_field_block("fireball")
            .and_then(|b| b.get_field_block("AbilitySpecial"))
            .and_then(|b| b.get_field_block("01"))
            .unwrap();
        let keys: Vec<&str> = special.iter_fields().map(|f| f.key().as_str()).collect();
        assert_eq!(keys, vec!["var_type", "damage"]);
    }

    #[test]
    fn test_bare_words_and_comments() {
        let block = parse(
            "// leading comment\nroot {\n  key value // trailing\n  other \"quoted value\"\n}\n",
        )
        .unwrap();
        let (_, root) = block.root_block().unwrap();
        assert_eq!(root.get_field_value("key").map(Token::as_str), Some("value"));
        assert_eq!(root.get_field_value("other").map(Token::as_str), Some("quoted value"));
        assert_eq!(root.fields().len(), 2);
    }

    #[test]
    fn test_repeated_keys() {
        let block = parse(r#""root" { "Tokens" { "a" "1" } "Tokens" { "b" "2" } }"#).unwrap();
        let (_, root) = block.root_block().unwrap();
        let keys: Vec<&str> = root
            .get_field_blocks("Tokens")
            .flat_map(Block::iter_fields)
            .map(|f| f.key().as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_escapes() {
        let block = parse(r#""root" { "key" "say \"hi\"\nnow \\o/" }"#).unwrap();
        let (_, root) = block.root_block().unwrap();
        assert_eq!(root.get_field_value("key").map(Token::as_str), Some("say \"hi\"\nnow \\o/"));
    }

    #[test]
    fn test_unknown_escape_is_kept() {
        let block = parse(r#""root" { "key" "50\%" }"#).unwrap();
        let (_, root) = block.root_block().unwrap();
        assert_eq!(root.get_field_value("key").map(Token::as_str), Some("50\\%"));
    }

    #[test]
    fn test_condition_tags_ignored() {
        let block = parse("\"root\" { \"key\" \"a\" [$WIN32] \"other\" \"b\" }").unwrap();
        let (_, root) = block.root_block().unwrap();
        let keys: Vec<&str> = root.iter_fields().map(|f| f.key().as_str()).collect();
        assert_eq!(keys, vec!["key", "other"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let block = parse("\u{feff}\"lang\" { }").unwrap();
        let (key, _) = block.root_block().unwrap();
        assert!(key.is("lang"));
    }

    #[test]
    fn test_locations() {
        let block = parse("\"root\"\n{\n  \"key\" \"value\"\n}").unwrap();
        let (_, root) = block.root_block().unwrap();
        let Field(key, bv) = &root.fields()[0];
        assert_eq!((key.loc.line, key.loc.column), (3, 3));
        assert_eq!((bv.loc().line, bv.loc().column), (3, 9));
    }

    #[test]
    fn test_unclosed_brace() {
        let err = parse("\"root\" { \"a\" { \"b\" \"c\" }").unwrap_err();
        assert!(err.msg.contains("never closed"));
    }

    #[test]
    fn test_unexpected_close() {
        let err = parse("\"root\" { } }").unwrap_err();
        assert_eq!(err.msg, "unexpected }");
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("\"root\" { \"a\" \"b }").unwrap_err();
        assert!(err.msg.contains("never closed"));
        assert_eq!(err.loc.line, 1);
    }

    #[test]
    fn test_key_without_value() {
        let err = parse("\"root\" { \"a\" }").unwrap_err();
        assert_eq!(err.msg, "key `a` has no value");
    }

    #[test]
    fn test_block_without_key() {
        assert!(parse("{ }").is_err());
    }
}
