//! Type-safety wrapper for strings that must be lowercase

use std::borrow::{Borrow, Cow};

/// Wraps a string (either owned or `&str`) and guarantees that it's lowercase.
///
/// Localization keys are looked up case-insensitively by the game, so every membership test on
/// keys goes through this type. Lowercasing is Unicode-aware and leaves accents alone.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lowercase<'a>(Cow<'a, str>);

impl<'a> Lowercase<'a> {
    /// Take a string and return the lowercased version.
    pub fn new(s: &'a str) -> Self {
        // Avoid allocating if it's not necessary
        if s.chars().any(char::is_uppercase) {
            Lowercase(Cow::Owned(s.to_lowercase()))
        } else {
            Lowercase(Cow::Borrowed(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_owned(self) -> Lowercase<'static> {
        Lowercase(Cow::Owned(self.0.into_owned()))
    }
}

impl Borrow<str> for Lowercase<'_> {
    fn borrow(&self) -> &str {
        &self.0
    }
}
