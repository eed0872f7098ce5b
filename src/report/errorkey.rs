use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Defines the problem category of a report. Used for filtering and for the JSON output.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKey {
    Config,
    ReadError,
    WriteError,
    ParseError,
    Localization,
    Duplicate,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_roundtrip_names() {
        for key in ErrorKey::iter() {
            assert_eq!(ErrorKey::from_str(&key.to_string()).ok(), Some(key));
        }
        assert_eq!(ErrorKey::ParseError.to_string(), "parse-error");
    }
}
