//! Academic term selector sent with every generate and download request.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// The trimester a schedule is generated or exported for.
///
/// The page offers it as a `trimester` radio group whose values are `1`,
/// `2` and `3`; the backend expects the same digits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub const ALL: [Trimester; 3] = [Self::First, Self::Second, Self::Third];

    /// Wire value used in form fields and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
        }
    }

    /// Validate an optional radio-group value.
    ///
    /// `None` means nothing is checked.
    pub fn from_selection(value: Option<&str>) -> Result<Self, GenerateError> {
        match value {
            None => Err(GenerateError::MissingTrimester),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for Trimester {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::First),
            "2" => Ok(Self::Second),
            "3" => Ok(Self::Third),
            "" => Err(GenerateError::MissingTrimester),
            other => Err(GenerateError::InvalidTrimester(other.to_string())),
        }
    }
}

impl std::fmt::Display for Trimester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Trimester {
    type Error = GenerateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Trimester> for String {
    fn from(value: Trimester) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!("1".parse::<Trimester>(), Ok(Trimester::First));
        assert_eq!(" 2 ".parse::<Trimester>(), Ok(Trimester::Second));
        assert_eq!("3".parse::<Trimester>(), Ok(Trimester::Third));
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(
            "4".parse::<Trimester>(),
            Err(GenerateError::InvalidTrimester("4".to_string()))
        );
        assert_eq!("".parse::<Trimester>(), Err(GenerateError::MissingTrimester));
    }

    #[test]
    fn unchecked_selection_is_an_explicit_error() {
        assert_eq!(
            Trimester::from_selection(None),
            Err(GenerateError::MissingTrimester)
        );
        assert_eq!(Trimester::from_selection(Some("1")), Ok(Trimester::First));
    }

    #[test]
    fn display_matches_wire_value() {
        for t in Trimester::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn serde_uses_wire_value() {
        let json = serde_json::to_string(&Trimester::Second).unwrap();
        assert_eq!(json, "\"2\"");
        let back: Trimester = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(back, Trimester::Third);
        assert!(serde_json::from_str::<Trimester>("\"7\"").is_err());
    }
}
