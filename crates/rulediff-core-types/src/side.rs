//! Which of the two compared rule documents a value came from

use serde::{Deserialize, Serialize};

/// One of the two inputs of a comparison.
///
/// `First` is the left-hand document (alert file 1), `Second` the
/// right-hand one (alert file 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSide {
    First,
    Second,
}

impl InputSide {
    /// 1-based file number used in human-facing messages
    pub fn number(self) -> u8 {
        match self {
            InputSide::First => 1,
            InputSide::Second => 2,
        }
    }
}

impl std::fmt::Display for InputSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_file_number() {
        assert_eq!(InputSide::First.to_string(), "file 1");
        assert_eq!(InputSide::Second.to_string(), "file 2");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&InputSide::Second).unwrap();
        assert_eq!(json, "\"second\"");
        let back: InputSide = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InputSide::Second);
    }
}
