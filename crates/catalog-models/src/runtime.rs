use serde::{Deserialize, Serialize};
use std::fmt;

/// Running time of a catalog entry
///
/// Stored either as minutes (`135`) or as a free-form label such as
/// `"2h 15m"` or `"3 Seasons"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Runtime {
    Minutes(u32),
    Label(String),
}

impl Runtime {
    /// Interpret user input: a bare integer is minutes, anything else a label.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u32>() {
            Ok(minutes) => Some(Runtime::Minutes(minutes)),
            Err(_) => Some(Runtime::Label(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::Minutes(m) => write!(f, "{}", m),
            Runtime::Label(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_accepts_both_json_forms() {
        let minutes: Runtime = serde_json::from_str("135").unwrap();
        assert_eq!(minutes, Runtime::Minutes(135));

        let label: Runtime = serde_json::from_str("\"3 Seasons\"").unwrap();
        assert_eq!(label, Runtime::Label("3 Seasons".to_string()));
    }

    #[test]
    fn test_runtime_parse() {
        assert_eq!(Runtime::parse(" 90 "), Some(Runtime::Minutes(90)));
        assert_eq!(Runtime::parse("2h 15m"), Some(Runtime::Label("2h 15m".to_string())));
        assert_eq!(Runtime::parse("  "), None);
    }
}
