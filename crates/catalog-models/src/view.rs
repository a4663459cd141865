use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed sort orders offered by the list view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    RatingDesc,
    RatingAsc,
    YearDesc,
    YearAsc,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::RatingDesc,
        SortKey::RatingAsc,
        SortKey::YearDesc,
        SortKey::YearAsc,
        SortKey::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::RatingDesc => "rating-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::YearDesc => "year-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    // Underscored forms come from older list URLs (`sort=rating_desc`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "rating-desc" => Ok(SortKey::RatingDesc),
            "rating-asc" => Ok(SortKey::RatingAsc),
            "year-desc" => Ok(SortKey::YearDesc),
            "year-asc" => Ok(SortKey::YearAsc),
            "title" | "title-asc" => Ok(SortKey::Title),
            other => Err(format!(
                "Invalid sort key: {}. Use rating-desc, rating-asc, year-desc, year-asc or title",
                other
            )),
        }
    }
}

/// How minute durations are spelled out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `2h 15m`
    #[default]
    Short,
    /// `2 hours 15 minutes`
    Long,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("rating_desc".parse::<SortKey>(), Ok(SortKey::RatingDesc));
        assert_eq!("Year-Asc".parse::<SortKey>(), Ok(SortKey::YearAsc));
        assert!("popularity".parse::<SortKey>().is_err());
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }
}
