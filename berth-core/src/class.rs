use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fare class codes as printed on tickets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassType {
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "3A")]
    AcThreeTier,
    #[serde(rename = "2A")]
    AcTwoTier,
    #[serde(rename = "1A")]
    AcFirstClass,
    #[serde(rename = "CC")]
    ChairCar,
    #[serde(rename = "EC")]
    ExecutiveClass,
}

impl ClassType {
    pub const ALL: [ClassType; 6] = [
        ClassType::Sleeper,
        ClassType::AcThreeTier,
        ClassType::AcTwoTier,
        ClassType::AcFirstClass,
        ClassType::ChairCar,
        ClassType::ExecutiveClass,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ClassType::Sleeper => "SL",
            ClassType::AcThreeTier => "3A",
            ClassType::AcTwoTier => "2A",
            ClassType::AcFirstClass => "1A",
            ClassType::ChairCar => "CC",
            ClassType::ExecutiveClass => "EC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClassType::Sleeper => "Sleeper Class",
            ClassType::AcThreeTier => "AC 3 Tier",
            ClassType::AcTwoTier => "AC 2 Tier",
            ClassType::AcFirstClass => "AC First Class",
            ClassType::ChairCar => "Chair Car",
            ClassType::ExecutiveClass => "Executive Class",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown class code: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for ClassType {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassType::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}

/// Class restriction on a search: `"all"` or a single class code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClassFilter {
    #[default]
    All,
    Only(ClassType),
}

impl ClassFilter {
    pub fn admits(&self, class_type: ClassType) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(wanted) => *wanted == class_type,
        }
    }
}

impl TryFrom<String> for ClassFilter {
    type Error = UnknownClass;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() || value.trim().eq_ignore_ascii_case("all") {
            return Ok(ClassFilter::All);
        }
        value.parse().map(ClassFilter::Only)
    }
}

impl From<ClassFilter> for String {
    fn from(value: ClassFilter) -> Self {
        match value {
            ClassFilter::All => "all".to_string(),
            ClassFilter::Only(class_type) => class_type.code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_codes_parse_case_insensitively() {
        assert_eq!("3a".parse::<ClassType>().unwrap(), ClassType::AcThreeTier);
        assert_eq!("SL".parse::<ClassType>().unwrap(), ClassType::Sleeper);
        assert!("4A".parse::<ClassType>().is_err());
    }

    #[test]
    fn test_class_filter_serde() {
        let all: ClassFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, ClassFilter::All);

        let only: ClassFilter = serde_json::from_str("\"2A\"").unwrap();
        assert_eq!(only, ClassFilter::Only(ClassType::AcTwoTier));
        assert_eq!(serde_json::to_string(&only).unwrap(), "\"2A\"");

        assert!(serde_json::from_str::<ClassFilter>("\"XX\"").is_err());
    }

    #[test]
    fn test_class_filter_admits() {
        assert!(ClassFilter::All.admits(ClassType::ChairCar));
        assert!(ClassFilter::Only(ClassType::Sleeper).admits(ClassType::Sleeper));
        assert!(!ClassFilter::Only(ClassType::Sleeper).admits(ClassType::AcFirstClass));
    }
}
