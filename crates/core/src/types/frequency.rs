//! Delivery frequency for beef subscriptions.

use serde::{Deserialize, Serialize};

/// How often a member wants beef delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryFrequency {
    /// Every week.
    #[default]
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Once a month.
    Monthly,
}

impl DeliveryFrequency {
    /// All frequencies in display order.
    pub const ALL: [Self; 3] = [Self::Weekly, Self::BiWeekly, Self::Monthly];

    /// The wire/database representation (`weekly`, `bi-weekly`, `monthly`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Human-readable label for UI display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl std::fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliveryFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown delivery frequency: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all() {
        for freq in DeliveryFrequency::ALL {
            let parsed: DeliveryFrequency = freq.as_str().parse().unwrap();
            assert_eq!(parsed, freq);
        }
    }

    #[test]
    fn test_bi_weekly_is_hyphenated() {
        assert_eq!(DeliveryFrequency::BiWeekly.as_str(), "bi-weekly");
        let json = serde_json::to_string(&DeliveryFrequency::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");
    }

    #[test]
    fn test_rejects_unknown() {
        assert!("fortnightly".parse::<DeliveryFrequency>().is_err());
        assert!("".parse::<DeliveryFrequency>().is_err());
    }

    #[test]
    fn test_default_is_weekly() {
        assert_eq!(DeliveryFrequency::default(), DeliveryFrequency::Weekly);
    }
}
