//! Waitlist signup roles.

use serde::{Deserialize, Serialize};

/// Who is signing up for the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignupRole {
    /// A consumer who wants beef delivered.
    #[default]
    Customer,
    /// A cattle farmer who wants to list products.
    Farmer,
}

impl std::fmt::Display for SignupRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Farmer => write!(f, "farmer"),
        }
    }
}

impl std::str::FromStr for SignupRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "farmer" => Ok(Self::Farmer),
            other => Err(format!("unknown signup role: {other}")),
        }
    }
}

/// Role-specific signup details.
///
/// A customer reports how many pounds of beef they buy per month; a farmer
/// reports how many cattle they sell per month. Modeling this as a tagged
/// union makes the "both fields present" and "neither present" states
/// unrepresentable.
///
/// Each count must be at least 1; validation enforces this before a value
/// is constructed from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleDetails {
    /// Consumer demand volume.
    Customer {
        /// Pounds of beef bought per month.
        monthly_beef_pounds: u32,
    },
    /// Farmer supply volume.
    Farmer {
        /// Cattle sold per month.
        monthly_cattle_sold: u32,
    },
}

impl RoleDetails {
    /// The role this detail set belongs to.
    #[must_use]
    pub const fn role(&self) -> SignupRole {
        match self {
            Self::Customer { .. } => SignupRole::Customer,
            Self::Farmer { .. } => SignupRole::Farmer,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_from_str() {
        assert_eq!(SignupRole::Customer.to_string(), "customer");
        assert_eq!(SignupRole::Farmer.to_string(), "farmer");
        assert_eq!("customer".parse::<SignupRole>().unwrap(), SignupRole::Customer);
        assert_eq!("farmer".parse::<SignupRole>().unwrap(), SignupRole::Farmer);
        assert!("rancher".parse::<SignupRole>().is_err());
    }

    #[test]
    fn test_default_role_is_customer() {
        assert_eq!(SignupRole::default(), SignupRole::Customer);
    }

    #[test]
    fn test_details_role() {
        let customer = RoleDetails::Customer {
            monthly_beef_pounds: 10,
        };
        let farmer = RoleDetails::Farmer {
            monthly_cattle_sold: 3,
        };
        assert_eq!(customer.role(), SignupRole::Customer);
        assert_eq!(farmer.role(), SignupRole::Farmer);
    }

    #[test]
    fn test_details_serde_tagging() {
        let farmer = RoleDetails::Farmer {
            monthly_cattle_sold: 3,
        };
        let json = serde_json::to_string(&farmer).unwrap();
        assert_eq!(json, r#"{"role":"farmer","monthly_cattle_sold":3}"#);
        // The customer field is never present on a farmer record
        assert!(!json.contains("monthly_beef_pounds"));

        let parsed: RoleDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, farmer);
    }
}
